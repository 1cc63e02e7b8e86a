pub mod error;
pub mod hal;
pub mod relations;
pub mod routes;

use std::sync::Arc;

use axum::{
    http::header::{HeaderValue, CACHE_CONTROL},
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::web::routes::{activities, root};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1", get(root::get_root))
        .route(
            "/api/v1/activities",
            get(activities::get_activities).post(activities::new_activity),
        )
        .route(
            "/api/v1/activities/:alternate_key",
            get(activities::get_activity_by)
                .put(activities::update_activity)
                .delete(activities::delete_activity),
        )
        .route(
            "/api/v1/activities/:alternate_key/participants",
            get(activities::get_participants_by).post(activities::new_participant),
        )
        .route(
            "/api/v1/activities/:alternate_key/participants/:participant_key",
            get(activities::get_participant_by),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
