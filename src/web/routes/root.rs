use axum::{extract::State, http::HeaderMap, response::IntoResponse};
use serde::Serialize;

use crate::web::hal::{Hal, Links};
use crate::web::relations::{self, Routes};
use crate::web::AppState;

/// Entry point of the API: links to the top-level collections.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    #[serde(rename = "_links")]
    pub links: Links,
}

pub async fn get_root(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let routes = Routes::for_request(&state.config, &headers);
    Hal(RootResponse {
        links: relations::root_links(&routes),
    })
}
