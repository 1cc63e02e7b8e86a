use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header::LOCATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::config::AppConfig;
use crate::database::search_filter::SearchFilter;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Activity, ActivityRequest, Participant, ParticipantRequest};
use crate::services::activities_service;
use crate::web::hal::{Hal, Link, PagedResources, Resource};
use crate::web::relations::{
    self, Routes, RELATION_ACTIVITIES, RELATION_PARTICIPANTS, RELATION_SELF,
};
use crate::web::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct ActivitiesQuery {
    /// Optional search expression, e.g. `type==busywork`.
    #[serde(default)]
    pub search: String,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

fn page_request(config: &AppConfig, page: Option<u32>, size: Option<u32>) -> ServiceResult<(u32, u32)> {
    let size = size.unwrap_or(config.default_page_size);
    if size == 0 || size > config.max_page_size {
        return Err(ServiceError::Validation(format!(
            "size: must be between 1 and {}",
            config.max_page_size
        )));
    }
    Ok((page.unwrap_or(0), size))
}

// A blank search means no filter.
fn optional_search(raw: &str) -> ServiceResult<Option<SearchFilter>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<SearchFilter>()
        .map(Some)
        .map_err(|e| ServiceError::Validation(format!("search: {}", e)))
}

fn activity_resource(activity: Activity, routes: &Routes) -> Resource<Activity> {
    let links = relations::activity_links(&activity, routes);
    Resource::new(activity, links)
}

fn participant_resource(participant: Participant, routes: &Routes) -> Resource<Participant> {
    let links = relations::participant_links(&participant, routes);
    Resource::new(participant, links)
}

fn uri_failure(target: &str, alternate_key: &str) -> Response {
    warn!(alternate_key = %alternate_key, target, "failed to build location URI");
    (
        StatusCode::BAD_REQUEST,
        format!(
            "Failed to create URI to {} with alternate key {}",
            target, alternate_key
        ),
    )
        .into_response()
}

pub async fn get_activities(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ActivitiesQuery>, QueryRejection>,
) -> Result<Response, ServiceError> {
    let Query(query) = query?;
    let search = optional_search(&query.search)?;
    let (page, size) = page_request(&state.config, query.page, query.size)?;

    let activities =
        activities_service::get_activities(&state.pool, search.as_ref(), page, size).await?;
    if activities.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let routes = Routes::for_request(&state.config, &headers);
    let search = search.map(|s| s.to_string());
    let links = relations::page_links(&activities, |n| {
        routes.activities_page(search.as_deref(), n, size)
    });
    let resources = activities.map(|a| activity_resource(a, &routes));
    Ok(Hal(PagedResources::new(RELATION_ACTIVITIES, resources, links)).into_response())
}

pub async fn get_activity_by(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(alternate_key): Path<String>,
) -> Result<Response, ServiceError> {
    let Some(activity) = activities_service::get_activity_by(&state.pool, &alternate_key).await?
    else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    let routes = Routes::for_request(&state.config, &headers);
    Ok(Hal(activity_resource(activity, &routes)).into_response())
}

pub async fn new_activity(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ActivityRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let Json(request) = payload?;
    let activity = activities_service::new_activity(&state.pool, request).await?;

    let routes = Routes::for_request(&state.config, &headers);
    let resource = activity_resource(activity, &routes);
    match resource.links.get(RELATION_SELF).and_then(relations::to_location) {
        Some(location) => {
            Ok((StatusCode::CREATED, [(LOCATION, location)], Hal(resource)).into_response())
        }
        None => Ok(uri_failure("new activity", &resource.content.alternate_key)),
    }
}

/// Overwrites (or creates) the activity stored under the path key.
pub async fn update_activity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(alternate_key): Path<String>,
    payload: Result<Json<ActivityRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let Json(request) = payload?;
    activities_service::update_activity(&state.pool, &alternate_key, request).await?;

    let routes = Routes::for_request(&state.config, &headers);
    let self_link = Link::new(RELATION_SELF, routes.activity(&alternate_key));
    match relations::to_location(&self_link) {
        Some(location) => Ok((StatusCode::NO_CONTENT, [(LOCATION, location)]).into_response()),
        None => Ok(uri_failure("updated activity", &alternate_key)),
    }
}

pub async fn delete_activity(
    State(state): State<AppState>,
    Path(alternate_key): Path<String>,
) -> Result<StatusCode, ServiceError> {
    if activities_service::delete_activity(&state.pool, &alternate_key).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

pub async fn get_participants_by(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(alternate_key): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Response, ServiceError> {
    let Query(query) = query?;
    let (page, size) = page_request(&state.config, query.page, query.size)?;

    let participants =
        activities_service::get_activity_participants(&state.pool, &alternate_key, page, size)
            .await?;
    if participants.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let routes = Routes::for_request(&state.config, &headers);
    let links = relations::page_links(&participants, |n| {
        routes.participants_page(&alternate_key, n, size)
    });
    let resources = participants.map(|p| participant_resource(p, &routes));
    Ok(Hal(PagedResources::new(RELATION_PARTICIPANTS, resources, links)).into_response())
}

pub async fn get_participant_by(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((alternate_key, participant_key)): Path<(String, String)>,
) -> Result<Response, ServiceError> {
    let Some(participant) =
        activities_service::get_activity_participant(&state.pool, &alternate_key, &participant_key)
            .await?
    else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    let routes = Routes::for_request(&state.config, &headers);
    Ok(Hal(participant_resource(participant, &routes)).into_response())
}

pub async fn new_participant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(alternate_key): Path<String>,
    payload: Result<Json<ParticipantRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let Json(request) = payload?;
    let participant =
        activities_service::new_participant(&state.pool, &alternate_key, request).await?;

    let routes = Routes::for_request(&state.config, &headers);
    let resource = participant_resource(participant, &routes);
    match resource.links.get(RELATION_SELF).and_then(relations::to_location) {
        Some(location) => {
            Ok((StatusCode::CREATED, [(LOCATION, location)], Hal(resource)).into_response())
        }
        None => Ok(uri_failure("new participant", &resource.content.alternate_key)),
    }
}
