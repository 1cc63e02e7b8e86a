use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::database::search_filter::SearchFilter;
use crate::database::{activities_repo, activity_participants_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Activity, ActivityRequest, Page, Participant, ParticipantRequest};
use crate::services::activity_mapper;
use crate::services::validation::Validate;

pub async fn get_activities(
    pool: &SqlitePool,
    search: Option<&SearchFilter>,
    page: u32,
    size: u32,
) -> ServiceResult<Page<Activity>> {
    let records = activities_repo::get_all(pool, search, page, size).await?;
    Ok(records.map(activity_mapper::to_activity_response))
}

pub async fn get_activity_by(pool: &SqlitePool, alternate_key: &str) -> ServiceResult<Option<Activity>> {
    let found = activities_repo::get_by(pool, alternate_key).await?;
    Ok(found.map(activity_mapper::to_activity_response))
}

async fn save(pool: &SqlitePool, alternate_key: String, request: ActivityRequest) -> ServiceResult<Activity> {
    request.validate()?;
    let mut record = activity_mapper::to_activity_record(request);
    record.alternate_key = alternate_key;
    let saved = activities_repo::save(pool, &record).await?;
    Ok(activity_mapper::to_activity_response(saved))
}

pub async fn new_activity(pool: &SqlitePool, request: ActivityRequest) -> ServiceResult<Activity> {
    let activity = save(pool, Uuid::new_v4().to_string(), request).await?;
    info!(alternate_key = %activity.alternate_key, "activity created");
    Ok(activity)
}

/// Stores `request` under `alternate_key`, creating the activity when the key
/// is unknown.
pub async fn update_activity(
    pool: &SqlitePool,
    alternate_key: &str,
    request: ActivityRequest,
) -> ServiceResult<Activity> {
    let activity = save(pool, alternate_key.to_string(), request).await?;
    info!(alternate_key = %alternate_key, "activity saved");
    Ok(activity)
}

pub async fn delete_activity(pool: &SqlitePool, alternate_key: &str) -> ServiceResult<bool> {
    let removed = activities_repo::delete(pool, alternate_key).await?;
    if removed > 0 {
        info!(alternate_key = %alternate_key, "activity deleted");
    }
    Ok(removed > 0)
}

/// Participants of an unknown activity are an empty page, not an error.
pub async fn get_activity_participants(
    pool: &SqlitePool,
    alternate_key: &str,
    page: u32,
    size: u32,
) -> ServiceResult<Page<Participant>> {
    let records =
        activity_participants_repo::get_all_by_activity(pool, alternate_key, page, size).await?;
    Ok(records.map(activity_mapper::to_participant_response))
}

pub async fn get_activity_participant(
    pool: &SqlitePool,
    alternate_key: &str,
    participant_key: &str,
) -> ServiceResult<Option<Participant>> {
    let found = activity_participants_repo::get_by(pool, alternate_key, participant_key).await?;
    Ok(found.map(activity_mapper::to_participant_response))
}

/// Capacity and e-mail uniqueness are decided by the insert itself, so
/// concurrent sign-ups for the same activity cannot get past either rule.
pub async fn new_participant(
    pool: &SqlitePool,
    alternate_key: &str,
    request: ParticipantRequest,
) -> ServiceResult<Participant> {
    request.validate()?;

    if activities_repo::get_by(pool, alternate_key).await?.is_none() {
        return Err(ServiceError::activity_not_found(alternate_key));
    }

    let mut record = activity_mapper::to_participant_record(alternate_key, request);
    record.alternate_key = Uuid::new_v4().to_string();

    let saved = match activity_participants_repo::insert(pool, &record).await {
        Ok(Some(saved)) => saved,
        Ok(None) => return Err(not_inserted(pool, alternate_key).await),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(ServiceError::InvalidParticipant(format!(
                "A participant with email {} is already registered for activity {}",
                record.email, alternate_key
            )));
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        alternate_key = %saved.alternate_key,
        activity_alternate_key = %alternate_key,
        "participant created"
    );
    Ok(activity_mapper::to_participant_response(saved))
}

// The conditional insert wrote nothing: the activity is full, or it was
// deleted after the existence check.
async fn not_inserted(pool: &SqlitePool, alternate_key: &str) -> ServiceError {
    match activities_repo::get_by(pool, alternate_key).await {
        Ok(Some(activity)) => ServiceError::InvalidParticipant(format!(
            "Activity with alternate key {} already has the maximum of {} participants",
            alternate_key, activity.participants
        )),
        Ok(None) => ServiceError::activity_not_found(alternate_key),
        Err(e) => e.into(),
    }
}
