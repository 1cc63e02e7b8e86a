use sqlx::SqlitePool;

use crate::models::page::{self, Page};
use crate::models::ActivityParticipantsRow;

const SQL_LIST_BY_ACTIVITY: &str = r#"
SELECT
  alternate_key,
  activity_alternate_key,
  first_name,
  last_name,
  email
FROM activity_participants
WHERE activity_alternate_key = ?
ORDER BY id ASC
LIMIT ? OFFSET ?
"#;

const SQL_COUNT_BY_ACTIVITY: &str = r#"
SELECT COUNT(*)
FROM activity_participants
WHERE activity_alternate_key = ?1
"#;

pub async fn get_all_by_activity(
    pool: &SqlitePool,
    activity_alternate_key: &str,
    page: u32,
    size: u32,
) -> sqlx::Result<Page<ActivityParticipantsRow>> {
    let total = count_by_activity(pool, activity_alternate_key).await?;
    let rows = sqlx::query_as::<_, ActivityParticipantsRow>(SQL_LIST_BY_ACTIVITY)
        .bind(activity_alternate_key)
        .bind(i64::from(size))
        .bind(page::offset(page, size))
        .fetch_all(pool)
        .await?;
    Ok(Page::new(rows, page, size, total.max(0) as u64))
}

pub async fn count_by_activity(pool: &SqlitePool, activity_alternate_key: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_BY_ACTIVITY)
        .bind(activity_alternate_key)
        .fetch_one(pool)
        .await
}

const SQL_GET_BY_ALTERNATE_KEY: &str = r#"
SELECT
  alternate_key,
  activity_alternate_key,
  first_name,
  last_name,
  email
FROM activity_participants
WHERE activity_alternate_key = ?1
  AND alternate_key = ?2
LIMIT 1
"#;

pub async fn get_by(
    pool: &SqlitePool,
    activity_alternate_key: &str,
    alternate_key: &str,
) -> sqlx::Result<Option<ActivityParticipantsRow>> {
    sqlx::query_as::<_, ActivityParticipantsRow>(SQL_GET_BY_ALTERNATE_KEY)
        .bind(activity_alternate_key)
        .bind(alternate_key)
        .fetch_optional(pool)
        .await
}

// Capacity is checked inside the insert so concurrent sign-ups cannot
// overshoot it. A reused e-mail trips idx_activity_participants_email.
const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO activity_participants (
  alternate_key,
  activity_alternate_key,
  first_name,
  last_name,
  email
)
SELECT ?1, ?2, ?3, ?4, ?5
WHERE (
  SELECT COUNT(*)
  FROM activity_participants
  WHERE activity_alternate_key = ?2
) < (
  SELECT participants
  FROM activities
  WHERE alternate_key = ?2
)
RETURNING
  alternate_key,
  activity_alternate_key,
  first_name,
  last_name,
  email
"#;

/// `None` when the activity is full or gone.
pub async fn insert(
    pool: &SqlitePool,
    record: &ActivityParticipantsRow,
) -> sqlx::Result<Option<ActivityParticipantsRow>> {
    sqlx::query_as::<_, ActivityParticipantsRow>(SQL_INSERT_PARTICIPANT)
        .bind(&record.alternate_key)
        .bind(&record.activity_alternate_key)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.email)
        .fetch_optional(pool)
        .await
}
