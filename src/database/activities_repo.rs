use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::database::search_filter::SearchFilter;
use crate::models::page::{self, Page};
use crate::models::ActivitiesRow;

const SQL_SELECT_ACTIVITIES: &str = r#"
SELECT
  alternate_key,
  activity,
  activity_type,
  participants,
  price,
  accessibility,
  link
FROM activities"#;

const SQL_COUNT_ACTIVITIES: &str = "SELECT COUNT(*) FROM activities";

pub async fn get_all(
    pool: &SqlitePool,
    search: Option<&SearchFilter>,
    page: u32,
    size: u32,
) -> sqlx::Result<Page<ActivitiesRow>> {
    let mut count_query = QueryBuilder::<Sqlite>::new(SQL_COUNT_ACTIVITIES);
    if let Some(search) = search {
        search.push_where(&mut count_query);
    }
    let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

    let mut select = QueryBuilder::<Sqlite>::new(SQL_SELECT_ACTIVITIES);
    if let Some(search) = search {
        search.push_where(&mut select);
    }
    select.push(" ORDER BY id ASC LIMIT ");
    select.push_bind(i64::from(size));
    select.push(" OFFSET ");
    select.push_bind(page::offset(page, size));

    let rows = select
        .build_query_as::<ActivitiesRow>()
        .fetch_all(pool)
        .await?;
    Ok(Page::new(rows, page, size, total.max(0) as u64))
}

const SQL_GET_BY_ALTERNATE_KEY: &str = r#"
SELECT
  alternate_key,
  activity,
  activity_type,
  participants,
  price,
  accessibility,
  link
FROM activities
WHERE alternate_key = ?1
LIMIT 1
"#;

pub async fn get_by(pool: &SqlitePool, alternate_key: &str) -> sqlx::Result<Option<ActivitiesRow>> {
    sqlx::query_as::<_, ActivitiesRow>(SQL_GET_BY_ALTERNATE_KEY)
        .bind(alternate_key)
        .fetch_optional(pool)
        .await
}

// Upsert on the alternate key. The internal id survives an update, so
// participants stay attached.
const SQL_SAVE_ACTIVITY: &str = r#"
INSERT INTO activities (
  alternate_key,
  activity,
  activity_type,
  participants,
  price,
  accessibility,
  link
) VALUES (?, ?, ?, ?, ?, ?, ?)
ON CONFLICT (alternate_key) DO UPDATE SET
  activity = excluded.activity,
  activity_type = excluded.activity_type,
  participants = excluded.participants,
  price = excluded.price,
  accessibility = excluded.accessibility,
  link = excluded.link
RETURNING
  alternate_key,
  activity,
  activity_type,
  participants,
  price,
  accessibility,
  link
"#;

pub async fn save(pool: &SqlitePool, record: &ActivitiesRow) -> sqlx::Result<ActivitiesRow> {
    sqlx::query_as::<_, ActivitiesRow>(SQL_SAVE_ACTIVITY)
        .bind(&record.alternate_key)
        .bind(&record.activity)
        .bind(&record.activity_type)
        .bind(record.participants)
        .bind(record.price)
        .bind(record.accessibility)
        .bind(record.link.as_deref())
        .fetch_one(pool)
        .await
}

const SQL_DELETE_ACTIVITY: &str = r#"
DELETE FROM activities
WHERE alternate_key = ?1
"#;

/// Returns the number of removed activities.
pub async fn delete(pool: &SqlitePool, alternate_key: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_ACTIVITY)
        .bind(alternate_key)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    fn record(key: &str, activity: &str, activity_type: &str) -> ActivitiesRow {
        ActivitiesRow {
            alternate_key: key.to_string(),
            activity: activity.to_string(),
            activity_type: activity_type.to_string(),
            participants: 2,
            price: 0.1,
            accessibility: 0.3,
            link: None,
        }
    }

    #[tokio::test]
    async fn save_then_get_by_alternate_key() {
        let pool = test_pool().await;
        let saved = save(&pool, &record("k1", "Go fishing", "recreational"))
            .await
            .unwrap();
        assert_eq!(saved.alternate_key, "k1");

        let found = get_by(&pool, "k1").await.unwrap();
        assert_eq!(found, Some(saved));
        assert_eq!(get_by(&pool, "missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_overwrites_existing_key() {
        let pool = test_pool().await;
        save(&pool, &record("k1", "Go fishing", "recreational"))
            .await
            .unwrap();
        save(&pool, &record("k1", "Bake bread", "cooking"))
            .await
            .unwrap();

        let page = get_all(&pool, None, 0, 10).await.unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].activity, "Bake bread");
    }

    #[tokio::test]
    async fn get_all_pages_and_filters() {
        let pool = test_pool().await;
        for i in 0..7 {
            let kind = if i % 2 == 0 { "music" } else { "social" };
            save(&pool, &record(&format!("k{}", i), &format!("Activity {}", i), kind))
                .await
                .unwrap();
        }

        let page = get_all(&pool, None, 1, 3).await.unwrap();
        assert_eq!(page.total_elements, 7);
        let keys: Vec<_> = page.content.iter().map(|r| r.alternate_key.as_str()).collect();
        assert_eq!(keys, vec!["k3", "k4", "k5"]);

        let filter: SearchFilter = "type==music".parse().unwrap();
        let page = get_all(&pool, Some(&filter), 0, 10).await.unwrap();
        assert_eq!(page.total_elements, 4);
        assert!(page.content.iter().all(|r| r.activity_type == "music"));

        let filter: SearchFilter = "activity==*6".parse().unwrap();
        let page = get_all(&pool, Some(&filter), 0, 10).await.unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].alternate_key, "k6");
    }

    #[tokio::test]
    async fn numeric_search_matches_integer_column() {
        let pool = test_pool().await;
        let mut solo = record("solo", "Read a book", "relaxation");
        solo.participants = 1;
        save(&pool, &solo).await.unwrap();
        save(&pool, &record("duo", "Play chess", "recreational"))
            .await
            .unwrap();

        let filter: SearchFilter = "participants==1".parse().unwrap();
        let page = get_all(&pool, Some(&filter), 0, 10).await.unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].alternate_key, "solo");
    }

    #[tokio::test]
    async fn delete_reports_affected_rows() {
        let pool = test_pool().await;
        save(&pool, &record("k1", "Go fishing", "recreational"))
            .await
            .unwrap();
        assert_eq!(delete(&pool, "k1").await.unwrap(), 1);
        assert_eq!(delete(&pool, "k1").await.unwrap(), 0);
    }
}
