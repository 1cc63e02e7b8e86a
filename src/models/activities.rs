// Stored form of an activity. Never leaves the repository/mapper boundary.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ActivitiesRow {
    pub alternate_key: String,
    pub activity: String,
    pub activity_type: String,
    pub participants: i64,
    pub price: f64,
    pub accessibility: f64,
    pub link: Option<String>,
}
