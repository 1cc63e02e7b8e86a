#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ActivityParticipantsRow {
    pub alternate_key: String,
    pub activity_alternate_key: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
