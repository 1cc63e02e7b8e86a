use thiserror::Error;

/// Errors raised by the service layer.
///
/// Absence of a single activity or participant is not an error; lookups
/// return `Option` and deletes return `bool`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    ActivityNotFound(String),
    #[error("{0}")]
    InvalidParticipant(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn activity_not_found(alternate_key: &str) -> Self {
        Self::ActivityNotFound(format!(
            "Activity with alternate key {} not found",
            alternate_key
        ))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
