use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::error::ServiceError;

/// Maps every domain error kind to a status code and a plain-text body.
/// Storage failures are logged and answered without detail.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Validation(message)
            | ServiceError::ActivityNotFound(message)
            | ServiceError::InvalidParticipant(message) => {
                warn!(error = %message, "request rejected");
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            ServiceError::Database(e) => {
                error!(error = %e, "database failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ServiceError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn domain_errors_are_bad_requests_with_message() {
        for err in [
            ServiceError::Validation("price: must be between 0 and 1".to_string()),
            ServiceError::activity_not_found("k1"),
            ServiceError::InvalidParticipant("full".to_string()),
        ] {
            let expected = err.to_string();
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, expected);
        }
    }

    #[tokio::test]
    async fn database_errors_hide_details() {
        let (status, body) = render(ServiceError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "internal server error");
    }
}
