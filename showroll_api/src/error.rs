use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::json;
use thiserror::Error;

use crate::models::RatingError;

const VALIDATION_MESSAGE: &str = "400: Validation error.";
const INTERNAL_MESSAGE: &str = "500: Internal server error.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("404: {0} not found")]
    NotFound(&'static str),
    #[error("400: Validation error.")]
    Validation,
    #[error("database error: {0}")]
    Database(#[from] DieselError),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<RatingError> for ApiError {
    fn from(_: RatingError) -> Self {
        Self::Validation
    }
}

impl ApiError {
    /// Constraint violations raised by the store are validation failures
    /// that slipped past the handler checks.
    fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation
                | Self::Database(DieselError::DatabaseError(
                    DatabaseErrorKind::CheckViolation
                        | DatabaseErrorKind::ForeignKeyViolation
                        | DatabaseErrorKind::NotNullViolation,
                    _,
                ))
        )
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            _ if self.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match status {
            StatusCode::NOT_FOUND => self.to_string(),
            StatusCode::BAD_REQUEST => {
                tracing::warn!("rejected request: {self}");
                VALIDATION_MESSAGE.to_string()
            }
            _ => {
                tracing::error!("request failed: {self}");
                INTERNAL_MESSAGE.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let (status, body) = body_json(ApiError::NotFound("Episode")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "404: Episode not found" }));
    }

    #[tokio::test]
    async fn test_validation_response() {
        let (status, body) = body_json(ApiError::Validation).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "400: Validation error." }));
    }

    #[tokio::test]
    async fn test_rating_error_is_validation() {
        let (status, _) = body_json(RatingError(9).into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_constraint_violation_is_validation() {
        let error = ApiError::Database(DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation,
            Box::new("CHECK constraint failed: ck_appearances_rating".to_string()),
        ));
        let (status, body) = body_json(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "400: Validation error." }));
    }

    #[tokio::test]
    async fn test_internal_failure_is_not_leaked() {
        let (status, body) =
            body_json(ApiError::Database(DieselError::RollbackTransaction)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "500: Internal server error." }));
    }
}
