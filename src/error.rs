//! Error types for Biblio server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Postgres SQLSTATE for unique constraint violations
const PG_UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign key violations
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
/// Postgres SQLSTATE for CHECK constraint violations
const PG_CHECK_VIOLATION: &str = "23514";
/// Postgres SQLSTATE for a number outside its column's precision
const PG_NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Machine-readable error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NotFound = 4,
    BadValue = 5,
    Duplicate = 6,
    InvalidReference = 7,
    BusinessRule = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    /// HTTP status, error code and client-facing message for this error
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::BusinessRule(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BusinessRule, msg.clone())
            }
            AppError::Database(e) => match constraint_violation(e) {
                Some((code, msg)) => (StatusCode::BAD_REQUEST, code, msg),
                None => {
                    tracing::error!("Database error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::DbFailure,
                        "Database error".to_string(),
                    )
                }
            },
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        }
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        self.parts().0
    }
}

/// Constraint and range violations that slipped past service checks are client errors
fn constraint_violation(e: &sqlx::Error) -> Option<(ErrorCode, String)> {
    match e {
        sqlx::Error::Database(db_err) => classify_sqlstate(
            db_err.code().as_deref(),
            db_err.constraint().unwrap_or("unknown"),
        ),
        _ => None,
    }
}

fn classify_sqlstate(code: Option<&str>, constraint: &str) -> Option<(ErrorCode, String)> {
    match code? {
        PG_UNIQUE_VIOLATION => Some((
            ErrorCode::Duplicate,
            format!("Value already exists ({})", constraint),
        )),
        PG_FOREIGN_KEY_VIOLATION => Some((
            ErrorCode::InvalidReference,
            format!("Referenced row missing or still in use ({})", constraint),
        )),
        PG_CHECK_VIOLATION => Some((
            ErrorCode::BadValue,
            format!("Value violates a data rule ({})", constraint),
        )),
        PG_NUMERIC_OUT_OF_RANGE => Some((ErrorCode::BadValue, "Numeric value out of range".to_string())),
        _ => None,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_errors_are_bad_requests() {
        assert_eq!(
            AppError::BusinessRule("email taken".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation("bad email".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::BadRequest("bad id".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_auth_and_missing_statuses() {
        assert_eq!(
            AppError::Authentication("no token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("member 3".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let (status, code, message) = AppError::Internal("secret stack".into()).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, ErrorCode::Failure);
        assert_eq!(message, "Internal server error");

        let (status, code, _) = AppError::Database(sqlx::Error::RowNotFound).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, ErrorCode::DbFailure);
    }

    #[test]
    fn test_sqlstate_classification() {
        let (code, message) = classify_sqlstate(Some("23505"), "members_email_key").unwrap();
        assert_eq!(code, ErrorCode::Duplicate);
        assert!(message.contains("members_email_key"));

        assert_eq!(
            classify_sqlstate(Some("23503"), "loans_copy_id_fkey").unwrap().0,
            ErrorCode::InvalidReference
        );
        assert_eq!(
            classify_sqlstate(Some("23514"), "penalties_check").unwrap().0,
            ErrorCode::BadValue
        );
        assert_eq!(
            classify_sqlstate(Some("22003"), "unknown").unwrap().0,
            ErrorCode::BadValue
        );
        assert!(classify_sqlstate(Some("40001"), "unknown").is_none());
        assert!(classify_sqlstate(None, "unknown").is_none());
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::NotFound("Author 9 not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 4);
        assert_eq!(body["error"], "NotFound");
        assert_eq!(body["message"], "Author 9 not found");
    }
}
