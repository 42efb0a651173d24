use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("You are not authorized as {0}")]
    RoleMismatch(String),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Security key is required for admin registration")]
    SecurityKeyRequired,

    #[error("Invalid or already used security key")]
    InvalidSecurityKey,

    #[error("Missing refresh token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::RoleMismatch(_) => StatusCode::FORBIDDEN,
            AppError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AppError::DuplicateUsername => StatusCode::BAD_REQUEST,
            AppError::SecurityKeyRequired => StatusCode::FORBIDDEN,
            AppError::InvalidSecurityKey => StatusCode::FORBIDDEN,
            AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_type = match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::RoleMismatch(_) => "ROLE_MISMATCH",
            AppError::DuplicateEmail => "DUPLICATE_EMAIL",
            AppError::DuplicateUsername => "DUPLICATE_USERNAME",
            AppError::SecurityKeyRequired => "SECURITY_KEY_REQUIRED",
            AppError::InvalidSecurityKey => "INVALID_SECURITY_KEY",
            AppError::MissingToken => "MISSING_TOKEN",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        };

        // Database details stay server-side; the body carries only the
        // generic message for 5xx responses.
        let message = match self {
            AppError::Database(_) => "Database error".to_string(),
            other => other.to_string(),
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

// Convert validator errors to AppError
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_err: jsonwebtoken::errors::Error) -> Self {
        AppError::InvalidToken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_map_to_expected_statuses() {
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::RoleMismatch("admin".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::SecurityKeyRequired.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::InvalidSecurityKey.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::UserNotFound.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_duplicate_errors_are_bad_request() {
        assert_eq!(
            AppError::DuplicateEmail.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::DuplicateUsername.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_resource_errors() {
        assert_eq!(
            AppError::NotFound("shoutout".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Forbidden("nope".into()).status_code(),
            StatusCode::FORBIDDEN
        );
    }
}
