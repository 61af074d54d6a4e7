use axum::http::StatusCode;
use problem::{Problem, ProblemResponse};

use crate::domain::error::DomainError;

fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
) -> ProblemResponse {
    ProblemResponse(Problem::new(status, title, detail).with_code(code))
}

/// Map domain errors to RFC 9457 problem responses.
pub fn map_domain_error(e: &DomainError) -> ProblemResponse {
    match e {
        DomainError::UserNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "ACCOUNTS_NOT_FOUND",
            "User not found",
            format!("User with id {} was not found", id),
        ),
        // Duplicate email surfaces as a validation failure, same as other
        // malformed registration input.
        DomainError::EmailAlreadyExists { email } => from_parts(
            StatusCode::BAD_REQUEST,
            "ACCOUNTS_EMAIL_TAKEN",
            "Validation error",
            format!("Email '{}' is already registered", email),
        ),
        DomainError::InvalidEmail { .. }
        | DomainError::PasswordTooShort { .. }
        | DomainError::EmptyFullName => from_parts(
            StatusCode::BAD_REQUEST,
            "ACCOUNTS_VALIDATION",
            "Validation error",
            e.to_string(),
        ),
        // One uniform body whether the email was unknown or the password
        // wrong.
        DomainError::InvalidCredentials => from_parts(
            StatusCode::UNAUTHORIZED,
            "ACCOUNTS_AUTH_FAILED",
            "Authentication failed",
            "Authentication failed",
        ),
        DomainError::PasswordHash | DomainError::TokenIssue | DomainError::Database { .. } => {
            tracing::error!(error = ?e, "Internal accounts error");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "Internal error",
                "An internal error occurred",
            )
        }
    }
}
