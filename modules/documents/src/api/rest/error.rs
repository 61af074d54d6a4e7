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
        DomainError::PatientRoleRequired
        | DomainError::DoctorRoleRequired
        | DomainError::NoGrant => from_parts(
            StatusCode::FORBIDDEN,
            "DOCUMENTS_FORBIDDEN",
            "Forbidden",
            e.to_string(),
        ),
        DomainError::MissingFileMetadata => from_parts(
            StatusCode::BAD_REQUEST,
            "DOCUMENTS_VALIDATION",
            "Validation error",
            e.to_string(),
        ),
        DomainError::StorageKeyTaken { key } => from_parts(
            StatusCode::CONFLICT,
            "DOCUMENTS_KEY_CONFLICT",
            "Storage key conflict",
            format!("Storage key '{}' is already registered", key),
        ),
        DomainError::DoctorNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "DOCUMENTS_DOCTOR_NOT_FOUND",
            "Doctor not found",
            format!("No doctor with id {}", id),
        ),
        DomainError::Storage { .. } => {
            tracing::error!(error = ?e, "Storage provider error");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DOCUMENTS_STORAGE",
                "Storage error",
                "Could not generate upload URL",
            )
        }
        DomainError::Database { .. } => {
            tracing::error!(error = ?e, "Internal documents error");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "Internal error",
                "An internal error occurred",
            )
        }
    }
}
