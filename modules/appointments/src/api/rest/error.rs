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
        DomainError::PatientRoleRequired | DomainError::NotAParty | DomainError::PatientCannotConfirm => {
            from_parts(
                StatusCode::FORBIDDEN,
                "APPOINTMENTS_FORBIDDEN",
                "Forbidden",
                e.to_string(),
            )
        }
        DomainError::DoctorNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "APPOINTMENTS_DOCTOR_NOT_FOUND",
            "Doctor not found",
            format!("No user with id {}", id),
        ),
        DomainError::AppointmentNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "APPOINTMENTS_NOT_FOUND",
            "Appointment not found",
            format!("No appointment with id {}", id),
        ),
        DomainError::InvalidTransition { .. } | DomainError::EmptyType => from_parts(
            StatusCode::BAD_REQUEST,
            "APPOINTMENTS_VALIDATION",
            "Validation error",
            e.to_string(),
        ),
        DomainError::Database { .. } => {
            tracing::error!(error = ?e, "Internal appointments error");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "Internal error",
                "An internal error occurred",
            )
        }
    }
}
