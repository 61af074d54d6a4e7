use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::AppointmentStatus;

/// Domain-specific errors for the appointment ledger.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Only patients can book appointments")]
    PatientRoleRequired,

    #[error("Doctor not found: {id}")]
    DoctorNotFound { id: Uuid },

    #[error("Appointment not found: {id}")]
    AppointmentNotFound { id: Uuid },

    #[error("Not a party to this appointment")]
    NotAParty,

    #[error("Patients can only cancel an appointment")]
    PatientCannotConfirm,

    #[error("Cannot change status from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Appointment type cannot be empty")]
    EmptyType,

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn doctor_not_found(id: Uuid) -> Self {
        Self::DoctorNotFound { id }
    }

    pub fn appointment_not_found(id: Uuid) -> Self {
        Self::AppointmentNotFound { id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
