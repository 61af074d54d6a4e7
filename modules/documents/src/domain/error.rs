use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors for the document vault.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Only patients can upload documents")]
    PatientRoleRequired,

    #[error("Only doctors can view a patient's documents")]
    DoctorRoleRequired,

    #[error("file_name and file_type are required")]
    MissingFileMetadata,

    #[error("Storage key '{key}' is already registered")]
    StorageKeyTaken { key: String },

    #[error("Doctor not found: {id}")]
    DoctorNotFound { id: Uuid },

    #[error("No access grant for this patient")]
    NoGrant,

    #[error("Storage provider error: {message}")]
    Storage { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn storage_key_taken(key: impl Into<String>) -> Self {
        Self::StorageKeyTaken { key: key.into() }
    }

    pub fn doctor_not_found(id: Uuid) -> Self {
        Self::DoctorNotFound { id }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
