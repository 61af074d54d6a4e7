use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors for account management.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: Uuid },

    #[error("User with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("Password too short: minimum {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Full name cannot be empty")]
    EmptyFullName,

    /// One uniform variant for unknown email, wrong password and revoked
    /// accounts, so the response never reveals which one it was.
    #[error("Authentication failed")]
    InvalidCredentials,

    #[error("Failed to hash password")]
    PasswordHash,

    #[error("Failed to issue tokens")]
    TokenIssue,

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn email_already_exists(email: String) -> Self {
        Self::EmailAlreadyExists { email }
    }

    pub fn invalid_email(email: String) -> Self {
        Self::InvalidEmail { email }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
