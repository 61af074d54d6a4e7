use auth::Role;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Pure account model for inter-module communication (no serde).
/// The password hash never leaves the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub is_staff: bool,
    pub joined_at: DateTime<Utc>,
}

/// Profile attached one-to-one to a user. Doctor-only fields stay `None`
/// for patients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub specialty: Option<String>,
    pub medical_license_number: Option<String>,
    pub is_verified: bool,
    pub clinic_address: Option<String>,
}

/// Joined user + profile projection, loaded in one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountView {
    pub user: User,
    pub profile: Profile,
}

/// Data for registering a new account. User and profile rows are created
/// atomically.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub profile: NewProfile,
}

#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub full_name: String,
    pub phone_number: String,
    pub specialty: Option<String>,
    pub medical_license_number: Option<String>,
    pub clinic_address: Option<String>,
}

/// Public projection of a user, safe to embed in responses seen by other
/// users: the doctor directory and appointment counterparties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub specialty: Option<String>,
    pub clinic_address: Option<String>,
}
