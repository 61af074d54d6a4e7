use auth::{Role, TokenPair};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{AccountView, NewAccount, NewProfile, PublicProfile};

/// REST DTO for registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterReq {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub profile: ProfileReq,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileReq {
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub medical_license_number: Option<String>,
    #[serde(default)]
    pub clinic_address: Option<String>,
}

/// Account representation returned to the owner. Never carries the password
/// or its hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDto {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
    pub profile: ProfileDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDto {
    pub full_name: String,
    pub phone_number: String,
    pub specialty: Option<String>,
    pub medical_license_number: Option<String>,
    pub is_verified: bool,
    pub clinic_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshReq {
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairDto {
    pub access: String,
    pub refresh: String,
}

/// Public doctor entry in the directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorDto {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub specialty: Option<String>,
    pub clinic_address: Option<String>,
}

// Conversions between REST DTOs and contract models.

impl From<RegisterReq> for NewAccount {
    fn from(req: RegisterReq) -> Self {
        Self {
            email: req.email,
            password: req.password,
            role: req.role,
            profile: NewProfile {
                full_name: req.profile.full_name,
                phone_number: req.profile.phone_number,
                specialty: req.profile.specialty,
                medical_license_number: req.profile.medical_license_number,
                clinic_address: req.profile.clinic_address,
            },
        }
    }
}

impl From<AccountView> for AccountDto {
    fn from(view: AccountView) -> Self {
        Self {
            id: view.user.id,
            email: view.user.email,
            role: view.user.role,
            joined_at: view.user.joined_at,
            profile: ProfileDto {
                full_name: view.profile.full_name,
                phone_number: view.profile.phone_number,
                specialty: view.profile.specialty,
                medical_license_number: view.profile.medical_license_number,
                is_verified: view.profile.is_verified,
                clinic_address: view.profile.clinic_address,
            },
        }
    }
}

impl From<TokenPair> for TokenPairDto {
    fn from(pair: TokenPair) -> Self {
        Self {
            access: pair.access,
            refresh: pair.refresh,
        }
    }
}

impl From<PublicProfile> for DoctorDto {
    fn from(p: PublicProfile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            full_name: p.full_name,
            specialty: p.specialty,
            clinic_address: p.clinic_address,
        }
    }
}
