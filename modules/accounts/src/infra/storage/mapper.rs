use auth::Role;
use sea_orm::DbErr;

use crate::contract::model::{AccountView, Profile, PublicProfile, User};
use crate::infra::storage::entity::{profile, user};

/// Convert a user row to the contract model. A role string outside the
/// closed enum means a corrupt row and is surfaced as a database error.
pub fn user_to_contract(entity: user::Model) -> Result<User, DbErr> {
    let role = Role::parse(&entity.role)
        .ok_or_else(|| DbErr::Custom(format!("unknown role '{}' for user {}", entity.role, entity.id)))?;
    Ok(User {
        id: entity.id,
        email: entity.email,
        role,
        is_active: entity.is_active,
        is_staff: entity.is_staff,
        joined_at: entity.joined_at,
    })
}

pub fn profile_to_contract(entity: profile::Model) -> Profile {
    Profile {
        user_id: entity.user_id,
        full_name: entity.full_name,
        phone_number: entity.phone_number,
        specialty: entity.specialty,
        medical_license_number: entity.medical_license_number,
        is_verified: entity.is_verified,
        clinic_address: entity.clinic_address,
    }
}

pub fn account_to_contract(
    user: user::Model,
    profile: profile::Model,
) -> Result<AccountView, DbErr> {
    Ok(AccountView {
        user: user_to_contract(user)?,
        profile: profile_to_contract(profile),
    })
}

pub fn public_profile(user: &user::Model, profile: &profile::Model) -> PublicProfile {
    PublicProfile {
        id: user.id,
        email: user.email.clone(),
        full_name: profile.full_name.clone(),
        specialty: profile.specialty.clone(),
        clinic_address: profile.clinic_address.clone(),
    }
}
