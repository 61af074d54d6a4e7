use std::sync::Arc;

use auth::{TokenKind, TokenPair, TokenService};
use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{AccountView, NewAccount, PublicProfile, User};
use crate::domain::error::DomainError;
use crate::infra::password;
use crate::infra::storage::{self, entity, mapper};

/// Configuration for the accounts domain service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub min_password_len: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_password_len: 8,
        }
    }
}

/// Domain service with the business rules for account management.
pub struct Service {
    db: DatabaseConnection,
    tokens: Arc<TokenService>,
    config: ServiceConfig,
}

impl Service {
    pub fn new(db: DatabaseConnection, tokens: Arc<TokenService>, config: ServiceConfig) -> Self {
        Self { db, tokens, config }
    }

    /// Create a user and its profile atomically in one transaction.
    #[instrument(
        name = "accounts.service.register",
        skip(self, new_account),
        fields(email = %new_account.email, role = %new_account.role)
    )]
    pub async fn register(&self, new_account: NewAccount) -> Result<AccountView, DomainError> {
        info!("Registering new account");

        self.validate_new_account(&new_account)?;

        if entity::user::email_exists(&self.db, &new_account.email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::email_already_exists(new_account.email));
        }

        let password_hash =
            password::hash(&new_account.password).map_err(|_| DomainError::PasswordHash)?;
        let id = Uuid::new_v4();
        let now = Utc::now();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        let user_row = entity::user::create(
            &txn,
            entity::user::NewUserEntity {
                id,
                email: new_account.email,
                password_hash,
                role: new_account.role.as_str().to_string(),
                joined_at: now,
            },
        )
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        let profile_row = entity::profile::create(
            &txn,
            entity::profile::NewProfileEntity {
                user_id: id,
                full_name: new_account.profile.full_name,
                phone_number: new_account.profile.phone_number,
                specialty: new_account.profile.specialty,
                medical_license_number: new_account.profile.medical_license_number,
                clinic_address: new_account.profile.clinic_address,
            },
        )
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Registered account with id={}", id);
        mapper::account_to_contract(user_row, profile_row)
            .map_err(|e| DomainError::database(e.to_string()))
    }

    /// Verify credentials and issue a token pair.
    ///
    /// Unknown email, wrong password and deactivated accounts all collapse
    /// into the same `InvalidCredentials` error.
    #[instrument(name = "accounts.service.login", skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, TokenPair), DomainError> {
        debug!("Authenticating");

        let Some(row) = entity::user::find_by_email(&self.db, email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        else {
            return Err(DomainError::InvalidCredentials);
        };

        if !password::verify(password, &row.password_hash) || !row.is_active {
            return Err(DomainError::InvalidCredentials);
        }

        let user =
            mapper::user_to_contract(row).map_err(|e| DomainError::database(e.to_string()))?;
        let pair = self
            .tokens
            .issue_pair(user.id, user.role)
            .map_err(|_| DomainError::TokenIssue)?;

        info!("Issued token pair for user {}", user.id);
        Ok((user, pair))
    }

    /// Exchange a valid refresh token for a fresh pair. The account must
    /// still exist and be active.
    #[instrument(name = "accounts.service.refresh", skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self
            .tokens
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|_| DomainError::InvalidCredentials)?;

        let Some(row) = entity::user::find_by_id(&self.db, claims.sub)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        else {
            return Err(DomainError::InvalidCredentials);
        };
        if !row.is_active {
            return Err(DomainError::InvalidCredentials);
        }

        let user =
            mapper::user_to_contract(row).map_err(|e| DomainError::database(e.to_string()))?;
        self.tokens
            .issue_pair(user.id, user.role)
            .map_err(|_| DomainError::TokenIssue)
    }

    /// Caller's own user + profile, loaded as one joined projection.
    #[instrument(name = "accounts.service.get_account", skip(self), fields(user_id = %id))]
    pub async fn get_account(&self, id: Uuid) -> Result<AccountView, DomainError> {
        let (user_row, profile_row) = storage::find_account(&self.db, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        mapper::account_to_contract(user_row, profile_row)
            .map_err(|e| DomainError::database(e.to_string()))
    }

    /// Directory of doctors visible to patients: role Doctor and verified.
    #[instrument(name = "accounts.service.list_verified_doctors", skip(self))]
    pub async fn list_verified_doctors(&self) -> Result<Vec<PublicProfile>, DomainError> {
        let rows = storage::list_verified_doctors(&self.db)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|(u, p)| mapper::public_profile(u, p))
            .collect())
    }

    pub async fn find_user(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let Some(row) = entity::user::find_by_id(&self.db, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        else {
            return Ok(None);
        };
        mapper::user_to_contract(row)
            .map(Some)
            .map_err(|e| DomainError::database(e.to_string()))
    }

    pub async fn public_profile(&self, id: Uuid) -> Result<Option<PublicProfile>, DomainError> {
        let Some((u, p)) = storage::find_account(&self.db, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        else {
            return Ok(None);
        };
        Ok(Some(mapper::public_profile(&u, &p)))
    }

    /// Operator-side action; doctors are invisible in the directory until
    /// verified.
    pub async fn verify_doctor(&self, id: Uuid) -> Result<(), DomainError> {
        let updated = entity::profile::set_verified(&self.db, id, true)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if !updated {
            return Err(DomainError::user_not_found(id));
        }
        Ok(())
    }

    fn validate_new_account(&self, new_account: &NewAccount) -> Result<(), DomainError> {
        let email = new_account.email.trim();
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid {
            return Err(DomainError::invalid_email(new_account.email.clone()));
        }
        if new_account.password.len() < self.config.min_password_len {
            return Err(DomainError::PasswordTooShort {
                min: self.config.min_password_len,
            });
        }
        if new_account.profile.full_name.trim().is_empty() {
            return Err(DomainError::EmptyFullName);
        }
        Ok(())
    }
}
