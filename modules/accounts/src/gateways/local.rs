use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::AccountsApi,
    error::AccountsError,
    model::{PublicProfile, User},
};
use crate::domain::{error::DomainError, service::Service};

/// In-process implementation of `AccountsApi` that delegates to the domain
/// service.
pub struct AccountsLocalClient {
    service: Arc<Service>,
}

impl AccountsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AccountsApi for AccountsLocalClient {
    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        self.service
            .find_user(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn public_profile(&self, id: Uuid) -> anyhow::Result<Option<PublicProfile>> {
        self.service
            .public_profile(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }
}

/// Map domain errors to contract errors wrapped in anyhow.
fn map_domain_error_to_anyhow(domain_error: DomainError) -> anyhow::Error {
    let contract_error = match domain_error {
        DomainError::UserNotFound { id } => AccountsError::not_found(id),
        _ => AccountsError::internal(),
    };
    anyhow::Error::new(contract_error)
}
