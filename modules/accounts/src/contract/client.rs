use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::{PublicProfile, User};

/// Public API of the accounts module that other modules can use.
///
/// The appointment and document modules resolve referenced users through this
/// trait rather than reaching into the accounts tables.
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// Load a user by id. `None` when absent.
    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    /// Public projection of a user (counterparty embeds in responses).
    /// `None` when the id does not resolve to a user.
    async fn public_profile(&self, id: Uuid) -> anyhow::Result<Option<PublicProfile>>;
}
