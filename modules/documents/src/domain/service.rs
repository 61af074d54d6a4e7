use std::sync::Arc;
use std::time::Duration;

use accounts::contract::client::AccountsApi;
use auth::{Identity, Role};
use chrono::Utc;
use sea_orm::{DatabaseConnection, SqlErr};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{MedicalDocument, NewDocumentRecord, UploadSlot};
use crate::domain::error::DomainError;
use crate::domain::ports::DocumentStore;
use crate::infra::storage::{entity, mapper};

/// Configuration for the documents domain service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Lifetime of issued pre-signed upload URLs.
    pub upload_url_ttl: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            upload_url_ttl: Duration::from_secs(3600),
        }
    }
}

/// Domain service for the document vault and upload broker.
pub struct Service {
    db: DatabaseConnection,
    store: Arc<dyn DocumentStore>,
    accounts: Arc<dyn AccountsApi>,
    config: ServiceConfig,
}

impl Service {
    pub fn new(
        db: DatabaseConnection,
        store: Arc<dyn DocumentStore>,
        accounts: Arc<dyn AccountsApi>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            db,
            store,
            accounts,
            config,
        }
    }

    /// Issue a pre-signed upload URL scoped to the caller's own namespace.
    ///
    /// Nothing is persisted here; the key only becomes meaningful once the
    /// client registers the metadata record. Re-using a file name points at
    /// the same key and overwrites the object.
    #[instrument(
        name = "documents.service.request_upload",
        skip(self, actor),
        fields(patient_id = %actor.user_id, file_name = %file_name)
    )]
    pub async fn request_upload(
        &self,
        actor: Identity,
        file_name: &str,
        file_type: &str,
    ) -> Result<UploadSlot, DomainError> {
        if actor.role != Role::Patient {
            return Err(DomainError::PatientRoleRequired);
        }
        if file_name.trim().is_empty() || file_type.trim().is_empty() {
            return Err(DomainError::MissingFileMetadata);
        }

        let key = object_key(actor.user_id, file_name);
        let presigned = self
            .store
            .presign_put(&key, file_type, self.config.upload_url_ttl)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        debug!("Issued upload slot for key {}", key);
        Ok(UploadSlot {
            url: presigned.url,
            key,
            expires_in: self.config.upload_url_ttl,
        })
    }

    /// Register client-reported metadata after a direct upload. The object
    /// itself is not verified against storage; that trust gap is accepted at
    /// this layer.
    #[instrument(
        name = "documents.service.create_record",
        skip(self, actor, new),
        fields(patient_id = %actor.user_id, storage_key = %new.storage_key)
    )]
    pub async fn create_record(
        &self,
        actor: Identity,
        new: NewDocumentRecord,
    ) -> Result<MedicalDocument, DomainError> {
        if new.file_name.trim().is_empty() || new.file_type.trim().is_empty() {
            return Err(DomainError::MissingFileMetadata);
        }

        if entity::document::storage_key_exists(&self.db, &new.storage_key)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::storage_key_taken(new.storage_key));
        }

        let key = new.storage_key.clone();
        let row = entity::document::create(
            &self.db,
            entity::document::NewDocumentEntity {
                id: Uuid::new_v4(),
                patient_id: actor.user_id,
                file_name: new.file_name,
                file_type: new.file_type,
                storage_key: new.storage_key,
                file_size: new.file_size,
                uploaded_at: Utc::now(),
            },
        )
        .await
        .map_err(|e| match e.sql_err() {
            // Lost the race against a concurrent registration of the same key.
            Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::storage_key_taken(key),
            _ => DomainError::database(e.to_string()),
        })?;

        info!("Registered document {}", row.id);
        Ok(mapper::document_to_contract(row))
    }

    /// The caller's own documents, oldest first.
    #[instrument(name = "documents.service.list_own", skip(self, actor), fields(user_id = %actor.user_id))]
    pub async fn list_own(&self, actor: Identity) -> Result<Vec<MedicalDocument>, DomainError> {
        let rows = entity::document::list_by_patient(&self.db, actor.user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        Ok(rows.into_iter().map(mapper::document_to_contract).collect())
    }

    /// Grant a doctor access to the caller's documents. Idempotent: repeated
    /// grants for the same pair leave exactly one row.
    #[instrument(
        name = "documents.service.grant_access",
        skip(self, actor),
        fields(patient_id = %actor.user_id, doctor_id = %doctor_id)
    )]
    pub async fn grant_access(&self, actor: Identity, doctor_id: Uuid) -> Result<(), DomainError> {
        if actor.role != Role::Patient {
            return Err(DomainError::PatientRoleRequired);
        }

        let doctor = self
            .accounts
            .find_user(doctor_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        match doctor {
            Some(user) if user.role == Role::Doctor => {}
            _ => return Err(DomainError::doctor_not_found(doctor_id)),
        }

        if entity::access::exists(&self.db, actor.user_id, doctor_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Ok(());
        }

        match entity::access::create(&self.db, actor.user_id, doctor_id, Utc::now()).await {
            Ok(_) => {
                info!("Granted access");
                Ok(())
            }
            // A concurrent grant for the same pair already inserted the row.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(()),
            Err(e) => Err(DomainError::database(e.to_string())),
        }
    }

    /// A granted doctor's view of a patient's documents. Without a grant the
    /// caller learns nothing, not even whether the patient exists.
    #[instrument(
        name = "documents.service.list_for_doctor",
        skip(self, actor),
        fields(doctor_id = %actor.user_id, patient_id = %patient_id)
    )]
    pub async fn list_for_doctor(
        &self,
        actor: Identity,
        patient_id: Uuid,
    ) -> Result<Vec<MedicalDocument>, DomainError> {
        if actor.role != Role::Doctor {
            return Err(DomainError::DoctorRoleRequired);
        }

        let granted = entity::access::exists(&self.db, patient_id, actor.user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if !granted {
            return Err(DomainError::NoGrant);
        }

        let rows = entity::document::list_by_patient(&self.db, patient_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        Ok(rows.into_iter().map(mapper::document_to_contract).collect())
    }
}

/// Deterministic object key namespaced by the owner's user id.
fn object_key(user_id: Uuid, file_name: &str) -> String {
    format!("documents/{}/{}", user_id, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_is_namespaced_by_user() {
        let id = Uuid::new_v4();
        assert_eq!(
            object_key(id, "scan.pdf"),
            format!("documents/{}/scan.pdf", id)
        );
    }
}
