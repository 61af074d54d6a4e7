use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{MedicalDocument, NewDocumentRecord, UploadSlot};

/// REST DTO for requesting an upload slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequestReq {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_type: String,
}

/// Pre-signed upload authorization returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSlotDto {
    pub presigned_url: String,
    pub storage_key: String,
    pub expires_in_secs: u64,
}

/// REST DTO for registering an uploaded document's metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordReq {
    pub file_name: String,
    pub file_type: String,
    pub storage_key: String,
    pub file_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDto {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub storage_key: String,
    pub file_size: i64,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantAccessReq {
    pub doctor_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantAccessResp {
    pub status: String,
}

impl From<CreateRecordReq> for NewDocumentRecord {
    fn from(req: CreateRecordReq) -> Self {
        Self {
            file_name: req.file_name,
            file_type: req.file_type,
            storage_key: req.storage_key,
            file_size: req.file_size,
        }
    }
}

impl From<UploadSlot> for UploadSlotDto {
    fn from(slot: UploadSlot) -> Self {
        Self {
            presigned_url: slot.url,
            storage_key: slot.key,
            expires_in_secs: slot.expires_in.as_secs(),
        }
    }
}

impl From<MedicalDocument> for DocumentDto {
    fn from(doc: MedicalDocument) -> Self {
        Self {
            id: doc.id,
            patient_id: doc.patient_id,
            file_name: doc.file_name,
            file_type: doc.file_type,
            storage_key: doc.storage_key,
            file_size: doc.file_size,
            uploaded_at: doc.uploaded_at,
        }
    }
}
