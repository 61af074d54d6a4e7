use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Metadata record pointing at an object in external storage. The backend
/// never holds the file bytes themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicalDocument {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    /// Object key in external storage, unique across all patients.
    pub storage_key: String,
    pub file_size: i64,
    pub uploaded_at: DateTime<Utc>,
}

/// Client-reported metadata registered after a direct upload. The owner is
/// the authenticated caller.
#[derive(Debug, Clone)]
pub struct NewDocumentRecord {
    pub file_name: String,
    pub file_type: String,
    pub storage_key: String,
    pub file_size: i64,
}

/// A one-time upload authorization: the client PUTs the bytes to `url`
/// before it expires, then registers the metadata under `key`.
#[derive(Debug, Clone)]
pub struct UploadSlot {
    pub url: String,
    pub key: String,
    pub expires_in: std::time::Duration,
}
