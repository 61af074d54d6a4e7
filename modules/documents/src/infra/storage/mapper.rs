use crate::contract::model::MedicalDocument;
use crate::infra::storage::entity::document;

pub fn document_to_contract(entity: document::Model) -> MedicalDocument {
    MedicalDocument {
        id: entity.id,
        patient_id: entity.patient_id,
        file_name: entity.file_name,
        file_type: entity.file_type,
        storage_key: entity.storage_key,
        file_size: entity.file_size,
        uploaded_at: entity.uploaded_at,
    }
}
