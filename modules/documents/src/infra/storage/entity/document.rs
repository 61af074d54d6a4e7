use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "medical_documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub patient_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    #[sea_orm(unique)]
    pub storage_key: String,
    pub file_size: i64,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Data for creating a new document row.
pub struct NewDocumentEntity {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub storage_key: String,
    pub file_size: i64,
    pub uploaded_at: DateTime<Utc>,
}

pub async fn storage_key_exists<C: ConnectionTrait>(db: &C, key: &str) -> Result<bool, DbErr> {
    let count = Entity::find()
        .filter(Column::StorageKey.eq(key))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn list_by_patient<C: ConnectionTrait>(
    db: &C,
    patient_id: Uuid,
) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::PatientId.eq(patient_id))
        .order_by_asc(Column::UploadedAt)
        .all(db)
        .await
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewDocumentEntity) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(new.id),
        patient_id: Set(new.patient_id),
        file_name: Set(new.file_name),
        file_type: Set(new.file_type),
        storage_key: Set(new.storage_key),
        file_size: Set(new.file_size),
        uploaded_at: Set(new.uploaded_at),
    };

    active_model.insert(db).await
}
