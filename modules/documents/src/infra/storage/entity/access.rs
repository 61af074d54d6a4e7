use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "document_access")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub patient_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub doctor_id: Uuid,
    pub granted_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn exists<C: ConnectionTrait>(
    db: &C,
    patient_id: Uuid,
    doctor_id: Uuid,
) -> Result<bool, DbErr> {
    let count = Entity::find()
        .filter(Column::PatientId.eq(patient_id))
        .filter(Column::DoctorId.eq(doctor_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    patient_id: Uuid,
    doctor_id: Uuid,
    granted_at: DateTime<Utc>,
) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        patient_id: Set(patient_id),
        doctor_id: Set(doctor_id),
        granted_at: Set(granted_at),
    };

    active_model.insert(db).await
}
