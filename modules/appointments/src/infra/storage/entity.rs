use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub appointment_type: String,
    /// Wire form of the status enum ("PENDING" / "CONFIRMED" / "CANCELLED").
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Data for creating a new appointment row.
pub struct NewAppointmentEntity {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub appointment_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(db).await
}

pub async fn list_by_patient<C: ConnectionTrait>(
    db: &C,
    patient_id: Uuid,
) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::PatientId.eq(patient_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
}

pub async fn list_by_doctor<C: ConnectionTrait>(
    db: &C,
    doctor_id: Uuid,
) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::DoctorId.eq(doctor_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    new: NewAppointmentEntity,
) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(new.id),
        patient_id: Set(new.patient_id),
        doctor_id: Set(new.doctor_id),
        scheduled_at: Set(new.scheduled_at),
        appointment_type: Set(new.appointment_type),
        status: Set(new.status),
        created_at: Set(new.created_at),
    };

    active_model.insert(db).await
}

pub async fn update_status<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    status: &str,
) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(id),
        status: Set(status.to_string()),
        ..Default::default()
    };

    active_model.update(db).await
}
