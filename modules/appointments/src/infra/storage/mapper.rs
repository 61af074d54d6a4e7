use sea_orm::DbErr;

use crate::contract::model::{Appointment, AppointmentStatus};
use crate::infra::storage::entity::Model as AppointmentEntity;

/// Convert a database row to the contract model. An unknown status string
/// means a corrupt row and is surfaced as a database error.
pub fn entity_to_contract(entity: AppointmentEntity) -> Result<Appointment, DbErr> {
    let status = AppointmentStatus::parse(&entity.status).ok_or_else(|| {
        DbErr::Custom(format!(
            "unknown status '{}' for appointment {}",
            entity.status, entity.id
        ))
    })?;
    Ok(Appointment {
        id: entity.id,
        patient_id: entity.patient_id,
        doctor_id: entity.doctor_id,
        scheduled_at: entity.scheduled_at,
        appointment_type: entity.appointment_type,
        status,
        created_at: entity.created_at,
    })
}
