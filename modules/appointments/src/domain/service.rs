use std::sync::Arc;

use accounts::contract::client::AccountsApi;
use auth::{Identity, Role};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::contract::model::{
    Appointment, AppointmentStatus, AppointmentView, NewAppointment,
};
use crate::domain::error::DomainError;
use crate::infra::storage::{entity, mapper};

/// Domain service for the appointment ledger. Resolves referenced users
/// through the accounts contract instead of touching its tables.
pub struct Service {
    db: DatabaseConnection,
    accounts: Arc<dyn AccountsApi>,
}

impl Service {
    pub fn new(db: DatabaseConnection, accounts: Arc<dyn AccountsApi>) -> Self {
        Self { db, accounts }
    }

    /// Book an appointment. Patient-role callers only; the patient side is
    /// always the caller. The doctor id must resolve to an existing user,
    /// but its role is not checked at booking time.
    #[instrument(
        name = "appointments.service.book",
        skip(self, actor, new),
        fields(patient_id = %actor.user_id, doctor_id = %new.doctor_id)
    )]
    pub async fn book(
        &self,
        actor: Identity,
        new: NewAppointment,
    ) -> Result<AppointmentView, DomainError> {
        if actor.role != Role::Patient {
            return Err(DomainError::PatientRoleRequired);
        }
        if new.appointment_type.trim().is_empty() {
            return Err(DomainError::EmptyType);
        }

        let doctor_exists = self
            .accounts
            .find_user(new.doctor_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .is_some();
        if !doctor_exists {
            return Err(DomainError::doctor_not_found(new.doctor_id));
        }

        let row = entity::create(
            &self.db,
            entity::NewAppointmentEntity {
                id: Uuid::new_v4(),
                patient_id: actor.user_id,
                doctor_id: new.doctor_id,
                scheduled_at: new.scheduled_at,
                appointment_type: new.appointment_type,
                status: AppointmentStatus::Pending.as_str().to_string(),
                created_at: Utc::now(),
            },
        )
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        let appointment =
            mapper::entity_to_contract(row).map_err(|e| DomainError::database(e.to_string()))?;
        info!("Booked appointment {}", appointment.id);
        self.into_view(appointment).await
    }

    /// Role-filtered listing: patients see appointments where they are the
    /// patient, doctors where they are the doctor.
    #[instrument(name = "appointments.service.list_for", skip(self, actor), fields(user_id = %actor.user_id))]
    pub async fn list_for(&self, actor: Identity) -> Result<Vec<AppointmentView>, DomainError> {
        let rows = match actor.role {
            Role::Patient => entity::list_by_patient(&self.db, actor.user_id).await,
            Role::Doctor => entity::list_by_doctor(&self.db, actor.user_id).await,
        }
        .map_err(|e| DomainError::database(e.to_string()))?;

        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            let appointment = mapper::entity_to_contract(row)
                .map_err(|e| DomainError::database(e.to_string()))?;
            views.push(self.into_view(appointment).await?);
        }
        Ok(views)
    }

    /// Status transition. The doctor side may confirm or cancel, the patient
    /// side may only cancel, and a cancelled appointment is terminal.
    #[instrument(
        name = "appointments.service.set_status",
        skip(self, actor),
        fields(appointment_id = %id, target = %target)
    )]
    pub async fn set_status(
        &self,
        actor: Identity,
        id: Uuid,
        target: AppointmentStatus,
    ) -> Result<AppointmentView, DomainError> {
        let row = entity::find_by_id(&self.db, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::appointment_not_found(id))?;
        let current = mapper::entity_to_contract(row)
            .map_err(|e| DomainError::database(e.to_string()))?;

        if actor.user_id == current.doctor_id {
            // Doctor side may set either terminal-bound state.
        } else if actor.user_id == current.patient_id {
            if target != AppointmentStatus::Cancelled {
                return Err(DomainError::PatientCannotConfirm);
            }
        } else {
            return Err(DomainError::NotAParty);
        }

        if target == AppointmentStatus::Pending || current.status == AppointmentStatus::Cancelled {
            return Err(DomainError::InvalidTransition {
                from: current.status,
                to: target,
            });
        }

        let updated = entity::update_status(&self.db, id, target.as_str())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        let appointment = mapper::entity_to_contract(updated)
            .map_err(|e| DomainError::database(e.to_string()))?;
        info!("Appointment {} is now {}", id, target);
        self.into_view(appointment).await
    }

    /// Attach the counterparty projections. A side whose user has since been
    /// removed renders as `None` rather than failing the whole listing.
    async fn into_view(&self, appointment: Appointment) -> Result<AppointmentView, DomainError> {
        let doctor = self
            .accounts
            .public_profile(appointment.doctor_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        let patient_name = self
            .accounts
            .public_profile(appointment.patient_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .map(|p| p.full_name);

        Ok(AppointmentView {
            appointment,
            doctor,
            patient_name,
        })
    }
}
