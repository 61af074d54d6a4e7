use accounts::contract::model::PublicProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{AppointmentView, NewAppointment};

/// REST DTO for booking. The patient side is taken from the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentReq {
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub appointment_type: String,
}

/// REST DTO for a status transition ("CONFIRMED" / "CANCELLED").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusReq {
    pub status: String,
}

/// Public projection of the counterparty embedded in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterpartyDto {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub specialty: Option<String>,
    pub clinic_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDto {
    pub id: Uuid,
    pub doctor: Option<CounterpartyDto>,
    pub patient_name: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub appointment_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<BookAppointmentReq> for NewAppointment {
    fn from(req: BookAppointmentReq) -> Self {
        Self {
            doctor_id: req.doctor_id,
            scheduled_at: req.scheduled_at,
            appointment_type: req.appointment_type,
        }
    }
}

impl From<PublicProfile> for CounterpartyDto {
    fn from(p: PublicProfile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            full_name: p.full_name,
            specialty: p.specialty,
            clinic_address: p.clinic_address,
        }
    }
}

impl From<AppointmentView> for AppointmentDto {
    fn from(view: AppointmentView) -> Self {
        Self {
            id: view.appointment.id,
            doctor: view.doctor.map(CounterpartyDto::from),
            patient_name: view.patient_name,
            scheduled_at: view.appointment.scheduled_at,
            appointment_type: view.appointment.appointment_type,
            status: view.appointment.status.as_str().to_string(),
            created_at: view.appointment.created_at,
        }
    }
}
