use accounts::contract::model::PublicProfile;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Lifecycle of an appointment. New bookings start as `Pending`; the doctor
/// can confirm or cancel, the patient can only cancel. `Cancelled` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(AppointmentStatus::Pending),
            "CONFIRMED" => Some(AppointmentStatus::Confirmed),
            "CANCELLED" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure appointment model (no serde).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub appointment_type: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Booking input. The patient identity comes from the authenticated caller,
/// never from here.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub appointment_type: String,
}

/// Appointment with the embedded public projections used in responses.
#[derive(Debug, Clone)]
pub struct AppointmentView {
    pub appointment: Appointment,
    /// Public profile of the doctor side, when the user still exists.
    pub doctor: Option<PublicProfile>,
    /// Display name of the patient side, when the user still exists.
    pub patient_name: Option<String>,
}
