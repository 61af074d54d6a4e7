//! Appointment ledger: patient-initiated booking, role-filtered listing and
//! doctor-driven status transitions.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
