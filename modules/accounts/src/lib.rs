//! Identity store: user accounts, profiles, registration, login and the
//! verified-doctor directory.

pub mod api;
pub mod contract;
pub mod domain;
pub mod gateways;
pub mod infra;
