//! Patient-owned document vault: upload broker (pre-signed PUT URLs),
//! metadata registry and per-doctor access grants.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
