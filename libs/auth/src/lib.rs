//! Token issuance and request authentication.
//!
//! The caller's identity is always an explicit `Identity` argument extracted
//! from the `Authorization` header, never ambient per-request state.

pub mod identity;
pub mod role;
pub mod token;

pub use identity::Identity;
pub use role::Role;
pub use token::{Claims, TokenKind, TokenPair, TokenService};
