use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use problem::{unauthorized, ProblemResponse};

use crate::role::Role;
use crate::token::{TokenKind, TokenService};

/// Authenticated caller, extracted from the `Authorization: Bearer` header.
///
/// Handlers that need the caller take this as an argument; the patient or
/// doctor id used by a handler always comes from here, never from the payload.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tokens = parts
            .extensions
            .get::<Arc<TokenService>>()
            .cloned()
            .ok_or_else(|| unauthorized("authentication is not configured"))?;

        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("missing bearer token"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("missing bearer token"))?;

        let claims = tokens
            .verify(token, TokenKind::Access)
            .map_err(|_| unauthorized("invalid or expired token"))?;

        Ok(Identity {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
