use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::role::Role;

/// Distinguishes the short-lived access token from the long-lived refresh
/// token. A refresh token is never accepted where an access token is expected
/// and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Signed claims carried by both token kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: Uuid,
    pub role: Role,
    pub typ: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// Access + refresh pair returned by login and refresh.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("invalid or expired token")]
    Invalid,
    #[error("wrong token kind")]
    WrongKind,
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Issues and verifies HS256-signed token pairs.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], access_ttl: std::time::Duration, refresh_ttl: std::time::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_ttl: Duration::from_std(access_ttl).unwrap_or_else(|_| Duration::minutes(15)),
            refresh_ttl: Duration::from_std(refresh_ttl).unwrap_or_else(|_| Duration::days(7)),
        }
    }

    pub fn issue_pair(&self, user_id: Uuid, role: Role) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access: self.issue(user_id, role, TokenKind::Access, self.access_ttl)?,
            refresh: self.issue(user_id, role, TokenKind::Refresh, self.refresh_ttl)?,
        })
    }

    fn issue(
        &self,
        user_id: Uuid,
        role: Role,
        typ: TokenKind,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role,
            typ,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Decode, verify the signature and expiry, and check the token kind.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| TokenError::Invalid)?;
        if data.claims.typ != expected {
            return Err(TokenError::WrongKind);
        }
        Ok(data.claims)
    }
}
