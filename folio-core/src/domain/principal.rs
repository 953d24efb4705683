//! Principal, token claims and the administrators registry record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Provider-issued claims carried in a principal's session token.
///
/// `admin` distinguishes an absent claim (`None`) from an explicit `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
}

impl TokenClaims {
    pub fn admin() -> Self {
        Self { admin: Some(true) }
    }

    /// True only when the claim is present and set
    pub fn grants_admin(&self) -> bool {
        self.admin == Some(true)
    }
}

/// An authenticated identity recognized by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub claims: TokenClaims,
}

impl Principal {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            claims: TokenClaims::default(),
        }
    }

    pub fn with_claims(mut self, claims: TokenClaims) -> Self {
        self.claims = claims;
        self
    }
}

/// Stored sign-in credential for the local identity provider
#[derive(Debug, Clone, FromRow)]
pub struct Credential {
    pub uid: String,
    pub email: String,
    pub password_hash: String,
    #[sqlx(json)]
    pub custom_claims: TokenClaims,
    pub created_at: DateTime<Utc>,
}

/// Marker record in the administrators registry. Its existence, not its
/// contents, grants administrator status.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminRecord {
    pub uid: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
