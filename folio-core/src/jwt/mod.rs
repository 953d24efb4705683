//! Session token handling

use crate::config::JwtConfig;
use crate::domain::{Principal, TokenClaims};
use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const AUDIENCE: &str = "folio";
const TOKEN_TYPE_IDENTITY: &str = "identity";

/// Identity token claims, minted at sign-in and on every forced refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject (principal identifier)
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    /// Token type discriminator (prevents token confusion attacks)
    #[serde(default)]
    pub token_type: String,
    /// Custom claims set out-of-band by a privileged process
    #[serde(flatten)]
    pub custom: TokenClaims,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl IdentityClaims {
    pub fn principal(&self) -> Principal {
        Principal::new(&self.sub, &self.email).with_claims(self.custom)
    }
}

/// JWT token manager
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create a Validation with a strict leeway (5 seconds) instead of the default 60 seconds.
    fn strict_validation(&self) -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        v.leeway = 5;
        v.set_audience(&[AUDIENCE]);
        v.set_issuer(&[&self.config.issuer]);
        v
    }

    /// Create an identity token embedding the principal's current custom claims
    pub fn create_identity_token(&self, principal: &Principal) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.access_token_ttl_secs);

        let claims = IdentityClaims {
            sub: principal.uid.clone(),
            email: principal.email.clone(),
            iss: self.config.issuer.clone(),
            aud: AUDIENCE.to_string(),
            token_type: TOKEN_TYPE_IDENTITY.to_string(),
            custom: principal.claims,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key).map_err(|e| AppError::Internal(e.into()))
    }

    /// Verify and decode an identity token
    pub fn verify_identity_token(&self, token: &str) -> Result<IdentityClaims> {
        let token_data = decode::<IdentityClaims>(token, &self.decoding_key, &self.strict_validation())?;
        if token_data.claims.token_type != TOKEN_TYPE_IDENTITY {
            return Err(AppError::Unauthorized("Unexpected token type".to_string()));
        }
        Ok(token_data.claims)
    }

    pub fn access_token_ttl(&self) -> i64 {
        self.config.access_token_ttl_secs
    }
}
