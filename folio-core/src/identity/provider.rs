//! Identity provider: credentials, token minting and custom claims

use crate::domain::{Credential, Principal, TokenClaims};
use crate::error::{AppError, Result};
use crate::jwt::JwtManager;
use crate::repository::CredentialRepository;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use validator::Validate;

/// Verified in place of a real hash when the email is unknown, so both
/// failure paths cost one argon2 verification.
static UNKNOWN_ACCOUNT_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("folio-unknown-account").ok());

/// Email/password pair accepted by sign-up and sign-in
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Result of a successful sign-in
#[derive(Debug, Clone, Serialize)]
pub struct SignedSession {
    pub principal: Principal,
    pub token: String,
    pub expires_in: i64,
}

/// A freshly minted token together with the claims it carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshedToken {
    pub token: String,
    pub claims: TokenClaims,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a principal with email/password credentials
    async fn sign_up(&self, email: &str, password: &str) -> Result<Principal>;

    /// Authenticate and mint a session token
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedSession>;

    /// Force-refresh the principal's token, re-reading its custom claims
    async fn refresh_token(&self, principal: &Principal) -> Result<RefreshedToken>;
}

/// Identity provider backed by the local credential store
pub struct LocalIdentityProvider<C: CredentialRepository> {
    credentials: Arc<C>,
    jwt_manager: JwtManager,
}

impl<C: CredentialRepository> LocalIdentityProvider<C> {
    pub fn new(credentials: Arc<C>, jwt_manager: JwtManager) -> Self {
        Self {
            credentials,
            jwt_manager,
        }
    }

    /// Privileged out-of-band operation: set the claims embedded in the
    /// principal's future tokens. Existing tokens keep their old claims until
    /// refreshed.
    pub async fn set_custom_claims(&self, uid: &str, claims: TokenClaims) -> Result<()> {
        self.credentials.set_custom_claims(uid, &claims).await?;
        tracing::info!(uid = %uid, admin = ?claims.admin, "Custom claims updated");
        Ok(())
    }

    /// Change the sign-in email and/or password after re-authenticating with
    /// the current password. Nothing is written when the password is wrong.
    pub async fn change_login(
        &self,
        uid: &str,
        current_password: &str,
        new_email: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<Principal> {
        let credential = self
            .credentials
            .find_by_uid(uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Principal {} not found", uid)))?;

        if !verify_password(current_password, &credential.password_hash)? {
            tracing::warn!(uid = %uid, "Re-authentication failed");
            return Err(AppError::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }

        let email = match new_email {
            Some(email) if email != credential.email => {
                if self.credentials.find_by_email(email).await?.is_some() {
                    return Err(AppError::Conflict(format!(
                        "Email {} is already registered",
                        email
                    )));
                }
                email.to_string()
            }
            _ => credential.email,
        };
        let password_hash = match new_password {
            Some(password) => hash_password(password)?,
            None => credential.password_hash,
        };

        self.credentials
            .update_login(uid, &email, &password_hash)
            .await?;
        tracing::info!(
            uid = %uid,
            email_changed = new_email.is_some(),
            password_changed = new_password.is_some(),
            "Sign-in credentials updated"
        );

        Ok(Principal::new(uid, email).with_claims(credential.custom_claims))
    }

    /// Decode a presented session token into its principal
    pub fn verify_token(&self, token: &str) -> Result<Principal> {
        Ok(self.jwt_manager.verify_identity_token(token)?.principal())
    }
}

#[async_trait]
impl<C: CredentialRepository> IdentityProvider for LocalIdentityProvider<C> {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Principal> {
        let input = CredentialsInput {
            email: email.trim().to_lowercase(),
            password: password.to_string(),
        };
        input.validate()?;

        if self.credentials.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Email {} is already registered",
                input.email
            )));
        }

        let credential = Credential {
            uid: uuid::Uuid::new_v4().simple().to_string(),
            email: input.email,
            password_hash: hash_password(&input.password)?,
            custom_claims: TokenClaims::default(),
            created_at: Utc::now(),
        };
        self.credentials.create(&credential).await?;

        tracing::info!(uid = %credential.uid, "Principal signed up");
        Ok(Principal::new(credential.uid, credential.email))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedSession> {
        let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

        let Some(credential) = self
            .credentials
            .find_by_email(&email.trim().to_lowercase())
            .await?
        else {
            if let Some(hash) = UNKNOWN_ACCOUNT_HASH.as_deref() {
                verify_password(password, hash)?;
            }
            metrics::counter!("folio_auth_sign_in_total", "result" => "failure").increment(1);
            return Err(invalid());
        };

        if !verify_password(password, &credential.password_hash)? {
            metrics::counter!("folio_auth_sign_in_total", "result" => "failure").increment(1);
            return Err(invalid());
        }

        let principal =
            Principal::new(credential.uid, credential.email).with_claims(credential.custom_claims);
        let token = self.jwt_manager.create_identity_token(&principal)?;

        metrics::counter!("folio_auth_sign_in_total", "result" => "success").increment(1);
        Ok(SignedSession {
            principal,
            token,
            expires_in: self.jwt_manager.access_token_ttl(),
        })
    }

    async fn refresh_token(&self, principal: &Principal) -> Result<RefreshedToken> {
        let credential = self
            .credentials
            .find_by_uid(&principal.uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Principal {} not found", principal.uid)))?;

        let refreshed = principal.clone().with_claims(credential.custom_claims);
        let token = self.jwt_manager.create_identity_token(&refreshed)?;

        Ok(RefreshedToken {
            token,
            claims: refreshed.claims,
        })
    }
}

pub(crate) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
