//! Account settings
//!
//! Display name lives on the profile; email and password live on the
//! credential and change only after re-authentication.

use crate::domain::{AccountView, Principal, Profile, UpdateAccountInput};
use crate::error::{AppError, Result};
use crate::identity::{IdentityProvider, LocalIdentityProvider};
use crate::repository::{CredentialRepository, ProfileRepository};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

pub struct AccountService<C: CredentialRepository, P: ProfileRepository> {
    provider: Arc<LocalIdentityProvider<C>>,
    profiles: Arc<P>,
}

impl<C: CredentialRepository, P: ProfileRepository> AccountService<C, P> {
    pub fn new(provider: Arc<LocalIdentityProvider<C>>, profiles: Arc<P>) -> Self {
        Self { provider, profiles }
    }

    pub async fn update(&self, principal: &Principal, input: UpdateAccountInput) -> Result<AccountView> {
        input.validate()?;

        let new_email = input.email_change(&principal.email);
        let new_password = input.password_change();

        let mut signed_in_as = principal.clone();
        let mut token = None;
        if new_email.is_some() || new_password.is_some() {
            let current_password = input
                .current_password
                .as_deref()
                .filter(|p| !p.is_empty())
                .ok_or_else(|| {
                    AppError::Validation(
                        "Current password is required to change email or password".to_string(),
                    )
                })?;

            signed_in_as = self
                .provider
                .change_login(&principal.uid, current_password, new_email.as_deref(), new_password)
                .await?;
            token = Some(self.provider.refresh_token(&signed_in_as).await?.token);
        }

        let mut profile = match self.profiles.find(&principal.uid).await? {
            Some(profile) => profile,
            None => Profile::seed(&principal.uid, &signed_in_as.email),
        };
        if let Some(display_name) = input.display_name {
            profile.display_name = display_name.trim().to_string();
        }
        profile.email = signed_in_as.email.clone();
        profile.updated_at = Utc::now();
        self.profiles.upsert(&profile).await?;

        Ok(AccountView {
            uid: profile.uid,
            email: profile.email,
            display_name: profile.display_name,
            token,
        })
    }
}
