//! Account settings: display name and sign-in credentials

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// An empty new password means "keep the current one"
fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    match password.chars().count() {
        0 | 6..=128 => Ok(()),
        _ => Err(ValidationError::new("password_length")),
    }
}

/// Requested account changes; absent fields are left unchanged.
///
/// Changing the email or password requires `current_password`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAccountInput {
    #[validate(length(max = 255))]
    pub display_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub current_password: Option<String>,
    #[validate(custom(function = "validate_new_password"))]
    pub new_password: Option<String>,
}

impl UpdateAccountInput {
    /// The normalized new email, if it differs from `current`
    pub fn email_change(&self, current: &str) -> Option<String> {
        self.email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty() && e != current)
    }

    pub fn password_change(&self) -> Option<&str> {
        self.new_password.as_deref().filter(|p| !p.is_empty())
    }
}

/// Account after an update. `token` is set when the sign-in credentials
/// changed and the caller should replace its session token.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
