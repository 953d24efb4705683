//! Administrator classification
//!
//! A principal is an administrator when its refreshed token carries a true
//! `admin` claim, or when the administrators registry holds a record under its
//! identifier. The claim is checked first; the registry lookup only runs when
//! the claim does not grant access. Failures in either step degrade to the
//! restrictive answer and are never returned to the caller.

use crate::domain::Principal;
use crate::identity::IdentityProvider;
use crate::repository::AdminRepository;
use serde::Serialize;
use std::sync::Arc;

/// Result of a single administrator check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The signal is present and grants administrator status
    Granted,
    /// The check ran and the signal is absent (or false)
    Absent,
    /// The check could not run; treated like `Absent`
    Unavailable(String),
}

impl CheckOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, CheckOutcome::Granted)
    }

    fn label(&self) -> &'static str {
        match self {
            CheckOutcome::Granted => "granted",
            CheckOutcome::Absent => "absent",
            CheckOutcome::Unavailable(_) => "unavailable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Administrator,
    NotAdministrator,
}

impl Classification {
    pub fn is_administrator(self) -> bool {
        self == Classification::Administrator
    }

    fn label(self) -> &'static str {
        match self {
            Classification::Administrator => "administrator",
            Classification::NotAdministrator => "not_administrator",
        }
    }
}

/// Both step outcomes plus the collapsed classification. A step that did
/// not run is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleResolution {
    pub token_claim: Option<CheckOutcome>,
    pub registry: Option<CheckOutcome>,
    pub classification: Classification,
}

pub struct RoleResolver<P: IdentityProvider, R: AdminRepository> {
    provider: Arc<P>,
    admins: Arc<R>,
}

impl<P: IdentityProvider, R: AdminRepository> RoleResolver<P, R> {
    pub fn new(provider: Arc<P>, admins: Arc<R>) -> Self {
        Self { provider, admins }
    }

    pub async fn classify(&self, principal: Option<&Principal>) -> Classification {
        self.resolve(principal).await.classification
    }

    pub async fn resolve(&self, principal: Option<&Principal>) -> RoleResolution {
        let Some(principal) = principal else {
            return RoleResolution {
                token_claim: None,
                registry: None,
                classification: Classification::NotAdministrator,
            };
        };

        let token_claim = self.check_token_claim(principal).await;
        if token_claim.is_granted() {
            return finish(principal, Some(token_claim), None);
        }

        let registry = self.check_registry(principal).await;
        finish(principal, Some(token_claim), Some(registry))
    }

    async fn check_token_claim(&self, principal: &Principal) -> CheckOutcome {
        let outcome = match self.provider.refresh_token(principal).await {
            Ok(refreshed) if refreshed.claims.grants_admin() => CheckOutcome::Granted,
            Ok(_) => CheckOutcome::Absent,
            Err(e) => {
                tracing::warn!(
                    uid = %principal.uid,
                    error = %e,
                    "Token claim check unavailable, falling back to registry"
                );
                CheckOutcome::Unavailable(e.to_string())
            }
        };
        record_check("token_claim", &outcome);
        outcome
    }

    async fn check_registry(&self, principal: &Principal) -> CheckOutcome {
        let outcome = match self.admins.find(&principal.uid).await {
            Ok(Some(_)) => CheckOutcome::Granted,
            Ok(None) => CheckOutcome::Absent,
            Err(e) => {
                tracing::warn!(
                    uid = %principal.uid,
                    error = %e,
                    "Administrators registry lookup failed"
                );
                CheckOutcome::Unavailable(e.to_string())
            }
        };
        record_check("registry", &outcome);
        outcome
    }
}

fn record_check(step: &'static str, outcome: &CheckOutcome) {
    metrics::counter!("folio_role_checks_total", "step" => step, "outcome" => outcome.label())
        .increment(1);
}

fn finish(
    principal: &Principal,
    token_claim: Option<CheckOutcome>,
    registry: Option<CheckOutcome>,
) -> RoleResolution {
    let granted = token_claim.as_ref().is_some_and(CheckOutcome::is_granted)
        || registry.as_ref().is_some_and(CheckOutcome::is_granted);
    let classification = if granted {
        Classification::Administrator
    } else {
        Classification::NotAdministrator
    };

    tracing::debug!(
        uid = %principal.uid,
        ?token_claim,
        ?registry,
        classification = classification.label(),
        "Role classified"
    );
    metrics::counter!("folio_role_classifications_total", "result" => classification.label())
        .increment(1);

    RoleResolution {
        token_claim,
        registry,
        classification,
    }
}
