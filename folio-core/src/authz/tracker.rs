//! Role state over the lifetime of a session
//!
//! Every classification request takes a new generation. A finished
//! classification is applied only if no newer request has started since, so
//! a slow result for a previous principal can never overwrite the state of
//! the current one.

use super::role::{Classification, RoleResolver};
use crate::domain::Principal;
use crate::identity::IdentityProvider;
use crate::repository::AdminRepository;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleState {
    Pending,
    Administrator,
    NotAdministrator,
}

impl From<Classification> for RoleState {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Administrator => RoleState::Administrator,
            Classification::NotAdministrator => RoleState::NotAdministrator,
        }
    }
}

/// Role state tagged with the principal it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSnapshot {
    pub subject: Option<String>,
    pub state: RoleState,
    pub generation: u64,
}

impl RoleSnapshot {
    /// The role state if this snapshot belongs to `principal`
    pub fn state_for(&self, principal: &Principal) -> Option<RoleState> {
        (self.subject.as_deref() == Some(principal.uid.as_str())).then_some(self.state)
    }
}

/// Handle for one classification request
#[derive(Debug)]
#[must_use]
pub struct RoleTicket {
    generation: u64,
    subject: Option<String>,
}

impl RoleTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub struct RoleTracker {
    snapshot: watch::Sender<RoleSnapshot>,
}

impl Default for RoleTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleTracker {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(RoleSnapshot {
            subject: None,
            state: RoleState::NotAdministrator,
            generation: 0,
        });
        Self { snapshot }
    }

    pub fn snapshot(&self) -> RoleSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RoleSnapshot> {
        self.snapshot.subscribe()
    }

    /// Start a classification for `principal`. The state becomes `Pending`
    /// immediately, or `NotAdministrator` when there is no principal.
    pub fn begin(&self, principal: Option<&Principal>) -> RoleTicket {
        let subject = principal.map(|p| p.uid.clone());
        let mut generation = 0;
        self.snapshot.send_modify(|snapshot| {
            snapshot.generation += 1;
            generation = snapshot.generation;
            snapshot.subject = subject.clone();
            snapshot.state = if subject.is_some() {
                RoleState::Pending
            } else {
                RoleState::NotAdministrator
            };
        });
        RoleTicket {
            generation,
            subject,
        }
    }

    /// Apply a finished classification. Returns false, leaving the state
    /// untouched, when a newer request has started.
    pub fn complete(&self, ticket: RoleTicket, classification: Classification) -> bool {
        let applied = self.snapshot.send_if_modified(|snapshot| {
            if snapshot.generation != ticket.generation {
                return false;
            }
            snapshot.state = classification.into();
            true
        });

        if !applied {
            tracing::debug!(
                subject = ticket.subject.as_deref(),
                generation = ticket.generation,
                "Discarding stale role classification"
            );
        }
        applied
    }

    /// Begin, classify and complete in one step
    pub async fn track<P, R>(
        &self,
        resolver: &RoleResolver<P, R>,
        principal: Option<&Principal>,
    ) -> bool
    where
        P: IdentityProvider,
        R: AdminRepository,
    {
        let ticket = self.begin(principal);
        let classification = resolver.classify(principal).await;
        self.complete(ticket, classification)
    }
}
