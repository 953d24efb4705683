//! Reactive access gate: session resolver, role tracker and route guard
//! wired together for a single guarded view.

use super::guard::{GuardState, RouteRequirement};
use super::role::RoleResolver;
use super::tracker::{RoleSnapshot, RoleTracker};
use crate::identity::{IdentityProvider, SessionResolver};
use crate::repository::AdminRepository;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};

pub struct AccessGate {
    state: watch::Receiver<GuardState>,
    tracker: Arc<RoleTracker>,
    task: JoinHandle<()>,
}

impl AccessGate {
    /// Start guarding. Classification re-runs whenever the session's
    /// principal identity changes, including a sign-out and sign-in of the
    /// same principal; only administrator routes classify.
    pub fn start<P, R>(
        session: SessionResolver,
        resolver: Arc<RoleResolver<P, R>>,
        requirement: RouteRequirement,
    ) -> Self
    where
        P: IdentityProvider + 'static,
        R: AdminRepository + 'static,
    {
        let tracker = Arc::new(RoleTracker::new());
        let mut session_rx = session.watch();
        let mut role_rx = tracker.subscribe();

        let initial = GuardState::derive(&session_rx.borrow().state, None, requirement);
        let (state_tx, state_rx) = watch::channel(initial);

        let task_tracker = tracker.clone();
        let task = tokio::spawn(async move {
            // Owning the resolver keeps the session subscription alive for
            // exactly as long as the gate.
            let _session = session;
            let tracker = task_tracker;
            let mut classifications = JoinSet::new();
            let mut classified_epoch = 0;

            loop {
                let snapshot = session_rx.borrow_and_update().clone();
                let current = snapshot.state;

                if requirement == RouteRequirement::Administrator
                    && current.is_determined()
                    && snapshot.epoch != classified_epoch
                {
                    classified_epoch = snapshot.epoch;

                    let principal = current.principal().cloned();
                    let ticket = tracker.begin(principal.as_ref());
                    let resolver = resolver.clone();
                    let tracker = tracker.clone();
                    classifications.spawn(async move {
                        let classification = resolver.classify(principal.as_ref()).await;
                        tracker.complete(ticket, classification);
                    });
                }

                let role = current
                    .principal()
                    .and_then(|p| role_rx.borrow_and_update().state_for(p));
                let next = GuardState::derive(&current, role, requirement);
                state_tx.send_if_modified(|state| {
                    if *state == next {
                        return false;
                    }
                    tracing::debug!(from = %state, to = %next, "Guard state changed");
                    *state = next;
                    true
                });

                tokio::select! {
                    changed = session_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    changed = role_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    Some(_) = classifications.join_next(), if !classifications.is_empty() => {}
                }
            }
        });

        Self {
            state: state_rx,
            tracker,
            task,
        }
    }

    pub fn state(&self) -> GuardState {
        *self.state.borrow()
    }

    pub fn watch(&self) -> watch::Receiver<GuardState> {
        self.state.clone()
    }

    pub fn role(&self) -> RoleSnapshot {
        self.tracker.snapshot()
    }

    /// Wait until the guard stops waiting on the session or the role
    pub async fn settled(&self) -> GuardState {
        let mut rx = self.state.clone();
        let state = match rx.wait_for(|state| state.is_settled()).await {
            Ok(state) => *state,
            Err(_) => self.state(),
        };
        state
    }

    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for AccessGate {
    fn drop(&mut self) {
        self.task.abort();
    }
}
