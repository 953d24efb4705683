//! Session resolution
//!
//! The identity provider publishes session changes (a principal, or its
//! absence) on a per-subscriber stream. [`SessionResolver`] turns that stream
//! into an observable [`SessionState`] that starts out `Undetermined`.

use crate::domain::Principal;
use std::sync::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Ordered stream of session changes; `None` means signed out
pub type SessionStream = mpsc::UnboundedReceiver<Option<Principal>>;

/// Anything that publishes session changes
pub trait SessionSource: Send + Sync {
    /// Subscribe to session changes. The current state is delivered first.
    fn subscribe(&self) -> SessionStream;
}

/// Fan-out of session changes to every live subscriber
#[derive(Default)]
pub struct SessionChannel {
    inner: Mutex<ChannelState>,
}

#[derive(Default)]
struct ChannelState {
    current: Option<Principal>,
    subscribers: Vec<mpsc::UnboundedSender<Option<Principal>>>,
}

impl SessionChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the new session and deliver it to every subscriber in order
    pub fn publish(&self, principal: Option<Principal>) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.current = principal.clone();
        state
            .subscribers
            .retain(|tx| tx.send(principal.clone()).is_ok());
    }

    pub fn current(&self) -> Option<Principal> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .current
            .clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .subscribers
            .len()
    }
}

impl SessionSource for SessionChannel {
    fn subscribe(&self) -> SessionStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if tx.send(state.current.clone()).is_ok() {
            state.subscribers.push(tx);
        }
        rx
    }
}

/// Session as seen by the rest of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No notification received yet
    Undetermined,
    /// The provider has reported a principal or its absence
    Determined(Option<Principal>),
}

impl SessionState {
    pub fn is_determined(&self) -> bool {
        matches!(self, SessionState::Determined(_))
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SessionState::Determined(principal) => principal.as_ref(),
            SessionState::Undetermined => None,
        }
    }
}

/// Latest applied session state with its identity epoch.
///
/// `epoch` increases each time the principal identity changes, counting the
/// transitions to and from absence. Observers that only see the latest value
/// can still tell that intermediate changes happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub epoch: u64,
}

/// Applies session notifications, in emission order, to a watchable state.
///
/// Dropping the resolver (or calling [`shutdown`](Self::shutdown))
/// unsubscribes; no update is applied afterwards.
pub struct SessionResolver {
    snapshot: watch::Receiver<SessionSnapshot>,
    task: JoinHandle<()>,
}

impl SessionResolver {
    pub fn start<S: SessionSource + ?Sized>(source: &S) -> Self {
        let (tx, rx) = watch::channel(SessionSnapshot {
            state: SessionState::Undetermined,
            epoch: 0,
        });
        let mut stream = source.subscribe();

        let task = tokio::spawn(async move {
            let mut applied: Option<Option<String>> = None;
            let mut epoch = 0;
            while let Some(principal) = stream.recv().await {
                let subject = principal.as_ref().map(|p| p.uid.clone());
                if applied.as_ref() != Some(&subject) {
                    epoch += 1;
                    applied = Some(subject);
                }
                tracing::debug!(
                    uid = principal.as_ref().map(|p| p.uid.as_str()),
                    epoch,
                    "Session changed"
                );
                tx.send_replace(SessionSnapshot {
                    state: SessionState::Determined(principal),
                    epoch,
                });
            }
        });

        Self { snapshot: rx, task }
    }

    pub fn state(&self) -> SessionState {
        self.snapshot.borrow().state.clone()
    }

    pub fn epoch(&self) -> u64 {
        self.snapshot.borrow().epoch
    }

    /// Receiver that observes every applied snapshot
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot.clone()
    }

    /// Wait until the first notification has been applied
    pub async fn determined(&self) -> Option<Principal> {
        let mut rx = self.snapshot.clone();
        let principal = match rx.wait_for(|s| s.state.is_determined()).await {
            Ok(snapshot) => snapshot.state.principal().cloned(),
            Err(_) => self.state().principal().cloned(),
        };
        principal
    }

    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for SessionResolver {
    fn drop(&mut self) {
        self.task.abort();
    }
}
