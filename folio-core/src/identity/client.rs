//! Signed-in session held by a client of the identity provider

use super::provider::{IdentityProvider, SignedSession};
use super::session::{SessionChannel, SessionSource, SessionStream};
use crate::domain::Principal;
use crate::error::Result;
use std::sync::{Arc, Mutex};

/// Tracks one client's session and publishes every change to subscribers
pub struct ClientSession<P: IdentityProvider> {
    provider: Arc<P>,
    channel: SessionChannel,
    token: Mutex<Option<String>>,
}

impl<P: IdentityProvider> ClientSession<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            channel: SessionChannel::new(),
            token: Mutex::new(None),
        }
    }

    pub fn provider(&self) -> Arc<P> {
        self.provider.clone()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Principal> {
        let SignedSession {
            principal, token, ..
        } = self.provider.sign_in(email, password).await?;
        self.set_token(Some(token));
        self.channel.publish(Some(principal.clone()));
        Ok(principal)
    }

    /// Create the account and sign straight into it
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Principal> {
        self.provider.sign_up(email, password).await?;
        self.sign_in(email, password).await
    }

    pub fn sign_out(&self) {
        self.set_token(None);
        self.channel.publish(None);
    }

    pub fn current(&self) -> Option<Principal> {
        self.channel.current()
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = token;
    }
}

impl<P: IdentityProvider> SessionSource for ClientSession<P> {
    fn subscribe(&self) -> SessionStream {
        self.channel.subscribe()
    }
}
