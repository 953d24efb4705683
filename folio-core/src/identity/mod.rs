//! Identity: provider, client session and session resolution

pub mod client;
pub mod provider;
pub mod session;

pub use client::ClientSession;
pub use provider::{
    CredentialsInput, IdentityProvider, LocalIdentityProvider, RefreshedToken, SignedSession,
};
pub use session::{
    SessionChannel, SessionResolver, SessionSnapshot, SessionSource, SessionState, SessionStream,
};
