//! Route guard state machine

use super::tracker::RoleState;
use crate::identity::SessionState;
use serde::Serialize;

/// What a guarded route requires of the visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteRequirement {
    Authenticated,
    Administrator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    CheckingSession,
    Unauthenticated,
    AuthenticatedUnprivileged,
    CheckingRole,
    AuthenticatedPrivileged,
    Denied,
}

/// How a guard state is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    Wait,
    RedirectToSignIn,
    DenialNotice,
    Content,
}

impl GuardState {
    /// Derive the guard state.
    ///
    /// `role` is the role state known for the session's principal; pass
    /// `None` when no classification for that principal exists yet.
    pub fn derive(
        session: &SessionState,
        role: Option<RoleState>,
        requirement: RouteRequirement,
    ) -> Self {
        match session {
            SessionState::Undetermined => GuardState::CheckingSession,
            SessionState::Determined(None) => GuardState::Unauthenticated,
            SessionState::Determined(Some(_)) => match requirement {
                RouteRequirement::Authenticated => GuardState::AuthenticatedUnprivileged,
                RouteRequirement::Administrator => match role {
                    None | Some(RoleState::Pending) => GuardState::CheckingRole,
                    Some(RoleState::Administrator) => GuardState::AuthenticatedPrivileged,
                    Some(RoleState::NotAdministrator) => GuardState::Denied,
                },
            },
        }
    }

    pub fn rendering(self) -> Rendering {
        match self {
            GuardState::CheckingSession | GuardState::CheckingRole => Rendering::Wait,
            GuardState::Unauthenticated => Rendering::RedirectToSignIn,
            GuardState::Denied => Rendering::DenialNotice,
            GuardState::AuthenticatedUnprivileged | GuardState::AuthenticatedPrivileged => {
                Rendering::Content
            }
        }
    }

    /// True once the guard no longer waits on the session or the role
    pub fn is_settled(self) -> bool {
        self.rendering() != Rendering::Wait
    }
}

impl std::fmt::Display for GuardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GuardState::CheckingSession => "checking-session",
            GuardState::Unauthenticated => "unauthenticated",
            GuardState::AuthenticatedUnprivileged => "authenticated-unprivileged",
            GuardState::CheckingRole => "checking-role",
            GuardState::AuthenticatedPrivileged => "authenticated-privileged",
            GuardState::Denied => "denied",
        };
        write!(f, "{}", name)
    }
}
