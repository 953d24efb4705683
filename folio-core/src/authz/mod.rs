//! Authorization: administrator classification and route guarding

pub mod gate;
pub mod guard;
pub mod role;
pub mod tracker;

pub use gate::AccessGate;
pub use guard::{GuardState, Rendering, RouteRequirement};
pub use role::{CheckOutcome, Classification, RoleResolution, RoleResolver};
pub use tracker::{RoleSnapshot, RoleState, RoleTicket, RoleTracker};
