//! HTTP middleware for Folio Core
//!
//! - Bearer token extractors
//! - Route guard (sign-in redirect and administrator denial)
//! - Path traversal guard
//! - Request observability

pub mod auth;
pub mod metrics;
pub mod path_guard;
pub mod route_guard;

pub use auth::{AuthError, AuthPrincipal};
pub use path_guard::path_guard_middleware;
pub use route_guard::{require_administrator, require_authenticated};
