//! Folio Core - e-portfolio backend
//!
//! Session resolution, administrator classification and route guarding,
//! plus the profile, education, work and template records behind them.

pub mod api;
pub mod authz;
pub mod config;
pub mod domain;
pub mod error;
pub mod identity;
pub mod jwt;
pub mod media;
pub mod middleware;
pub mod migration;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
