//! Domain models for Folio Core

pub mod account;
pub mod announcement;
pub mod common;
pub mod education;
pub mod portfolio;
pub mod principal;
pub mod profile;
pub mod template;
pub mod work;

pub use account::*;
pub use announcement::*;
pub use common::*;
pub use education::*;
pub use portfolio::*;
pub use principal::*;
pub use profile::*;
pub use template::*;
pub use work::*;
