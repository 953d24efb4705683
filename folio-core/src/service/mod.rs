//! Business logic layer

pub mod account;
pub mod admin;
pub mod announcement;
pub mod education;
pub mod portfolio;
pub mod profile;
pub mod template;
pub mod work;

pub use account::AccountService;
pub use admin::{AdminService, GrantAdminInput, RegisterAdminInput};
pub use announcement::AnnouncementService;
pub use education::EducationService;
pub use portfolio::{PortfolioSelection, PortfolioService};
pub use profile::ProfileService;
pub use template::TemplateService;
pub use work::WorkService;
