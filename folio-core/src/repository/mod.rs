//! Data access layer (Repository pattern)

pub mod admin;
pub mod announcement;
pub mod credential;
pub mod education;
pub mod profile;
pub mod template;
pub mod template_style;
pub mod work;

pub use admin::AdminRepository;
pub use announcement::AnnouncementRepository;
pub use credential::CredentialRepository;
pub use education::EducationRepository;
pub use profile::ProfileRepository;
pub use template::TemplateRepository;
pub use template_style::TemplateStyleRepository;
pub use work::WorkRepository;
