//! Application state traits for dependency injection
//!
//! Handlers and middleware are generic over [`HasServices`] so the same
//! router runs against MySQL in production and in-memory repositories in
//! tests.

use crate::authz::RoleResolver;
use crate::config::Config;
use crate::identity::LocalIdentityProvider;
use crate::jwt::JwtManager;
use crate::media::MediaHost;
use crate::repository::{
    AdminRepository, AnnouncementRepository, CredentialRepository, EducationRepository,
    ProfileRepository, TemplateRepository, TemplateStyleRepository, WorkRepository,
};
use crate::service::{
    AccountService, AdminService, AnnouncementService, EducationService, PortfolioService,
    ProfileService, TemplateService, WorkService,
};

/// Identity provider type for a given state
pub type ProviderOf<S> = LocalIdentityProvider<<S as HasServices>::CredentialRepo>;

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    type CredentialRepo: CredentialRepository;
    /// The administrators registry
    type AdminRepo: AdminRepository;
    type ProfileRepo: ProfileRepository;
    type EducationRepo: EducationRepository;
    type WorkRepo: WorkRepository;
    type TemplateRepo: TemplateRepository;
    type StyleRepo: TemplateStyleRepository;
    type AnnouncementRepo: AnnouncementRepository;
    type Media: MediaHost;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the JWT manager
    fn jwt_manager(&self) -> &JwtManager;

    fn identity_provider(&self) -> &LocalIdentityProvider<Self::CredentialRepo>;

    /// Get the role resolver used by administrator routes
    fn role_resolver(&self) -> &RoleResolver<ProviderOf<Self>, Self::AdminRepo>;

    fn admin_service(&self) -> &AdminService<ProviderOf<Self>, Self::AdminRepo, Self::ProfileRepo>;

    fn profile_service(&self) -> &ProfileService<Self::ProfileRepo>;

    fn account_service(&self) -> &AccountService<Self::CredentialRepo, Self::ProfileRepo>;

    fn announcement_service(&self) -> &AnnouncementService<Self::AnnouncementRepo>;

    fn education_service(&self) -> &EducationService<Self::EducationRepo>;

    fn work_service(&self) -> &WorkService<Self::WorkRepo>;

    fn template_service(&self) -> &TemplateService<Self::TemplateRepo, Self::StyleRepo>;

    fn portfolio_service(
        &self,
    ) -> &PortfolioService<
        Self::ProfileRepo,
        Self::EducationRepo,
        Self::WorkRepo,
        Self::TemplateRepo,
        Self::StyleRepo,
    >;

    /// Get the media host
    fn media_host(&self) -> &Self::Media;

    /// Check if the system is ready (database reachable)
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
