//! Server initialization and routing

use crate::api;
use crate::authz::RoleResolver;
use crate::config::Config;
use crate::domain::MAX_ATTACHMENT_BYTES;
use crate::identity::LocalIdentityProvider;
use crate::jwt::JwtManager;
use crate::media::CloudinaryClient;
use crate::middleware::{
    metrics::ObservabilityLayer, path_guard_middleware, require_administrator,
    require_authenticated,
};
use crate::repository::{
    admin::AdminRepositoryImpl, announcement::AnnouncementRepositoryImpl,
    credential::CredentialRepositoryImpl,
    education::EducationRepositoryImpl, profile::ProfileRepositoryImpl,
    template::TemplateRepositoryImpl, template_style::TemplateStyleRepositoryImpl,
    work::WorkRepositoryImpl,
};
use crate::service::{
    AccountService, AdminService, AnnouncementService, EducationService, PortfolioService,
    ProfileService, TemplateService, WorkService,
};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

type Provider = LocalIdentityProvider<CredentialRepositoryImpl>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub jwt_manager: JwtManager,
    pub identity_provider: Arc<Provider>,
    pub role_resolver: Arc<RoleResolver<Provider, AdminRepositoryImpl>>,
    pub admin_service: Arc<AdminService<Provider, AdminRepositoryImpl, ProfileRepositoryImpl>>,
    pub profile_service: Arc<ProfileService<ProfileRepositoryImpl>>,
    pub account_service: Arc<AccountService<CredentialRepositoryImpl, ProfileRepositoryImpl>>,
    pub announcement_service: Arc<AnnouncementService<AnnouncementRepositoryImpl>>,
    pub education_service: Arc<EducationService<EducationRepositoryImpl>>,
    pub work_service: Arc<WorkService<WorkRepositoryImpl>>,
    pub template_service: Arc<TemplateService<TemplateRepositoryImpl, TemplateStyleRepositoryImpl>>,
    pub portfolio_service: Arc<
        PortfolioService<
            ProfileRepositoryImpl,
            EducationRepositoryImpl,
            WorkRepositoryImpl,
            TemplateRepositoryImpl,
            TemplateStyleRepositoryImpl,
        >,
    >,
    pub media_host: Arc<CloudinaryClient>,
}

impl HasServices for AppState {
    type CredentialRepo = CredentialRepositoryImpl;
    type AdminRepo = AdminRepositoryImpl;
    type ProfileRepo = ProfileRepositoryImpl;
    type EducationRepo = EducationRepositoryImpl;
    type WorkRepo = WorkRepositoryImpl;
    type TemplateRepo = TemplateRepositoryImpl;
    type StyleRepo = TemplateStyleRepositoryImpl;
    type AnnouncementRepo = AnnouncementRepositoryImpl;
    type Media = CloudinaryClient;

    fn config(&self) -> &Config {
        &self.config
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    fn identity_provider(&self) -> &Provider {
        &self.identity_provider
    }

    fn role_resolver(&self) -> &RoleResolver<Provider, AdminRepositoryImpl> {
        &self.role_resolver
    }

    fn admin_service(&self) -> &AdminService<Provider, AdminRepositoryImpl, ProfileRepositoryImpl> {
        &self.admin_service
    }

    fn profile_service(&self) -> &ProfileService<ProfileRepositoryImpl> {
        &self.profile_service
    }

    fn account_service(&self) -> &AccountService<CredentialRepositoryImpl, ProfileRepositoryImpl> {
        &self.account_service
    }

    fn announcement_service(&self) -> &AnnouncementService<AnnouncementRepositoryImpl> {
        &self.announcement_service
    }

    fn education_service(&self) -> &EducationService<EducationRepositoryImpl> {
        &self.education_service
    }

    fn work_service(&self) -> &WorkService<WorkRepositoryImpl> {
        &self.work_service
    }

    fn template_service(&self) -> &TemplateService<TemplateRepositoryImpl, TemplateStyleRepositoryImpl> {
        &self.template_service
    }

    fn portfolio_service(
        &self,
    ) -> &PortfolioService<
        ProfileRepositoryImpl,
        EducationRepositoryImpl,
        WorkRepositoryImpl,
        TemplateRepositoryImpl,
        TemplateStyleRepositoryImpl,
    > {
        &self.portfolio_service
    }

    fn media_host(&self) -> &CloudinaryClient {
        &self.media_host
    }

    async fn check_ready(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

impl AppState {
    /// Wire repositories and services over a connected pool
    pub fn new(config: Config, db_pool: MySqlPool) -> Result<Self> {
        let credential_repo = Arc::new(CredentialRepositoryImpl::new(db_pool.clone()));
        let admin_repo = Arc::new(AdminRepositoryImpl::new(db_pool.clone()));
        let profile_repo = Arc::new(ProfileRepositoryImpl::new(db_pool.clone()));
        let education_repo = Arc::new(EducationRepositoryImpl::new(db_pool.clone()));
        let work_repo = Arc::new(WorkRepositoryImpl::new(db_pool.clone()));
        let template_repo = Arc::new(TemplateRepositoryImpl::new(db_pool.clone()));
        let style_repo = Arc::new(TemplateStyleRepositoryImpl::new(db_pool.clone()));
        let announcement_repo = Arc::new(AnnouncementRepositoryImpl::new(db_pool.clone()));

        let jwt_manager = JwtManager::new(config.jwt.clone());
        let identity_provider = Arc::new(LocalIdentityProvider::new(
            credential_repo,
            jwt_manager.clone(),
        ));
        let role_resolver = Arc::new(RoleResolver::new(
            identity_provider.clone(),
            admin_repo.clone(),
        ));
        let admin_service = Arc::new(AdminService::new(
            identity_provider.clone(),
            admin_repo,
            profile_repo.clone(),
            config.admin_enrollment.clone(),
        ));
        let template_service = Arc::new(TemplateService::new(template_repo, style_repo));
        let portfolio_service = Arc::new(PortfolioService::new(
            profile_repo.clone(),
            education_repo.clone(),
            work_repo.clone(),
            template_service.clone(),
        ));
        let account_service = Arc::new(AccountService::new(
            identity_provider.clone(),
            profile_repo.clone(),
        ));
        let media_host = Arc::new(CloudinaryClient::new(config.media.clone())?);
        if config.media.cloud_name.is_none() {
            tracing::warn!("MEDIA_CLOUD_NAME not set, uploads will fail");
        }

        Ok(Self {
            config: Arc::new(config),
            db_pool,
            jwt_manager,
            identity_provider,
            role_resolver,
            admin_service,
            account_service,
            announcement_service: Arc::new(AnnouncementService::new(announcement_repo)),
            profile_service: Arc::new(ProfileService::new(profile_repo)),
            education_service: Arc::new(EducationService::new(education_repo)),
            work_service: Arc::new(WorkService::new(work_repo)),
            template_service,
            portfolio_service,
            media_host,
        })
    }
}

/// Connect the MySQL pool
pub async fn connect(config: &Config) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;
    info!("Connected to database");
    Ok(pool)
}

/// Run the HTTP server
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    let db_pool = connect(&config).await?;
    let http_addr = config.http_addr();
    let state = AppState::new(config, db_pool)?;

    let metrics_router = Router::new()
        .route("/metrics", get(api::metrics::metrics_handler))
        .with_state(Arc::new(prometheus_handle));

    let app = build_router(state)
        .merge(metrics_router)
        .layer(ObservabilityLayer);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP router with generic state type
///
/// Generic over the state so tests can drive the production routes against
/// in-memory repositories.
pub fn build_router<S: HasServices>(state: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = DefaultBodyLimit::max(MAX_ATTACHMENT_BYTES as usize + 64 * 1024);

    let authenticated = Router::new()
        .route("/api/v1/auth/refresh", post(api::auth::refresh::<S>))
        .route("/api/v1/auth/me", get(api::auth::me::<S>))
        .route(
            "/api/v1/profile",
            get(api::profile::get::<S>).put(api::profile::update::<S>),
        )
        .route(
            "/api/v1/profile/photo",
            post(api::profile::upload_photo::<S>).layer(upload_limit.clone()),
        )
        .route(
            "/api/v1/education",
            get(api::education::list::<S>).post(api::education::create::<S>),
        )
        .route(
            "/api/v1/education/{id}",
            get(api::education::get::<S>)
                .put(api::education::update::<S>)
                .delete(api::education::delete::<S>),
        )
        .route(
            "/api/v1/works",
            get(api::work::list::<S>).post(api::work::create::<S>),
        )
        .route(
            "/api/v1/works/upload",
            post(api::work::upload::<S>).layer(upload_limit),
        )
        .route(
            "/api/v1/works/{id}",
            get(api::work::get::<S>)
                .put(api::work::update::<S>)
                .delete(api::work::delete::<S>),
        )
        .route("/api/v1/templates", get(api::template::list_active::<S>))
        .route("/api/v1/templates/{id}", get(api::template::get::<S>))
        .route(
            "/api/v1/template-styles",
            get(api::template::list_published_styles::<S>),
        )
        .route("/api/v1/portfolio", get(api::portfolio::get::<S>))
        .route("/api/v1/account", put(api::account::update::<S>))
        .route("/api/v1/announcements", get(api::announcement::list::<S>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authenticated::<S>,
        ));

    let administrator = Router::new()
        .route("/api/v1/admin/users", get(api::admin::list_users::<S>))
        .route("/api/v1/admin/users/{uid}/role", put(api::admin::set_role::<S>))
        .route(
            "/api/v1/admin/users/{uid}/portfolio",
            get(api::admin::user_portfolio::<S>),
        )
        .route(
            "/api/v1/admin/registry",
            get(api::admin::list_registry::<S>).post(api::admin::grant::<S>),
        )
        .route(
            "/api/v1/admin/registry/{uid}",
            axum::routing::delete(api::admin::revoke::<S>),
        )
        .route(
            "/api/v1/admin/templates",
            get(api::template::list_all::<S>).post(api::template::create::<S>),
        )
        .route(
            "/api/v1/admin/templates/initialize",
            post(api::template::initialize_defaults::<S>),
        )
        .route(
            "/api/v1/admin/templates/{id}",
            put(api::template::update::<S>).delete(api::template::delete::<S>),
        )
        .route(
            "/api/v1/admin/template-styles",
            get(api::template::list_all_styles::<S>).post(api::template::create_style::<S>),
        )
        .route(
            "/api/v1/admin/template-styles/{id}",
            put(api::template::update_style::<S>).delete(api::template::delete_style::<S>),
        )
        .route(
            "/api/v1/admin/announcements",
            post(api::announcement::publish::<S>),
        )
        .route(
            "/api/v1/admin/announcements/{id}",
            axum::routing::delete(api::announcement::delete::<S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_administrator::<S>,
        ));

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // Public authentication endpoints
        .route("/api/v1/auth/sign-up", post(api::auth::sign_up::<S>))
        .route("/api/v1/auth/sign-in", post(api::auth::sign_in::<S>))
        .route(
            "/api/v1/auth/register-admin",
            post(api::auth::register_admin::<S>),
        )
        .merge(authenticated)
        .merge(administrator)
        .layer(middleware::from_fn(path_guard_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
