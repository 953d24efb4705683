//! Access gate driven by a signed-in client session, end to end over the
//! local identity provider and in-memory repositories

use super::{create_test_jwt_manager, TestAdminRepository, TestCredentialRepository};
use folio_core::authz::{AccessGate, GuardState, Rendering, RoleResolver, RouteRequirement};
use folio_core::domain::TokenClaims;
use folio_core::identity::{
    ClientSession, IdentityProvider, LocalIdentityProvider, SessionResolver,
};
use std::sync::Arc;
use std::time::Duration;

const PASSWORD: &str = "password123";

type Provider = LocalIdentityProvider<TestCredentialRepository>;

struct Fixture {
    provider: Arc<Provider>,
    admins: Arc<TestAdminRepository>,
    resolver: Arc<RoleResolver<Provider, TestAdminRepository>>,
    session: ClientSession<Provider>,
}

impl Fixture {
    fn new() -> Self {
        let provider = Arc::new(LocalIdentityProvider::new(
            Arc::new(TestCredentialRepository::default()),
            create_test_jwt_manager(),
        ));
        let admins = Arc::new(TestAdminRepository::default());
        let resolver = Arc::new(RoleResolver::new(provider.clone(), admins.clone()));
        let session = ClientSession::new(provider.clone());
        Self {
            provider,
            admins,
            resolver,
            session,
        }
    }

    fn gate(&self, requirement: RouteRequirement) -> AccessGate {
        AccessGate::start(
            SessionResolver::start(&self.session),
            self.resolver.clone(),
            requirement,
        )
    }
}

async fn reach(gate: &AccessGate, target: GuardState) {
    let mut rx = gate.watch();
    tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|state| *state == target))
        .await
        .unwrap_or_else(|_| panic!("gate never reached {}; stuck at {}", target, gate.state()))
        .unwrap();
}

#[tokio::test]
async fn test_signed_out_visitor_is_sent_to_sign_in() {
    let fixture = Fixture::new();
    let gate = fixture.gate(RouteRequirement::Administrator);

    let state = gate.settled().await;

    assert_eq!(state, GuardState::Unauthenticated);
    assert_eq!(state.rendering(), Rendering::RedirectToSignIn);
    assert_eq!(fixture.admins.lookups(), 0);
}

#[tokio::test]
async fn test_sign_in_as_registry_administrator() {
    let fixture = Fixture::new();
    let gate = fixture.gate(RouteRequirement::Administrator);
    reach(&gate, GuardState::Unauthenticated).await;

    let principal = fixture
        .provider
        .sign_up("registrar@example.com", PASSWORD)
        .await
        .unwrap();
    fixture.admins.add(&principal.uid).await;
    fixture.session.sign_in("registrar@example.com", PASSWORD).await.unwrap();

    reach(&gate, GuardState::AuthenticatedPrivileged).await;
    assert_eq!(gate.state().rendering(), Rendering::Content);
}

#[tokio::test]
async fn test_switching_to_ordinary_user_is_denied() {
    let fixture = Fixture::new();
    let boss = fixture.provider.sign_up("boss@example.com", PASSWORD).await.unwrap();
    fixture.provider.sign_up("student@example.com", PASSWORD).await.unwrap();
    fixture
        .provider
        .set_custom_claims(&boss.uid, TokenClaims::admin())
        .await
        .unwrap();

    let gate = fixture.gate(RouteRequirement::Administrator);
    fixture.session.sign_in("boss@example.com", PASSWORD).await.unwrap();
    reach(&gate, GuardState::AuthenticatedPrivileged).await;

    fixture.session.sign_out();
    reach(&gate, GuardState::Unauthenticated).await;

    fixture.session.sign_in("student@example.com", PASSWORD).await.unwrap();
    reach(&gate, GuardState::Denied).await;
    assert_eq!(gate.state().rendering(), Rendering::DenialNotice);

    let role = gate.role();
    assert_ne!(role.subject.as_deref(), Some(boss.uid.as_str()));
}

#[tokio::test]
async fn test_registry_outage_denies_signed_in_user() {
    let fixture = Fixture::new();
    fixture.admins.set_failing(true);
    let gate = fixture.gate(RouteRequirement::Administrator);

    fixture.session.sign_up("student@example.com", PASSWORD).await.unwrap();

    reach(&gate, GuardState::Denied).await;
}

#[tokio::test]
async fn test_member_route_never_classifies() {
    let fixture = Fixture::new();
    let gate = fixture.gate(RouteRequirement::Authenticated);

    fixture.session.sign_up("student@example.com", PASSWORD).await.unwrap();

    reach(&gate, GuardState::AuthenticatedUnprivileged).await;
    assert_eq!(fixture.admins.lookups(), 0);
}

#[tokio::test]
async fn test_shutdown_stops_following_the_session() {
    let fixture = Fixture::new();
    let gate = fixture.gate(RouteRequirement::Authenticated);
    reach(&gate, GuardState::Unauthenticated).await;

    let rx = gate.watch();
    gate.shutdown();
    fixture.session.sign_up("student@example.com", PASSWORD).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(*rx.borrow(), GuardState::Unauthenticated);
}
