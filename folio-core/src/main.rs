use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use folio_core::{
    authz::{AccessGate, RoleResolver, RouteRequirement},
    config::Config,
    domain::TokenClaims,
    identity::{ClientSession, LocalIdentityProvider, SessionResolver},
    jwt::JwtManager,
    migration,
    repository::{admin::AdminRepositoryImpl, credential::CredentialRepositoryImpl},
    server, telemetry,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "folio-core", version, about = "Folio e-portfolio backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Run database migrations and seed the built-in templates
    Migrate,
    /// Set or clear the `admin` claim carried by a principal's tokens
    SetAdminClaim {
        uid: String,
        /// true, false or clear
        value: String,
    },
    /// Sign in and report the route guard state of an administrator route
    Access {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

fn parse_claim(value: &str) -> Result<TokenClaims> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(TokenClaims { admin: Some(true) }),
        "false" => Ok(TokenClaims { admin: Some(false) }),
        "clear" => Ok(TokenClaims::default()),
        other => bail!("Invalid claim value '{}': expected true, false or clear", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;
    let prometheus_handle = telemetry::init(&config.telemetry)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting Folio Core on {}", config.http_addr());
            server::run(config, prometheus_handle).await
        }
        Command::Migrate => migration::run_migrations(&config).await,
        Command::SetAdminClaim { uid, value } => {
            let claims = parse_claim(&value)?;
            let pool = server::connect(&config).await?;
            let provider = LocalIdentityProvider::new(
                Arc::new(CredentialRepositoryImpl::new(pool)),
                JwtManager::new(config.jwt.clone()),
            );
            provider
                .set_custom_claims(&uid, claims)
                .await
                .context("Failed to set custom claims")?;
            println!("admin claim for {} set to {}", uid, value.to_ascii_lowercase());
            Ok(())
        }
        Command::Access { email, password } => {
            let pool = server::connect(&config).await?;
            let provider = Arc::new(LocalIdentityProvider::new(
                Arc::new(CredentialRepositoryImpl::new(pool.clone())),
                JwtManager::new(config.jwt.clone()),
            ));
            let resolver = Arc::new(RoleResolver::new(
                provider.clone(),
                Arc::new(AdminRepositoryImpl::new(pool)),
            ));

            let session = ClientSession::new(provider);
            session
                .sign_in(&email, &password)
                .await
                .context("Sign-in failed")?;

            let gate = AccessGate::start(
                SessionResolver::start(&session),
                resolver,
                RouteRequirement::Administrator,
            );
            let state = gate.settled().await;
            println!("{} ({:?})", state, state.rendering());
            gate.shutdown();
            Ok(())
        }
    }
}
