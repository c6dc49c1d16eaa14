use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use restgate::demo::demo_registry;
use restgate::repo::{InMemoryPermissionRepo, InMemoryUserRepo, Seed};
use restgate::{AppState, AuthState, CorsHeaders, RouteRegistry, init_router};
use restgate_auth::JwtTokenValidator;
use restgate_config::{CorsConfig, HttpsConfig, JwtConfig, ServerConfig};
use restgate_observability::{LoggingConfig, init_metrics, init_tracing};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "restgate")]
#[command(about = "Request admission pipeline demo server", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Address to bind, overrides BIND_ADDRESS
        #[arg(short = 'b', long)]
        bind: Option<String>,

        /// JSON seed for the in-memory user and permission stores,
        /// overrides SEED_FILE
        #[arg(short = 's', long)]
        seed: Option<String>,
    },
    /// Print the registered route table
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve {
        bind: None,
        seed: None,
    }) {
        Commands::Serve { bind, seed } => serve(bind, seed).await,
        Commands::Routes => {
            print_routes(&demo_registry(None)?);
            Ok(())
        }
    }
}

async fn serve(bind: Option<String>, seed: Option<String>) -> anyhow::Result<()> {
    init_tracing(&LoggingConfig::from_env())?;

    let mut server_config = ServerConfig::from_env();
    if let Some(bind) = bind {
        server_config.bind_address = bind;
    }
    if seed.is_some() {
        server_config.seed_file = seed;
    }

    let seed = match &server_config.seed_file {
        Some(path) => Seed::from_file(path)?,
        None => {
            warn!("No SEED_FILE configured, starting with empty user store");
            Seed::default()
        }
    };
    info!(
        users = seed.users.len(),
        grants = seed.grants.len(),
        "Loaded seed data"
    );
    let (users, permissions) = seed.into_repos();

    let registry = demo_registry(init_metrics())?;
    let https = HttpsConfig::from_env();
    let cors = CorsHeaders::from_config(&CorsConfig::from_env())
        .context("invalid CORS header value")?;

    let auth = AuthState::new(
        Arc::new(registry),
        Arc::new(JwtTokenValidator::new(&JwtConfig::from_env())),
        Arc::new(users),
    )
    .with_permissions(Arc::new(permissions));

    let app = init_router(AppState::new(auth).with_cors(cors).with_https(https.clone()));

    let listener = tokio::net::TcpListener::bind(&server_config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", server_config.bind_address))?;
    info!(
        address = %server_config.bind_address,
        enforce_https = https.enforce,
        "Server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

fn print_routes(registry: &RouteRegistry) {
    println!(
        "{:<24} {:<7} {:<48} {:<7} PERMISSIONS",
        "NAME", "METHOD", "PATTERN", "PUBLIC"
    );
    for route in registry.routes() {
        println!(
            "{:<24} {:<7} {:<48} {:<7} {}",
            route.name(),
            route.method().as_str(),
            route.pattern(),
            route.is_public(),
            route.required_permissions().join(",")
        );
    }
}
