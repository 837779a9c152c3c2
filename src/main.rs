use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use filmoteka_api::api::{self, AppState};
use filmoteka_api::auth::AccessPolicy;
use filmoteka_api::config::AppConfig;
use filmoteka_api::database::{manager, CatalogRepository, MemoryCatalog, PgCatalogRepository};
use filmoteka_api::logging;

#[derive(Parser)]
#[command(name = "filmoteka")]
#[command(about = "Filmoteka - role-gated movie and actor catalog API")]
#[command(version)]
struct Args {
    #[arg(long, env = "FILMOTEKA_CONFIG", default_value = "config.yaml", help = "Path to the YAML config file")]
    config: PathBuf,

    #[arg(long, help = "Serve from an in-process catalog instead of PostgreSQL")]
    in_memory: bool,

    #[arg(long, help = "Override server.port from the config file")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env if present so DB_* and ADMIN_TOKEN overrides apply under cargo run
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = AppConfig::load(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    logging::init(&config.logger).context("failed to initialize logger")?;
    tracing::info!(config = %args.config.display(), "Starting Filmoteka API");

    let repository: Arc<dyn CatalogRepository> = if args.in_memory {
        tracing::warn!("Using in-memory catalog; data will not survive a restart");
        Arc::new(MemoryCatalog::new())
    } else {
        let pool = manager::connect(&config.db)
            .await
            .context("failed to connect to PostgreSQL")?;
        Arc::new(PgCatalogRepository::new(pool))
    };

    let state = AppState::new(repository, AccessPolicy::new(config.auth_token.admin.clone()));
    let app = api::router(state);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    let local: SocketAddr = listener.local_addr()?;

    tracing::info!(addr = %local, "Filmoteka API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
