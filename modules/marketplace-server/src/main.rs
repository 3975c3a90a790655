use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use marketplace_server::routes;

#[derive(Parser)]
#[command(name = "marketplace-server", about = "Marketplace read-model GraphQL server")]
struct Cli {
    /// Path to config TOML file
    #[arg(long, default_value = "./config/marketplace.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting marketplace-server");

    let cli = Cli::parse();

    let config_path = cli.config.canonicalize().with_context(|| {
        format!(
            "Config file not found: {}. Create one or specify --config <path>",
            cli.config.display()
        )
    })?;

    tracing::info!(config = %config_path.display(), "Loading config");

    let file_config = Arc::new(marketplace_core::file_config::load_config(&config_path)?);

    // Load secrets from env vars
    let config = marketplace_core::AppConfig::from_env()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(file_config.database.max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = file_config.database.max_connections,
        "Connected to database"
    );

    sqlx::migrate!("../../migrations").run(&pool).await?;
    tracing::info!("Migrations complete");

    let addr = format!("{}:{}", file_config.server.host, file_config.server.port);
    let graphql_path = file_config.server.graphql_path.clone();

    let deps = Arc::new(marketplace_core::ServerDeps::new(pool, config, file_config));
    let app = routes::build_router(deps);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(addr = %addr, path = %graphql_path, "GraphQL endpoint ready");

    axum::serve(listener, app).await?;

    Ok(())
}
