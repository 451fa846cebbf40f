//! HTTP server command
//!
//! Connects storage, applies migrations and runs the question API.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use questionctl_server::db::{
    create_pool_with_options, run_migrations, MemoryQuestionStore, PgQuestionStore,
    DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS,
};
use questionctl_server::http::server::REQUEST_TIMEOUT_SECS;
use questionctl_server::http::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "QUESTIONCTL_BIND", default_value = "0.0.0.0:8888")]
    pub bind: SocketAddr,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Keep questions in process memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let state = if args.in_memory {
        tracing::warn!("Using in-memory storage; data is lost on shutdown");
        AppState::new(MemoryQuestionStore::new())
    } else {
        let pool = create_pool_with_options(&args.database_url, args.max_connections)
            .await
            .context("Failed to create database pool")?;

        // A failed migration is logged, not fatal: the table may already exist.
        if let Err(e) = run_migrations(&pool).await {
            tracing::error!("failed to migrate database: {}", e);
        }

        AppState::new(PgQuestionStore::new(pool))
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.timeout_secs),
    };

    tracing::info!("Starting questionctl server on {}", config.bind_addr);
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
