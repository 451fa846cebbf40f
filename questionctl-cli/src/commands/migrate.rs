//! Apply schema migrations and exit

use anyhow::{Context, Result};
use clap::Parser;

use questionctl_server::db::{create_pool, run_migrations, DEFAULT_DATABASE_URL};

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&args.database_url)
        .await
        .context("Failed to create database pool")?;

    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    pool.close().await;
    Ok(())
}
