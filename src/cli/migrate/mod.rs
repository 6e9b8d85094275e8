//! Migrate command - applies or reverts database migrations

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{self, Migrator, PostgresConfig, PostgresMigrator};

#[derive(Args)]
pub struct MigrateArgs {
    /// Revert the most recent migration instead of applying pending ones
    #[arg(long)]
    pub revert: bool,
}

/// Apply pending migrations (or revert the latest) against the
/// configured database
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let pg_config = PostgresConfig::new(config.database.url())
        .with_max_connections(config.database.max_connections)
        .with_connect_timeout(config.database.connect_timeout_secs);

    let pool = storage::connect(&pg_config).await?;
    let migrator = PostgresMigrator::new(pool);

    if args.revert {
        migrator.revert().await?;
    } else {
        migrator.run().await?;
    }

    let version = migrator.version().await?;
    info!(?version, "Migrations up to date");

    Ok(())
}
