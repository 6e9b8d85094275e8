//! Subscription tracking API
//!
//! A CRUD backend for user subscription records with a filtered
//! cost-aggregation endpoint, backed by PostgreSQL (or an in-memory
//! store for local development and tests).

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::{AppState, SubscriptionServiceTrait};
use config::StorageBackend;
use infrastructure::storage::{self, Migrator, PostgresConfig, PostgresMigrator};
use infrastructure::subscription::{
    InMemorySubscriptionRepository, PostgresSubscriptionRepository, SubscriptionService,
};

/// Assemble the application state from configuration.
///
/// For the postgres backend this opens the pool and applies pending
/// migrations before handing out the state.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let subscriptions: Arc<dyn SubscriptionServiceTrait> = match config.database.backend {
        StorageBackend::Postgres => {
            let pg_config = PostgresConfig::new(config.database.url())
                .with_max_connections(config.database.max_connections)
                .with_connect_timeout(config.database.connect_timeout_secs);

            let pool = storage::connect(&pg_config).await?;
            PostgresMigrator::new(pool.clone()).run().await?;

            let repository = Arc::new(PostgresSubscriptionRepository::new(pool));
            Arc::new(SubscriptionService::new(repository))
        }
        StorageBackend::Memory => {
            let repository = Arc::new(InMemorySubscriptionRepository::new());
            Arc::new(SubscriptionService::new(repository))
        }
    };

    Ok(AppState::new(subscriptions))
}
