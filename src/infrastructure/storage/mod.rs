//! Storage infrastructure: connection pooling and migrations

pub mod migrations;
pub mod postgres;

pub use migrations::{Migration, Migrator, PostgresMigrator};
pub use postgres::{connect, PostgresConfig};
