//! Command-line interface

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "subtrack", about = "Subscription tracking API", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
    /// Apply pending database migrations
    Migrate(migrate::MigrateArgs),
}
