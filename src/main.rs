use anyhow::Result;
use bookstore_core::{config::Config, migration, server, telemetry};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bookstore-core")]
#[command(author, version, about = "Online bookstore backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Create the database if needed and apply migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    telemetry::init(&config.log);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting Bookstore Core Service");
            info!("HTTP server listening on {}", config.http_addr());
            server::run(config).await
        }
        Command::Migrate => migration::run_migrations(&config).await,
    }
}
