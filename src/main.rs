use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use taskboard_activity::activity::ActivityLog;
use taskboard_activity::cli::{self, Cli};
use taskboard_activity::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    // Logs go to stderr so feed output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::debug!("Connected to database");

    let log = ActivityLog::postgres(pool.clone());
    let result = cli::run(cli, &log).await;

    pool.close().await;
    result?;
    Ok(())
}
