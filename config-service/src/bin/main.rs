use std::sync::Arc;

use clap::{Parser, Subcommand};
use common::db::{init_db_pool, run_migrations};
use config_service::{ConfigServiceConfig, PostgresPricingConfigRepository, PricingConfigService, RepositoryType};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pricing configuration CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Commands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective pricing configuration and rate tables
    Show {
        /// Use the built-in defaults instead of the database
        #[arg(long)]
        in_memory: bool,
    },
    /// Change one pricing setting
    Set {
        /// Setting key, e.g. markup.percentage
        key: String,
        /// New value
        value: String,
    },
    /// Apply database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "config_service={level},pricing_engine={level},common={level}",
            level = cli.log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ConfigServiceConfig::from_env();

    match cli.command {
        Commands::Show { in_memory } => {
            let service = if in_memory {
                PricingConfigService::with_repository(RepositoryType::InMemory).await?
            } else {
                PricingConfigService::with_config(&config).await?
            };

            let engine = service.engine().await?;
            let output = serde_json::json!({
                "config": engine.config(),
                "rateTables": engine.rate_table_summaries(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Set { key, value } => {
            let service = PricingConfigService::with_config(&config).await?;
            service.update_setting(&key, &value).await?;
            info!("Pricing setting {} updated", key);
        }
        Commands::Migrate => {
            let pool = init_db_pool(&config.database_url, config.db_pool_size).await?;
            run_migrations(&pool).await?;

            // Verify the migrated data parses
            let repo = Arc::new(PostgresPricingConfigRepository::from_pool(pool));
            PricingConfigService::new(repo).engine().await?;
            info!("Migrations applied and pricing configuration verified");
        }
    }

    Ok(())
}
