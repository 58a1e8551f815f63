//! Pricing API server

use std::sync::Arc;

use api_gateway::config::AppConfig;
use api_gateway::AppState;
use clap::Parser;
use common::db::{init_db_pool, run_migrations};
use config_service::{
    ConfigServiceConfig, InMemoryPricingConfigRepository, PostgresPricingConfigRepository, PricingConfigService,
};
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address (defaults to PORT or 127.0.0.1:8080)
    #[clap(short, long)]
    addr: Option<String>,

    /// PostgreSQL URL (defaults to DATABASE_URL; the seeded in-memory store is used when neither is set)
    #[clap(long)]
    database_url: Option<String>,

    /// Apply database migrations before serving
    #[clap(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing with debug level if DEBUG=1 in .env
    let env_debug = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env_debug == "1" { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse("tower_http=debug,api_gateway=debug,config_service=debug,pricing_engine=debug")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    // Only set the global subscriber if it hasn't been set already
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        info!("Tracing initialized");
        if env_debug == "1" {
            debug!("Debug logging enabled");
        }
    }

    info!("Starting Shipbridge pricing server...");

    let app_config = AppConfig::new();
    let service_config = ConfigServiceConfig::from_env();
    let database_url = args.database_url.or(app_config.database_url.clone());

    let config_service = match database_url {
        Some(database_url) => {
            let pool = init_db_pool(&database_url, service_config.db_pool_size).await?;
            if args.migrate {
                run_migrations(&pool).await?;
            }
            let repo = Arc::new(PostgresPricingConfigRepository::from_pool(pool));
            PricingConfigService::new(repo).with_cache_ttl(service_config.cache_ttl_secs)
        }
        None => {
            if args.migrate {
                warn!("--migrate ignored: no database configured");
            }
            info!("No database configured, serving the default pricing configuration");
            let repo = Arc::new(InMemoryPricingConfigRepository::seeded());
            PricingConfigService::new(repo).with_cache_ttl(service_config.cache_ttl_secs)
        }
    };

    // Fail fast on a broken configuration instead of on the first request
    let engine = config_service.engine().await?;
    info!(
        "Pricing configuration loaded: {} rate tables, markup {}",
        engine.rate_tables().len(),
        engine.config().markup.percentage
    );

    let state = Arc::new(AppState::new(Arc::new(config_service)));

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api_gateway::router(state).layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(log_level))
            .on_request(DefaultOnRequest::new().level(log_level))
            .on_response(DefaultOnResponse::new().level(log_level)),
    );

    // Start the server
    let addr: std::net::SocketAddr = args.addr.unwrap_or(app_config.addr).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("Shutting down");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
