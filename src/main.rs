use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use herald::config;
use herald::constants;
use herald::listeners::{ListenerRegistry, WebhookDispatcher};
use herald::metrics;
use herald::network::ChainManager;
use herald::subscriptions;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Parse command line arguments
    let args = Args::parse();

    // Determine configuration path
    let config_path = args.config.unwrap_or_else(config::default_config_path);
    info!("Loading config from {}", config_path.display());

    // Load and validate configuration
    let config = match config::load_config(&config_path) {
        Ok(cfg) => {
            info!("Config loaded");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(anyhow::anyhow!("Configuration error: {}", e));
        }
    };

    info!("Notifications will be sent to {}", config.webhook_url);

    // Expose Prometheus metrics; a failure here is not fatal
    if let Err(e) = metrics::start_metrics_server(constants::metrics::METRICS_SERVER_PORT).await {
        warn!("Failed to start metrics server: {}", e);
    }

    // Resolve the configuration into subscription targets
    let targets = subscriptions::plan(&config);

    // Attach a listener for every target
    let chain_manager = Arc::new(ChainManager::new());
    let dispatcher = Arc::new(WebhookDispatcher::new(config.webhook_url.clone()));
    let registry = ListenerRegistry::new(chain_manager, dispatcher);

    let handles = registry.register_all(targets).await;

    if handles.is_empty() {
        warn!("No listeners registered, nothing to monitor");
        return Ok(());
    }

    // Run until killed; listeners have no teardown of their own
    futures::future::join_all(handles).await;

    Ok(())
}
