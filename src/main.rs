//! Event Registration - Main entry point
//!
//! Runs the registration MCP server over stdio.

use anyhow::Result;
use event_registration::notify::Notifier;
use event_registration::repositories::RegistrationRepository;
use event_registration::services::RegistrationService;
use event_registration::{
    Config, HttpNotifier, MemorySheetRepository, RegistrationMcpServer, RegistrationServiceImpl,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // LOG_LEVEL may come from .env, so load it before the subscriber
    let _ = dotenvy::dotenv();
    let fallback_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let repository = Arc::new(MemorySheetRepository::new(config.tab_capacity))
        as Arc<dyn RegistrationRepository>;

    let notifier = config.notify.as_ref().map(|notify| {
        info!("Confirmation emails enabled via {}", notify.api_url);
        Arc::new(HttpNotifier::new(notify, config.request_timeout)) as Arc<dyn Notifier>
    });
    if notifier.is_none() {
        info!("Confirmation emails disabled (NOTIFY_API_URL not set)");
    }

    let service = Arc::new(RegistrationServiceImpl::new(
        repository,
        notifier,
        config.tab_prefix.clone(),
    )) as Arc<dyn RegistrationService>;

    let server = RegistrationMcpServer::new(service);

    info!("Starting MCP server with stdio transport");
    event_registration::server::run_server(server).await?;

    info!("Event registration server shutdown complete");
    Ok(())
}
