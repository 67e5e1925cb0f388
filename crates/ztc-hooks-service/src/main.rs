//! # ZTC Hooks Service
//!
//! Binary entry point for the hook receiving service.
//!
//! This executable:
//! - Loads configuration from files and environment
//! - Initializes logging
//! - Starts the HTTP server with the logging hook handler

use std::sync::Arc;
use tracing::{error, info};
use ztc_hooks_service::{
    init_logging, start_server, LoggingConfig, LoggingHookHandler, ServiceConfig, ServiceError,
};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&LoggingConfig::default());
            error!(error = %e, "Failed to load service configuration; aborting");
            std::process::exit(3);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = config.validate() {
        error!(error = %e, "Service configuration is invalid; aborting");
        std::process::exit(3);
    }

    info!(
        host = %config.server.host,
        port = config.server.port,
        endpoint = %config.webhooks.endpoint_path,
        require_signature = config.verification.require_signature,
        tolerance_seconds = config.verification.tolerance_seconds,
        "Starting ZTC hooks service"
    );

    if let Err(e) = start_server(config, Arc::new(LoggingHookHandler)).await {
        error!("Failed to run server: {}", e);

        let exit_code = match e {
            ServiceError::BindFailed { .. } => 1,
            ServiceError::ServerFailed { .. } => 2,
            ServiceError::Configuration(_) => 3,
        };

        std::process::exit(exit_code);
    }
}
