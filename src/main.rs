//! Item Image Server - serves PNG images from batch folders.
//!
//! This binary parses the configuration and starts the HTTP server.

use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use item_image_server::{
    config::Config,
    server::{create_router, RouterConfig},
    store::ImageStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("item-image-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Root folder: {}", config.root_folder);
    match &config.cors_origins {
        Some(origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS: any origin (credentials allowed)"),
    }

    // The root folder is re-checked on every request; a missing folder at
    // startup is worth a warning but not fatal.
    if !Path::new(&config.root_folder).is_dir() {
        warn!(
            "  Root folder '{}' does not exist yet; requests will return 500 until it appears",
            config.root_folder
        );
    }

    // Create the image store and router
    let store = ImageStore::new(&config.root_folder);
    let router_config = build_router_config(&config);
    let router = create_router(store, router_config);

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("Server listening on: http://{}", addr);
    info!("  Try: curl http://{}/health", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "item_image_server=debug,tower_http=debug"
    } else {
        "item_image_server=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new(&config.api_key);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}
