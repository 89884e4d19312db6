//! Router configuration for the item image server.
//!
//! This module defines the HTTP routes and applies the CORS and tracing
//! middleware.
//!
//! # Route Structure
//!
//! ```text
//! /health       - Health check (public)
//! /item-image   - Fetch a PNG by identifier (key required)
//! /list-images  - List PNG filenames per batch folder (key required)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use item_image_server::server::routes::{create_router, RouterConfig};
//! use item_image_server::store::ImageStore;
//!
//! let store = ImageStore::new("all items");
//! let router = create_router(store, RouterConfig::new("my-api-key"));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::ApiKeyAuth;
use super::handlers::{health_handler, item_image_handler, list_images_handler, AppState};
use crate::store::ImageStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// The shared-secret API key the handlers verify
    pub api_key: String,

    /// Allowed CORS origins (None = reflect any request origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration with the given API key.
    ///
    /// By default:
    /// - CORS reflects any origin, with credentials allowed
    /// - Tracing is enabled
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass None (or don't call this method) to reflect any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// Builds the Axum router with the three endpoints, the CORS layer, and
/// optional request tracing. The API key is verified inside the protected
/// handlers (it travels as a query parameter) rather than in a middleware,
/// so the health check stays public.
pub fn create_router(store: ImageStore, config: RouterConfig) -> Router {
    let app_state = AppState::new(store, ApiKeyAuth::new(&config.api_key));

    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/item-image", get(item_image_handler))
        .route("/list-images", get(list_images_handler))
        .with_state(app_state)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
///
/// Credentials are always allowed, so the wildcard `Any` cannot be used;
/// the permissive default reflects the request's origin, methods, and
/// headers instead, which browsers treat the same way.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(AllowOrigin::mirror_request()),
        Some(origins) => {
            // Parse origins into HeaderValues
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
