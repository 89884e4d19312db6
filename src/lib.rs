//! # Item Image Server
//!
//! A small HTTP service that serves PNG item images stored in batch folders
//! under a configurable root directory, authorized by a static API key.
//!
//! The filesystem is the data store: images live at
//! `<root>/<batch>/<id>.png` and are looked up by identifier. The service
//! is strictly read-only with respect to the image tree and keeps no
//! cross-request state.
//!
//! ## Endpoints
//!
//! - `GET /health` - liveness check, no authentication
//! - `GET /item-image?id=<id>&key=<key>` - fetch a PNG by identifier,
//!   scanning every batch subfolder of the root
//! - `GET /list-images?key=<key>` - list PNG filenames for the fixed
//!   `batch-1` .. `batch-6` folders
//!
//! ## Architecture
//!
//! - [`store`] - Filesystem lookup and scan logic
//! - [`server`] - Axum-based HTTP server, routes, and API key auth
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error taxonomy and HTTP status mapping

pub mod config;
pub mod error;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::LookupError;
pub use server::{
    create_router, health_handler, item_image_handler, list_images_handler, ApiKeyAuth, AppState,
    ErrorResponse, HealthResponse, ItemImageParams, ListImagesParams, ListImagesResponse,
    RouterConfig,
};
pub use store::{ImageStore, BATCH_NAMES};
