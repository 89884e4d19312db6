//! HTTP server layer for the item image server.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        HTTP Layer                            │
//! │   GET /item-image   GET /list-images   GET /health           │
//! │                                                              │
//! │  ┌─────────────┐  ┌─────────────┐  ┌──────────────────────┐  │
//! │  │  handlers   │  │    auth     │  │       routes         │  │
//! │  │ (requests)  │  │  (API key)  │  │  (router config)     │  │
//! │  └─────────────┘  └─────────────┘  └──────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::ApiKeyAuth;
pub use handlers::{
    health_handler, item_image_handler, list_images_handler, AppState, ErrorResponse,
    HealthResponse, ItemImageParams, ListImagesParams, ListImagesResponse,
};
pub use routes::{create_router, RouterConfig};
