//! HTTP request handlers for the item image API.
//!
//! # Endpoints
//!
//! - `GET /item-image?id=<id>&key=<key>` - Serve a PNG image by identifier
//! - `GET /list-images?key=<key>` - List PNG filenames per batch folder
//! - `GET /health` - Health check endpoint

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::LookupError;
use crate::store::ImageStore;

use super::auth::ApiKeyAuth;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state passed to all handlers via Axum's State
/// extractor. Immutable after construction.
pub struct AppState {
    /// Read-only view of the image tree
    pub store: Arc<ImageStore>,

    /// API key verifier
    pub auth: ApiKeyAuth,
}

impl AppState {
    /// Create a new application state.
    pub fn new(store: ImageStore, auth: ApiKeyAuth) -> Self {
        Self {
            store: Arc::new(store),
            auth,
        }
    }
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            auth: self.auth.clone(),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for `/item-image`.
///
/// Both parameters are required, but they are modeled as `Option` so a
/// missing `key` is rejected with the same 401 as a wrong key instead of a
/// deserialization failure.
#[derive(Debug, Deserialize)]
pub struct ItemImageParams {
    /// Image identifier without the `.png` extension
    #[serde(default)]
    pub id: Option<String>,

    /// API key
    #[serde(default)]
    pub key: Option<String>,
}

/// Query parameters for `/list-images`.
#[derive(Debug, Deserialize)]
pub struct ListImagesParams {
    /// API key
    #[serde(default)]
    pub key: Option<String>,
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "not_found", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status, always "ok"
    pub status: String,
}

/// Response from the list-images endpoint.
///
/// `images` always holds exactly the six fixed batch names as keys, each
/// mapping to the PNG filenames found in that folder (empty when the folder
/// is absent or holds none).
#[derive(Debug, Serialize)]
pub struct ListImagesResponse {
    pub images: BTreeMap<String, Vec<String>>,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert LookupError to an HTTP response.
///
/// Errors are logged based on severity: 5xx at ERROR, 401 at WARN, 404 at
/// DEBUG (common and expected).
impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            LookupError::InvalidKey => (StatusCode::UNAUTHORIZED, "unauthorized"),
            LookupError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            LookupError::RootFolderMissing { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "root_folder_missing")
            }
            LookupError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
        };
        let message = self.to_string();

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else if status == StatusCode::NOT_FOUND {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Resource not found: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);

        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle item image requests.
///
/// # Endpoint
///
/// `GET /item-image?id=<id>&key=<key>`
///
/// Validates the API key, then scans every batch subfolder of the root for
/// `<id>.png` and returns the first match.
///
/// # Response
///
/// - `200 OK`: image bytes with `Content-Type: image/png`
/// - `400 Bad Request`: missing `id` parameter
/// - `401 Unauthorized`: missing or invalid API key
/// - `404 Not Found`: no batch folder contains `<id>.png`
/// - `500 Internal Server Error`: root folder missing
pub async fn item_image_handler(
    State(state): State<AppState>,
    Query(params): Query<ItemImageParams>,
) -> Result<Response, LookupError> {
    info!(id = params.id.as_deref(), "item image requested");

    state.auth.verify(params.key.as_deref().unwrap_or_default())?;

    let Some(id) = params.id else {
        warn!("item image request missing id parameter");
        let body = ErrorResponse::with_status(
            "invalid_request",
            "Missing required parameter: id",
            StatusCode::BAD_REQUEST,
        );
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    };

    let path = state.store.find_image(&id).await?;
    let data = tokio::fs::read(&path).await.map_err(LookupError::from)?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png");

    // Preserve the original filename; skipped for names that are not valid
    // header values.
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if let Ok(value) = HeaderValue::from_str(&format!("inline; filename=\"{name}\"")) {
            builder = builder.header(header::CONTENT_DISPOSITION, value);
        }
    }

    let response = builder
        .body(axum::body::Body::from(data))
        .map_err(|e| LookupError::Io(e.to_string()))?;

    Ok(response)
}

/// Handle list-images requests.
///
/// # Endpoint
///
/// `GET /list-images?key=<key>`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "images": {
///     "batch-1": ["4f3a9c.png"],
///     "batch-2": [],
///     ...
///     "batch-6": []
///   }
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid API key
/// - `500 Internal Server Error`: root folder missing
pub async fn list_images_handler(
    State(state): State<AppState>,
    Query(params): Query<ListImagesParams>,
) -> Result<Json<ListImagesResponse>, LookupError> {
    info!("image listing requested");

    state.auth.verify(params.key.as_deref().unwrap_or_default())?;

    let images = state.store.list_images().await?;

    Ok(Json(ListImagesResponse { images }))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body `{"status":"ok"}`. No authentication.
pub async fn health_handler() -> Json<HealthResponse> {
    info!("health check");
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
