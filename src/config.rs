//! Configuration management for the item image server.
//!
//! Configuration is parsed from command-line arguments with environment
//! variable fallbacks and sensible defaults for every setting.
//!
//! # Environment Variables
//!
//! - `IMG_HOST` - Server bind address (default: 0.0.0.0)
//! - `IMG_PORT` - Server port (default: 8000)
//! - `API_KEY` - Shared-secret API key (default: NRCODEX)
//! - `ROOT_FOLDER` - Root directory containing the batch folders (default: "all items")
//! - `IMG_CORS_ORIGINS` - Comma-separated CORS origin allow-list

use clap::Parser;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default API key when none is configured.
pub const DEFAULT_API_KEY: &str = "NRCODEX";

/// Default root folder holding the batch subfolders.
pub const DEFAULT_ROOT_FOLDER: &str = "all items";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Item Image Server - serves PNG images from batch folders.
///
/// Images live under a root folder as `<root>/<batch>/<id>.png` and are
/// looked up by identifier. Requests are authorized with a static API key
/// passed as a query parameter.
#[derive(Parser, Debug, Clone)]
#[command(name = "item-image-server")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "IMG_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "IMG_PORT")]
    pub port: u16,

    // =========================================================================
    // Authentication Configuration
    // =========================================================================
    /// Shared-secret API key clients must supply via the `key` query parameter.
    #[arg(long, default_value = DEFAULT_API_KEY, env = "API_KEY")]
    pub api_key: String,

    // =========================================================================
    // Storage Configuration
    // =========================================================================
    /// Root directory containing the batch folders with PNG images.
    #[arg(long, default_value = DEFAULT_ROOT_FOLDER, env = "ROOT_FOLDER")]
    pub root_folder: String,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, any origin is allowed (with credentials).
    #[arg(long, env = "IMG_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("API key must not be empty. Set --api-key or API_KEY".to_string());
        }

        if self.root_folder.is_empty() {
            return Err(
                "Root folder path must not be empty. Set --root-folder or ROOT_FOLDER".to_string(),
            );
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
