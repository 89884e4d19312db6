use thiserror::Error;

/// Errors that can occur while resolving an image request.
///
/// Each variant maps to exactly one HTTP status code; the mapping lives in
/// [`crate::server::handlers`].
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// Supplied API key did not match the configured key.
    ///
    /// Never distinguishes a missing key from a wrong key.
    #[error("Invalid API key")]
    InvalidKey,

    /// The configured root folder does not exist as a directory.
    ///
    /// This is the only condition treated as a deployment fault rather than
    /// a client error.
    #[error("Root folder '{root}' not found")]
    RootFolderMissing { root: String },

    /// No batch folder contained a file matching the requested identifier.
    #[error("Item not found")]
    NotFound,

    /// Unexpected filesystem error while scanning or reading an image.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for LookupError {
    fn from(err: std::io::Error) -> Self {
        LookupError::Io(err.to_string())
    }
}
