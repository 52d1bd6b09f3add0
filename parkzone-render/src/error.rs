//! Errors raised while rendering or saving a map.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors from [`crate::MapDocument`].
#[derive(Debug, Error)]
pub enum RenderError {
    /// The map payload could not be serialised.
    #[error("failed to serialise map data: {0}")]
    Payload(#[from] serde_json::Error),
    /// The rendered page could not be written.
    #[error("failed to write map to {path}: {source}")]
    Write {
        /// Destination that was attempted.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
