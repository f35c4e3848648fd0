//! Error types for the icon system.

use std::path::PathBuf;

/// Errors that can occur while loading icon artwork.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// I/O error.
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes could not be decoded as an image.
    #[error("Failed to decode icon: {0}")]
    Decode(#[from] image::ImageError),
}
