//! Error types for preference persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or saving preferences.
#[derive(Error, Debug)]
pub enum PreferenceError {
    /// Reading or writing the preferences file failed.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// The preferences file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The preferences file is not a valid TOML table of strings.
    #[error("Failed to parse preferences {path:?}: {source}")]
    Parse {
        /// The preferences file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// The preferences could not be encoded.
    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),

    /// The XDG base directories could not be determined.
    #[error("XDG base directory error: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
}

impl PreferenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
