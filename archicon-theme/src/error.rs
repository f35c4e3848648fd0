//! # Theme Error Types
//!
//! Errors raised while building rasters, parsing colors and loading
//! recolor configuration. Recoloring itself never fails.

use thiserror::Error;

/// Errors that can occur when constructing a [Raster](crate::raster::Raster).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// The pixel buffer does not hold `width * height` entries.
    #[error("Raster of {width}x{height} needs {expected} pixels, got {actual}")]
    PixelCountMismatch {
        /// Raster width.
        width: u32,
        /// Raster height.
        height: u32,
        /// Number of pixels required.
        expected: usize,
        /// Number of pixels supplied.
        actual: usize,
    },

    /// The alpha plane does not hold one byte per pixel.
    #[error("Alpha plane needs {expected} bytes, got {actual}")]
    AlphaLengthMismatch {
        /// Number of bytes required.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },

    /// An indexed pixel refers past the end of the color table.
    #[error("Pixel index {index} out of range for a palette of {len} colors")]
    IndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Size of the color table.
        len: usize,
    },

    /// A direct palette channel has no bits.
    #[error("Direct palette {channel} mask is empty")]
    EmptyMask {
        /// Name of the channel.
        channel: &'static str,
    },
}

impl RasterError {
    /// Create a pixel count mismatch error.
    pub fn pixel_count(width: u32, height: u32, actual: usize) -> Self {
        Self::PixelCountMismatch {
            width,
            height,
            expected: width as usize * height as usize,
            actual,
        }
    }
}

/// Errors that can occur when parsing a hex color string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Not six hex digits.
    #[error("Hex color must be 6 characters: '{0}'")]
    InvalidLength(String),

    /// A character is not a hex digit.
    #[error("Invalid hex color: '{0}'")]
    InvalidDigit(String),
}

/// Errors that can occur when loading a [RecolorConfig](crate::config::RecolorConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error parsing the TOML content.
    #[error("Failed to parse recolor config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A threshold is outside its allowed range.
    #[error("Invalid recolor threshold: {0}")]
    InvalidThreshold(String),
}

/// Result type alias for raster operations.
pub type RasterResult<T> = Result<T, RasterError>;
