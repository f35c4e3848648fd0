//! # Recolor Configuration
//!
//! The blend thresholds are empirical values tuned against the shipped icon
//! artwork. They are kept as configuration rather than hard-coded so that
//! alternative icon sets can tune them.
//!
//! ## Configuration File Format
//!
//! ```toml
//! [recolor]
//! distance_threshold = 60.0
//! min_brightness = 80
//! ```
//!
//! ## Environment Variables
//!
//! - `ARCHICON_RECOLOR_DISTANCE`: Overrides `distance_threshold`
//! - `ARCHICON_RECOLOR_BRIGHTNESS`: Overrides `min_brightness`

use std::env;

use serde::Deserialize;

use crate::color_match::{ColorMatch, DEFAULT_DISTANCE_THRESHOLD, DEFAULT_MIN_BRIGHTNESS};
use crate::error::ConfigError;

/// Thresholds controlling which pixels are treated as anti-aliased fill.
///
/// # Examples
///
/// ```rust
/// use archicon_theme::config::RecolorConfig;
///
/// let config = RecolorConfig::from_toml("[recolor]\nmin_brightness = 64").unwrap();
/// assert_eq!(config.min_brightness, 64);
/// assert_eq!(config.distance_threshold, 60.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecolorConfig {
    /// Maximum RGB distance from the fill color.
    pub distance_threshold: f64,
    /// Brightness a pixel must exceed to be blended.
    pub min_brightness: u8,
}

#[derive(Debug, Default, Deserialize)]
struct RecolorFile {
    #[serde(default)]
    recolor: RecolorConfig,
}

impl RecolorConfig {
    /// Create a configuration with the default thresholds.
    pub fn new() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            min_brightness: DEFAULT_MIN_BRIGHTNESS,
        }
    }

    /// Load from TOML content with a `[recolor]` table. Missing keys keep defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: RecolorFile = toml::from_str(content)?;
        file.recolor.validated()
    }

    /// Override thresholds from `ARCHICON_RECOLOR_*` environment variables.
    ///
    /// Unparsable values are logged and ignored.
    pub fn with_env_overrides(self) -> Self {
        let mut config = self;

        if let Ok(value) = env::var("ARCHICON_RECOLOR_DISTANCE") {
            match value.parse::<f64>() {
                Ok(distance) if distance.is_finite() && distance >= 0.0 => {
                    config.distance_threshold = distance
                },
                _ => log::warn!("Ignoring ARCHICON_RECOLOR_DISTANCE={:?}", value),
            }
        }

        if let Ok(value) = env::var("ARCHICON_RECOLOR_BRIGHTNESS") {
            match value.parse::<u8>() {
                Ok(brightness) => config.min_brightness = brightness,
                Err(e) => log::warn!("Ignoring ARCHICON_RECOLOR_BRIGHTNESS={:?}: {}", value, e),
            }
        }

        config
    }

    /// Check the thresholds are usable.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if !self.distance_threshold.is_finite() || self.distance_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(format!(
                "distance_threshold must be a non-negative number, got {}",
                self.distance_threshold
            )));
        }
        Ok(self)
    }

    /// The matcher these thresholds describe.
    pub fn color_match(&self) -> ColorMatch {
        ColorMatch::new(self.distance_threshold, self.min_brightness)
    }
}

impl Default for RecolorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<RecolorConfig> for ColorMatch {
    fn from(config: RecolorConfig) -> Self {
        config.color_match()
    }
}
