use anyhow::Result;
use archicon_theme::color_match::ColorMatch;
use archicon_theme::config::RecolorConfig;
use serde::Deserialize;
use smol::fs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

use crate::icon::DEFAULT_ZOOM;
use crate::preferences::PREFERENCES_FILE;

const PREFIX: &str = "archicon";
const CONFIG_FILE: &str = "config.toml";

/// The main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Themed icon settings
    #[serde(default)]
    pub icons: IconSettings,
    /// Any other sections are captured here
    #[serde(flatten)]
    pub other: HashMap<String, toml::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IconSettings {
    /// Maximum RGB distance for anti-aliased fill pixels.
    pub distance_threshold: Option<f64>,
    /// Brightness a pixel must exceed to be blended.
    pub min_brightness: Option<u8>,
    /// Zoom level (percent) cached icons are realized at.
    pub zoom: Option<u32>,
}

/// Registry for managing settings.
pub struct SettingsRegistry {
    config: Config,
}

impl SettingsRegistry {
    /// Create a new SettingsRegistry and load configuration from standard locations.
    pub async fn new() -> Result<Self> {
        let mut registry = Self::with_defaults();
        registry.load().await?;
        Ok(registry)
    }

    /// A registry holding only built-in defaults.
    pub fn with_defaults() -> Self {
        let recolor = RecolorConfig::default();
        Self {
            config: Config {
                icons: IconSettings {
                    distance_threshold: Some(recolor.distance_threshold),
                    min_brightness: Some(recolor.min_brightness),
                    zoom: Some(DEFAULT_ZOOM),
                },
                other: HashMap::new(),
            },
        }
    }

    /// Load configuration from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/archicon/config.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/archicon/config.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/archicon/config.toml (XDG_CONFIG_HOME)
    pub async fn load(&mut self) -> Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix(PREFIX)?;

        // 1. Load from system data directories
        for path in xdg_dirs.find_data_files(CONFIG_FILE).rev() {
            self.load_file(&path).await;
        }

        // 2. Load from system config directories
        for path in xdg_dirs.find_config_files(CONFIG_FILE).rev() {
            self.load_file(&path).await;
        }

        // 3. Load from user config directory
        let user_config_path = xdg_dirs.get_config_home().join(CONFIG_FILE);
        if user_config_path.exists() {
            self.load_file(&user_config_path).await;
        }

        Ok(())
    }

    async fn load_file(&mut self, path: &Path) {
        log::info!("Loading config from: {:?}", path);
        match fs::read_to_string(path).await {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(loaded_config) => {
                    self.merge(loaded_config);
                },
                Err(e) => {
                    log::error!("Failed to parse config file {:?}: {}", path, e);
                },
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
            },
        }
    }

    /// Merge a loaded config into the current config.
    fn merge(&mut self, other: Config) {
        // Icons
        if let Some(distance) = other.icons.distance_threshold {
            self.config.icons.distance_threshold = Some(distance);
        }
        if let Some(brightness) = other.icons.min_brightness {
            self.config.icons.min_brightness = Some(brightness);
        }
        if let Some(zoom) = other.icons.zoom {
            self.config.icons.zoom = Some(zoom);
        }

        // Other
        self.config.other.extend(other.other);
    }

    /// Get the current configuration.
    pub fn get(&self) -> &Config {
        &self.config
    }

    /// Blend thresholds for themed icons.
    ///
    /// `ARCHICON_RECOLOR_*` environment variables override the files. Invalid
    /// values fall back to defaults.
    pub fn recolor_config(&self) -> RecolorConfig {
        let defaults = RecolorConfig::default();
        let config = RecolorConfig {
            distance_threshold: self
                .config
                .icons
                .distance_threshold
                .unwrap_or(defaults.distance_threshold),
            min_brightness: self
                .config
                .icons
                .min_brightness
                .unwrap_or(defaults.min_brightness),
        };
        config.with_env_overrides().validated().unwrap_or_else(|e| {
            log::warn!("{}, using defaults", e);
            defaults
        })
    }

    /// The matcher described by [SettingsRegistry::recolor_config].
    pub fn color_match(&self) -> ColorMatch {
        self.recolor_config().color_match()
    }

    /// Zoom level cached icons are realized at.
    pub fn icon_zoom(&self) -> u32 {
        self.config.icons.zoom.filter(|&zoom| zoom > 0).unwrap_or(DEFAULT_ZOOM)
    }

    /// Where the user's preferences are stored.
    pub fn preferences_path(&self) -> Result<PathBuf> {
        let xdg_dirs = BaseDirectories::with_prefix(PREFIX)?;
        Ok(xdg_dirs.get_config_home().join(PREFERENCES_FILE))
    }

    /// Load configuration from multiple custom paths asynchronously.
    pub async fn load_from_paths_async(&mut self, paths: Vec<PathBuf>) -> Vec<anyhow::Result<()>> {
        let mut results = Vec::new();

        for path in paths {
            let result = async {
                let content = fs::read_to_string(&path)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to read config file {:?}: {}", path, e))?;

                let loaded_config: Config = toml::from_str(&content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse config file {:?}: {}", path, e))?;

                self.merge(loaded_config);
                Ok(())
            }
            .await;

            results.push(result);
        }

        results
    }

    /// Reload configuration asynchronously (re-runs the full load process).
    pub async fn reload_async(&mut self) -> anyhow::Result<()> {
        *self = Self::with_defaults();
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_only_given_values() {
        let mut registry = SettingsRegistry::with_defaults();

        let new_config: Config = toml::from_str(
            r#"
            [icons]
            min_brightness = 64

            [palette]
            columns = 3
            "#,
        )
        .unwrap();

        registry.merge(new_config);

        assert_eq!(registry.get().icons.min_brightness, Some(64));
        assert_eq!(registry.get().icons.distance_threshold, Some(60.0));
        assert!(registry.get().other.contains_key("palette"));
        assert_eq!(registry.color_match(), ColorMatch::new(60.0, 64));
    }

    #[test]
    fn test_invalid_distance_falls_back() {
        let mut registry = SettingsRegistry::with_defaults();
        registry.merge(toml::from_str("[icons]\ndistance_threshold = -3.0").unwrap());
        assert_eq!(registry.recolor_config(), RecolorConfig::default());
    }

    #[test]
    fn test_zero_zoom_falls_back() {
        let mut registry = SettingsRegistry::with_defaults();
        assert_eq!(registry.icon_zoom(), 100);
        registry.merge(toml::from_str("[icons]\nzoom = 0").unwrap());
        assert_eq!(registry.icon_zoom(), 100);
        registry.merge(toml::from_str("[icons]\nzoom = 200").unwrap());
        assert_eq!(registry.icon_zoom(), 200);
    }

    #[test]
    fn test_load_from_paths_reports_each_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.toml");
        let bad = dir.path().join("bad.toml");
        std::fs::write(&good, "[icons]\nzoom = 150\n").unwrap();
        std::fs::write(&bad, "[icons\n").unwrap();

        let mut registry = SettingsRegistry::with_defaults();
        let results = smol::block_on(registry.load_from_paths_async(vec![
            good,
            bad,
            dir.path().join("missing.toml"),
        ]));

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_err());
        assert_eq!(registry.icon_zoom(), 150);
    }
}
