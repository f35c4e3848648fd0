//! TOML file-backed preference store.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use xdg::BaseDirectories;

use crate::preferences::error::PreferenceError;
use crate::preferences::store::{MemoryPreferenceStore, PreferenceListener, PreferenceStore};

/// File name of the user preferences under the XDG config home.
pub const PREFERENCES_FILE: &str = "preferences.toml";

/// A [PreferenceStore] persisted as a flat TOML table of strings.
///
/// Only explicit values are written; defaults are registered by code at startup.
pub struct FilePreferenceStore {
    path: PathBuf,
    store: MemoryPreferenceStore,
}

impl FilePreferenceStore {
    /// Open the store at `path`, loading it if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let store = MemoryPreferenceStore::new();

        match fs::read_to_string(&path) {
            Ok(content) => {
                let values: BTreeMap<String, String> = toml::from_str(&content)
                    .map_err(|source| PreferenceError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                log::info!("Loaded {} preferences from {:?}", values.len(), path);
                store.replace_values(values);
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No preferences at {:?}, starting empty", path);
            },
            Err(e) => return Err(PreferenceError::io(path, e)),
        }

        Ok(Self { path, store })
    }

    /// Open the user's store at `$XDG_CONFIG_HOME/archicon/preferences.toml`.
    pub fn open_user() -> Result<Self, PreferenceError> {
        let xdg_dirs = BaseDirectories::with_prefix("archicon")?;
        Self::open(xdg_dirs.get_config_home().join(PREFERENCES_FILE))
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the explicit values, creating parent directories as needed.
    pub fn save(&self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PreferenceError::io(parent, e))?;
        }
        let content = toml::to_string(&self.store.values())?;
        fs::write(&self.path, content).map_err(|e| PreferenceError::io(&self.path, e))?;
        log::debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get_string(&self, key: &str) -> String {
        self.store.get_string(key)
    }

    fn default_string(&self, key: &str) -> String {
        self.store.default_string(key)
    }

    fn set_value(&self, key: &str, value: &str) {
        self.store.set_value(key, value)
    }

    fn set_default(&self, key: &str, value: &str) {
        self.store.set_default(key, value)
    }

    fn set_to_default(&self, key: &str) {
        self.store.set_to_default(key)
    }

    fn is_default(&self, key: &str) -> bool {
        self.store.is_default(key)
    }

    fn add_listener(&self, listener: PreferenceListener) {
        self.store.add_listener(listener)
    }
}
