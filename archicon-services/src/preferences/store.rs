//! String-valued preference stores with defaults and change listeners.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, Weak};

/// A change to a preference's effective value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceChange {
    /// The preference key.
    pub key: String,
    /// The effective value before the change.
    pub old_value: String,
    /// The effective value after the change.
    pub new_value: String,
}

/// Callback invoked after a preference's effective value changes.
///
/// Stores hold listeners weakly: a listener is called for as long as the
/// caller keeps its `Arc` alive, and is pruned once it is dropped.
pub type PreferenceListener = Arc<dyn Fn(&PreferenceChange) + Send + Sync>;

type WeakListener = Weak<dyn Fn(&PreferenceChange) + Send + Sync>;

/// A store of string preferences, each with an optional default.
///
/// The effective value of a key is its explicit value, else its default,
/// else the empty string.
pub trait PreferenceStore: Send + Sync {
    /// The effective value of `key`.
    fn get_string(&self, key: &str) -> String;

    /// The default value of `key`, or the empty string.
    fn default_string(&self, key: &str) -> String;

    /// Set an explicit value. Setting the default value removes the explicit one.
    fn set_value(&self, key: &str, value: &str);

    /// Set the default value of `key`.
    fn set_default(&self, key: &str, value: &str);

    /// Remove the explicit value of `key`.
    fn set_to_default(&self, key: &str);

    /// Whether `key` has no explicit value.
    fn is_default(&self, key: &str) -> bool;

    /// Call `listener` after every change to an effective value, until it is dropped.
    fn add_listener(&self, listener: PreferenceListener);
}

#[derive(Debug, Default)]
struct PreferenceState {
    values: BTreeMap<String, String>,
    defaults: BTreeMap<String, String>,
}

impl PreferenceState {
    fn effective(&self, key: &str) -> String {
        self.values
            .get(key)
            .or_else(|| self.defaults.get(key))
            .cloned()
            .unwrap_or_default()
    }
}

/// An in-memory [PreferenceStore].
#[derive(Default)]
pub struct MemoryPreferenceStore {
    state: RwLock<PreferenceState>,
    listeners: RwLock<Vec<WeakListener>>,
}

impl MemoryPreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the explicit (non-default) values.
    pub fn values(&self) -> BTreeMap<String, String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values
            .clone()
    }

    /// Number of listeners still alive.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|listener| listener.strong_count() > 0)
            .count()
    }

    /// Replace all explicit values without notifying listeners.
    pub fn replace_values(&self, values: BTreeMap<String, String>) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .values = values;
    }

    /// Apply `update` to the state and notify listeners if the effective value changed.
    fn update<F>(&self, key: &str, update: F)
    where
        F: FnOnce(&mut PreferenceState),
    {
        let change = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let old_value = state.effective(key);
            update(&mut state);
            let new_value = state.effective(key);
            (old_value != new_value).then(|| PreferenceChange {
                key: key.to_string(),
                old_value,
                new_value,
            })
        };

        if let Some(change) = change {
            log::debug!("Preference '{}' changed", change.key);
            // Listeners run without locks held so they can read the store.
            let listeners: Vec<PreferenceListener> = {
                let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
                listeners.retain(|weak| weak.strong_count() > 0);
                listeners.iter().filter_map(Weak::upgrade).collect()
            };
            for listener in listeners {
                listener(&change);
            }
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_string(&self, key: &str) -> String {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .effective(key)
    }

    fn default_string(&self, key: &str) -> String {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .defaults
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    fn set_value(&self, key: &str, value: &str) {
        self.update(key, |state| {
            let default = state.defaults.get(key).map_or("", String::as_str);
            if value == default {
                state.values.remove(key);
            } else {
                state.values.insert(key.to_string(), value.to_string());
            }
        });
    }

    fn set_default(&self, key: &str, value: &str) {
        self.update(key, |state| {
            state.defaults.insert(key.to_string(), value.to_string());
        });
    }

    fn set_to_default(&self, key: &str) {
        self.update(key, |state| {
            state.values.remove(key);
        });
    }

    fn is_default(&self, key: &str) -> bool {
        !self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values
            .contains_key(key)
    }

    fn add_listener(&self, listener: PreferenceListener) {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|weak| weak.strong_count() > 0);
        listeners.push(Arc::downgrade(&listener));
    }
}
