//! Preference stores.
//!
//! Preferences are string values with code-registered defaults. Stores notify
//! listeners when an effective value changes, which is how fill color edits
//! reach the themed icon cache.

mod error;
mod file;
mod fill_colors;
mod store;

pub use error::PreferenceError;
pub use file::{FilePreferenceStore, PREFERENCES_FILE};
pub use fill_colors::{fill_color_key, is_fill_color_key, PreferenceFillColors, FILL_COLOR_PREFIX};
pub use store::{MemoryPreferenceStore, PreferenceChange, PreferenceListener, PreferenceStore};
