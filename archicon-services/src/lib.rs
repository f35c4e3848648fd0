//! Services behind archicon's themed icons.
//!
//! - [element] and [provider] describe model types and the artwork they ship.
//! - [icon] recolors that artwork with configured fill colors and caches the result.
//! - [preferences] stores the fill colors (and other string preferences) and
//!   notifies listeners on change.
//! - [reports] holds the HTML report preferences.
//! - [settings] loads layered application configuration.

pub mod element;
pub mod icon;
pub mod preferences;
pub mod provider;
pub mod reports;
pub mod settings;

pub use element::{ElementCategory, ElementType};
pub use icon::{ThemedIconFactory, ThemedImage};
pub use provider::{ElementUiProvider, ObjectUiProvider, ProviderTable};
