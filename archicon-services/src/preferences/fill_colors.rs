//! Per-type fill colors stored as preferences.

use std::sync::Arc;

use archicon_theme::color::Rgb;

use crate::element::ElementType;
use crate::icon::FillColorResolver;
use crate::preferences::store::PreferenceStore;
use crate::provider::ProviderRegistry;

/// Prefix of the preference keys holding per-type fill colors.
pub const FILL_COLOR_PREFIX: &str = "defaultFillColor_";

/// The preference key for the fill color of `element`.
pub fn fill_color_key(element: &ElementType) -> String {
    format!("{FILL_COLOR_PREFIX}{}", element.name())
}

/// Whether `key` holds a fill color.
pub fn is_fill_color_key(key: &str) -> bool {
    key.starts_with(FILL_COLOR_PREFIX)
}

/// Resolves fill colors from a preference store.
///
/// Types without a stored (or with an unparsable) color use the inbuilt
/// color of their artwork.
pub struct PreferenceFillColors {
    store: Arc<dyn PreferenceStore>,
    providers: Arc<dyn ProviderRegistry>,
}

impl PreferenceFillColors {
    /// Create a resolver over `store`, falling back to `providers`' inbuilt colors.
    pub fn new(store: Arc<dyn PreferenceStore>, providers: Arc<dyn ProviderRegistry>) -> Self {
        Self { store, providers }
    }

    /// Store `color` as the fill color of `element`.
    pub fn set_fill_color(&self, element: &ElementType, color: Rgb) {
        self.store.set_value(&fill_color_key(element), &color.to_hex());
    }

    /// Go back to the inbuilt fill color of `element`.
    pub fn reset_fill_color(&self, element: &ElementType) {
        self.store.set_to_default(&fill_color_key(element));
    }

    fn inbuilt_color(&self, element: &ElementType) -> Option<Rgb> {
        let provider = self.providers.provider_for(element)?;
        provider.as_graphical()?.default_color()
    }
}

impl FillColorResolver for PreferenceFillColors {
    fn fill_color(&self, element: &ElementType) -> Option<Rgb> {
        let key = fill_color_key(element);
        let value = self.store.get_string(&key);
        if !value.is_empty() {
            match Rgb::from_hex(&value) {
                Ok(color) => return Some(color),
                Err(e) => log::warn!("Ignoring preference '{}': {}", key, e),
            }
        }
        self.inbuilt_color(element)
    }
}
