#![warn(missing_docs)]

//! Theme-colored element icons for ArchiMate modeling tools.

pub use archicon_services as services;
pub use archicon_theme as theme;

/// A "prelude" for users of archicon.
///
/// Importing this module brings into scope the types needed to build a
/// themed icon factory over a preference store.
///
/// ```rust
/// use std::sync::Arc;
/// use archicon::prelude::*;
///
/// let providers = Arc::new(ProviderTable::new());
/// let store = Arc::new(MemoryPreferenceStore::new());
/// let fill_colors = Arc::new(PreferenceFillColors::new(store.clone(), providers.clone()));
/// let factory = Arc::new(ThemedIconFactory::new(providers, fill_colors));
/// factory.watch_preferences(store.as_ref());
///
/// assert!(factory.themed_image(&ElementType::element("BusinessActor")).is_none());
/// ```
pub mod prelude {
    // Colors and recoloring
    pub use crate::theme::color::Rgb;
    pub use crate::theme::color_match::ColorMatch;
    pub use crate::theme::config::RecolorConfig;
    pub use crate::theme::raster::{DirectPalette, Palette, Raster};
    pub use crate::theme::recolor::{ColorPair, Recolorer};

    // Model types and providers
    pub use crate::services::element::{ElementCategory, ElementType};
    pub use crate::services::provider::{
        ElementUiProvider, GraphicalObjectUiProvider, ObjectUiProvider, ProviderRegistry,
        ProviderTable,
    };

    // Themed icons
    pub use crate::services::icon::{
        FillColorResolver, ImageSource, PngImageSource, RecoloredImageSource, RefreshNotifier,
        StaticImageSource, ThemedIconFactory, ThemedImage,
    };

    // Preferences
    pub use crate::services::preferences::{
        FilePreferenceStore, MemoryPreferenceStore, PreferenceFillColors, PreferenceStore,
    };
    pub use crate::services::reports::HtmlReportPreferencesPage;
    pub use crate::services::settings::SettingsRegistry;
}
