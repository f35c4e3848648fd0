//! Themed icon factory.
//!
//! Icons are created by taking the original artwork and replacing the inbuilt
//! fill color with the fill color currently configured for the type.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use archicon_theme::color::Rgb;
use archicon_theme::recolor::{ColorPair, Recolorer};

use crate::element::ElementType;
use crate::icon::cache::{ThemedImage, ThemedImageCache, ThemedImageKey};
use crate::icon::recolored::RecoloredImageSource;
use crate::icon::source::{ImageSource, DEFAULT_ZOOM};
use crate::preferences::{is_fill_color_key, PreferenceChange, PreferenceListener, PreferenceStore};
use crate::provider::{ObjectUiProvider, ProviderRegistry};
use crate::settings::SettingsRegistry;

/// Resolves the fill color currently configured for a type.
pub trait FillColorResolver: Send + Sync {
    /// The configured fill color, if any.
    fn fill_color(&self, element: &ElementType) -> Option<Rgb>;
}

impl<F> FillColorResolver for F
where
    F: Fn(&ElementType) -> Option<Rgb> + Send + Sync,
{
    fn fill_color(&self, element: &ElementType) -> Option<Rgb> {
        self(element)
    }
}

/// Told when themed icons changed so views showing them can redraw.
pub trait RefreshNotifier: Send + Sync {
    /// Cached themed icons were dropped.
    fn themed_images_changed(&self);
}

impl<F> RefreshNotifier for F
where
    F: Fn() + Send + Sync,
{
    fn themed_images_changed(&self) {
        self()
    }
}

/// Creates icons painted with the configured fill colors.
pub struct ThemedIconFactory {
    providers: Arc<dyn ProviderRegistry>,
    fill_colors: Arc<dyn FillColorResolver>,
    notifier: Option<Arc<dyn RefreshNotifier>>,
    cache: ThemedImageCache,
    recolorer: Recolorer,
    zoom: u32,
    // Stores hold listeners weakly; they live as long as the factory.
    subscriptions: Mutex<Vec<PreferenceListener>>,
}

impl ThemedIconFactory {
    /// Create a factory over a provider lookup and a fill color resolver.
    pub fn new(providers: Arc<dyn ProviderRegistry>, fill_colors: Arc<dyn FillColorResolver>) -> Self {
        Self {
            providers,
            fill_colors,
            notifier: None,
            cache: ThemedImageCache::new(),
            recolorer: Recolorer::default(),
            zoom: DEFAULT_ZOOM,
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// Notify `notifier` after cached icons are dropped.
    pub fn with_notifier(mut self, notifier: Arc<dyn RefreshNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Use custom blend thresholds.
    pub fn with_recolorer(mut self, recolorer: Recolorer) -> Self {
        self.recolorer = recolorer;
        self
    }

    /// Realize cached icons at `zoom` percent instead of [DEFAULT_ZOOM].
    pub fn with_zoom(mut self, zoom: u32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Apply the `[icons]` settings: blend thresholds and realization zoom.
    pub fn with_settings(self, settings: &SettingsRegistry) -> Self {
        self.with_recolorer(Recolorer::new(settings.color_match()))
            .with_zoom(settings.icon_zoom())
    }

    /// The cache of realized icons.
    pub fn cache(&self) -> &ThemedImageCache {
        &self.cache
    }

    /// The themed icon for `element`, realized once and cached.
    ///
    /// Returns `None` when the type is not themed, has no inbuilt fill color,
    /// or its configured color equals the inbuilt one. Callers then show the
    /// original icon.
    pub fn themed_image(&self, element: &ElementType) -> Option<Arc<ThemedImage>> {
        let (provider, pair) = self.themed_colors(element)?;

        // The color is part of the key, so a color change gets a new image.
        let key = ThemedImageKey::new(element, pair.target());
        self.cache.get_or_realize(key, || {
            self.recolored_source(provider.as_ref(), pair)?
                .image_data(self.zoom)
        })
    }

    /// A new, uncached themed image source for `element`.
    ///
    /// The source recolors on every pull, so consumers that recreate icons
    /// after a color change, or need several zoom levels, get fresh data.
    pub fn themed_image_source(&self, element: &ElementType) -> Option<Arc<dyn ImageSource>> {
        let (provider, pair) = self.themed_colors(element)?;
        let source = self.recolored_source(provider.as_ref(), pair)?;
        Some(Arc::new(source))
    }

    /// Dispose all cached icons and tell dependent views to redraw.
    ///
    /// Call whenever fill color preferences change.
    pub fn refresh_themed_images(&self) {
        let dropped = self.cache.invalidate_all();
        log::debug!("ThemedIconFactory: dropped {} cached icons", dropped);

        if let Some(notifier) = &self.notifier {
            notifier.themed_images_changed();
        }
    }

    /// Refresh themed icons whenever a fill color preference in `store` changes.
    ///
    /// The listener holds the factory weakly. It is owned by the factory, so
    /// the store drops it once the factory is gone.
    pub fn watch_preferences(self: &Arc<Self>, store: &dyn PreferenceStore) {
        let factory: Weak<Self> = Arc::downgrade(self);
        let listener: PreferenceListener = Arc::new(move |change: &PreferenceChange| {
            if !is_fill_color_key(&change.key) {
                return;
            }
            if let Some(factory) = factory.upgrade() {
                log::info!("Fill color '{}' changed, refreshing themed icons", change.key);
                factory.refresh_themed_images();
            }
        });
        store.add_listener(listener.clone());
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Realize and cache the themed icons of `elements`. Returns how many are cached.
    pub fn prewarm<'a, I>(&self, elements: I) -> usize
    where
        I: IntoIterator<Item = &'a ElementType>,
    {
        elements
            .into_iter()
            .filter(|element| self.themed_image(element).is_some())
            .count()
    }

    fn themed_colors(&self, element: &ElementType) -> Option<(Arc<dyn ObjectUiProvider>, ColorPair)> {
        if !element.is_themable() {
            return None;
        }

        let provider = self.providers.provider_for(element)?;
        let Some(inbuilt) = provider.as_graphical().and_then(|g| g.default_color()) else {
            log::trace!("ThemedIconFactory: '{}' has no inbuilt fill color", element);
            return None;
        };
        let theme = self.fill_colors.fill_color(element)?;

        // Same colors need no themed icon
        let pair = ColorPair::new(inbuilt, theme)?;
        Some((provider, pair))
    }

    fn recolored_source(&self, provider: &dyn ObjectUiProvider, pair: ColorPair) -> Option<RecoloredImageSource> {
        let original = provider.image_source()?;
        Some(RecoloredImageSource::with_recolorer(original, pair, self.recolorer))
    }
}
