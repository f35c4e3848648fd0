use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use archicon_services::element::ElementType;
use archicon_services::icon::{ImageSource, StaticImageSource, ThemedIconFactory};
use archicon_services::preferences::{MemoryPreferenceStore, PreferenceFillColors, PreferenceStore};
use archicon_services::provider::{ElementUiProvider, ProviderTable};
use archicon_services::settings::SettingsRegistry;
use archicon_theme::color::Rgb;
use archicon_theme::color_match::ColorMatch;
use archicon_theme::raster::{Palette, Raster};
use archicon_theme::recolor::Recolorer;

const ACTOR_FILL: Rgb = Rgb::new(255, 255, 181);
const THEME_FILL: Rgb = Rgb::new(0, 128, 255);

fn actor() -> ElementType {
    ElementType::element("BusinessActor")
}

fn actor_artwork() -> Raster {
    let palette = Palette::indexed(vec![ACTOR_FILL, Rgb::BLACK]);
    Raster::with_pixels(2, 2, palette, vec![0, 1, 1, 0]).unwrap()
}

struct Fixture {
    store: Arc<MemoryPreferenceStore>,
    fill_colors: Arc<PreferenceFillColors>,
    factory: Arc<ThemedIconFactory>,
}

fn fixture_with(table: ProviderTable, configure: impl FnOnce(ThemedIconFactory) -> ThemedIconFactory) -> Fixture {
    let providers = Arc::new(table);
    let store = Arc::new(MemoryPreferenceStore::new());
    let fill_colors = Arc::new(PreferenceFillColors::new(store.clone(), providers.clone()));
    let factory = Arc::new(configure(ThemedIconFactory::new(providers, fill_colors.clone())));
    Fixture {
        store,
        fill_colors,
        factory,
    }
}

fn fixture() -> Fixture {
    let source: Arc<dyn ImageSource> = Arc::new(StaticImageSource::new(actor_artwork()));
    let table = ProviderTable::new()
        .with_provider("BusinessActor", Arc::new(ElementUiProvider::new(Some(ACTOR_FILL), Some(source))))
        .with_provider("Note", Arc::new(ElementUiProvider::new(None, None)));
    fixture_with(table, |factory| factory)
}

#[test]
fn test_unchanged_fill_color_has_no_themed_image() {
    let fixture = fixture();
    assert!(fixture.factory.themed_image(&actor()).is_none());
    assert!(fixture.factory.themed_image_source(&actor()).is_none());

    fixture.fill_colors.set_fill_color(&actor(), ACTOR_FILL);
    assert!(fixture.factory.themed_image(&actor()).is_none());
    assert!(fixture.factory.cache().is_empty());
}

#[test]
fn test_themed_image_uses_configured_color() {
    let fixture = fixture();
    fixture.fill_colors.set_fill_color(&actor(), THEME_FILL);

    let image = fixture.factory.themed_image(&actor()).unwrap();
    assert_eq!(image.raster().rgb_at(0, 0), THEME_FILL);
    assert_eq!(image.raster().rgb_at(1, 0), Rgb::BLACK);
    assert_eq!(image.raster().rgb_at(1, 1), THEME_FILL);
}

#[test]
fn test_themed_image_is_cached_until_refresh() {
    let fixture = fixture();
    fixture.fill_colors.set_fill_color(&actor(), THEME_FILL);

    let first = fixture.factory.themed_image(&actor()).unwrap();
    let second = fixture.factory.themed_image(&actor()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fixture.factory.cache().len(), 1);

    fixture.factory.refresh_themed_images();
    assert!(first.is_disposed());
    assert!(fixture.factory.cache().is_empty());

    let third = fixture.factory.themed_image(&actor()).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert!(!third.is_disposed());
    assert_eq!(first.raster(), third.raster());
}

#[test]
fn test_missing_inbuilt_color_has_no_themed_image() {
    let fixture = fixture();
    let note = ElementType::element("Note");
    fixture.store.set_value("defaultFillColor_Note", "#00ff00");

    assert!(fixture.factory.themed_image(&note).is_none());
    assert!(fixture.factory.themed_image_source(&note).is_none());
}

#[test]
fn test_unregistered_and_non_element_types_are_skipped() {
    let fixture = fixture();
    fixture.store.set_value("defaultFillColor_Node", "#00ff00");
    fixture.store.set_value("defaultFillColor_Junction", "#00ff00");

    assert!(fixture.factory.themed_image(&ElementType::element("Node")).is_none());
    assert!(fixture.factory.themed_image(&ElementType::junction()).is_none());
    assert!(fixture
        .factory
        .themed_image(&ElementType::relationship("Assignment"))
        .is_none());
}

#[test]
fn test_missing_artwork_is_not_cached() {
    let table = ProviderTable::new()
        .with_provider("BusinessActor", Arc::new(ElementUiProvider::new(Some(ACTOR_FILL), None)));
    let fixture = fixture_with(table, |factory| factory);
    fixture.fill_colors.set_fill_color(&actor(), THEME_FILL);

    assert!(fixture.factory.themed_image(&actor()).is_none());
    assert!(fixture.factory.themed_image_source(&actor()).is_none());
    assert!(fixture.factory.cache().is_empty());
}

#[test]
fn test_themed_image_source_recolors_each_zoom_lazily() {
    let pulls = Arc::new(AtomicUsize::new(0));
    let counted = pulls.clone();
    let source: Arc<dyn ImageSource> = Arc::new(move |zoom: u32| {
        counted.fetch_add(1, Ordering::SeqCst);
        let size = zoom / 50;
        let palette = Palette::indexed(vec![ACTOR_FILL]);
        Raster::new(size, size, palette).ok()
    });
    let table = ProviderTable::new()
        .with_provider("BusinessActor", Arc::new(ElementUiProvider::new(Some(ACTOR_FILL), Some(source))));
    let fixture = fixture_with(table, |factory| factory);
    fixture.fill_colors.set_fill_color(&actor(), THEME_FILL);

    let themed = fixture.factory.themed_image_source(&actor()).unwrap();
    assert_eq!(pulls.load(Ordering::SeqCst), 0);

    let normal = themed.image_data(100).unwrap();
    let hidpi = themed.image_data(200).unwrap();
    assert_eq!(normal.width(), 2);
    assert_eq!(hidpi.width(), 4);
    assert_eq!(normal.rgb_at(1, 1), THEME_FILL);
    assert_eq!(hidpi.rgb_at(3, 3), THEME_FILL);
    assert_eq!(pulls.load(Ordering::SeqCst), 2);

    // Sources are never cached.
    assert!(fixture.factory.cache().is_empty());
}

#[test]
fn test_refresh_notifies_listener() {
    let refreshes = Arc::new(AtomicUsize::new(0));
    let counted = refreshes.clone();
    let source: Arc<dyn ImageSource> = Arc::new(StaticImageSource::new(actor_artwork()));
    let table = ProviderTable::new()
        .with_provider("BusinessActor", Arc::new(ElementUiProvider::new(Some(ACTOR_FILL), Some(source))));
    let fixture = fixture_with(table, |factory| {
        factory.with_notifier(Arc::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        }))
    });

    fixture.factory.refresh_themed_images();
    fixture.factory.refresh_themed_images();
    assert_eq!(refreshes.load(Ordering::SeqCst), 2);
}

#[test]
fn test_fill_color_change_refreshes_cache() {
    let fixture = fixture();
    fixture.factory.watch_preferences(fixture.store.as_ref());
    fixture.fill_colors.set_fill_color(&actor(), THEME_FILL);

    let blue = fixture.factory.themed_image(&actor()).unwrap();

    // Unrelated keys leave the cache alone.
    fixture.store.set_value("HTMLReportPostProcessCommand", "true");
    assert!(!blue.is_disposed());
    assert_eq!(fixture.factory.cache().len(), 1);

    fixture.fill_colors.set_fill_color(&actor(), Rgb::new(255, 0, 0));
    assert!(blue.is_disposed());
    assert!(fixture.factory.cache().is_empty());

    let red = fixture.factory.themed_image(&actor()).unwrap();
    assert_eq!(red.raster().rgb_at(0, 0), Rgb::new(255, 0, 0));

    fixture.fill_colors.reset_fill_color(&actor());
    assert!(red.is_disposed());
    assert!(fixture.factory.themed_image(&actor()).is_none());
}

#[test]
fn test_dropped_factory_ignores_preference_changes() {
    let refreshes = Arc::new(AtomicUsize::new(0));
    let counted = refreshes.clone();
    let source: Arc<dyn ImageSource> = Arc::new(StaticImageSource::new(actor_artwork()));
    let table = ProviderTable::new()
        .with_provider("BusinessActor", Arc::new(ElementUiProvider::new(Some(ACTOR_FILL), Some(source))));
    let fixture = fixture_with(table, |factory| {
        factory.with_notifier(Arc::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        }))
    });
    fixture.factory.watch_preferences(fixture.store.as_ref());
    assert_eq!(fixture.store.listener_count(), 1);

    fixture.fill_colors.set_fill_color(&actor(), THEME_FILL);
    assert_eq!(refreshes.load(Ordering::SeqCst), 1);

    // The store must not keep the factory alive.
    let Fixture {
        store,
        fill_colors,
        factory,
    } = fixture;
    let weak = Arc::downgrade(&factory);
    drop(factory);
    assert!(weak.upgrade().is_none());

    fill_colors.set_fill_color(&actor(), Rgb::new(255, 0, 0));
    assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn test_prewarm_counts_cached_images() {
    let fixture = fixture();
    fixture.fill_colors.set_fill_color(&actor(), THEME_FILL);

    let elements = [actor(), ElementType::element("Note"), ElementType::junction()];
    assert_eq!(fixture.factory.prewarm(&elements), 1);
    assert_eq!(fixture.factory.cache().len(), 1);
}

#[test]
fn test_custom_zoom_and_thresholds() {
    let near_fill = Rgb::new(240, 240, 170);
    let palette = Palette::indexed(vec![ACTOR_FILL, near_fill]);
    let hidpi = Raster::with_pixels(2, 1, palette, vec![0, 1]).unwrap();
    let source: Arc<dyn ImageSource> = Arc::new(
        StaticImageSource::new(actor_artwork()).with_variant(200, hidpi),
    );
    let table = ProviderTable::new()
        .with_provider("BusinessActor", Arc::new(ElementUiProvider::new(Some(ACTOR_FILL), Some(source))));

    // A zero distance threshold only replaces exact matches.
    let exact_only = Recolorer::new(ColorMatch::new(0.0, 80));
    let fixture = fixture_with(table, |factory| factory.with_zoom(200).with_recolorer(exact_only));
    fixture.fill_colors.set_fill_color(&actor(), THEME_FILL);

    let image = fixture.factory.themed_image(&actor()).unwrap();
    assert_eq!(image.raster().width(), 2);
    assert_eq!(image.raster().height(), 1);
    assert_eq!(image.raster().rgb_at(0, 0), THEME_FILL);
    assert_eq!(image.raster().rgb_at(1, 0), near_fill);
}

#[test]
fn test_factory_follows_icon_settings() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[icons]\ndistance_threshold = 0.0\nzoom = 200\n").unwrap();

    let mut settings = SettingsRegistry::with_defaults();
    let results = smol::block_on(settings.load_from_paths_async(vec![config]));
    assert!(results.iter().all(Result::is_ok));

    let near_fill = Rgb::new(240, 240, 170);
    let hidpi = Raster::with_pixels(1, 2, Palette::indexed(vec![ACTOR_FILL, near_fill]), vec![0, 1]).unwrap();
    let source: Arc<dyn ImageSource> = Arc::new(
        StaticImageSource::new(actor_artwork()).with_variant(200, hidpi),
    );
    let table = ProviderTable::new()
        .with_provider("BusinessActor", Arc::new(ElementUiProvider::new(Some(ACTOR_FILL), Some(source))));
    let fixture = fixture_with(table, |factory| factory.with_settings(&settings));
    fixture.fill_colors.set_fill_color(&actor(), THEME_FILL);

    let image = fixture.factory.themed_image(&actor()).unwrap();
    assert_eq!(image.raster().height(), 2);
    assert_eq!(image.raster().rgb_at(0, 0), THEME_FILL);
    assert_eq!(image.raster().rgb_at(0, 1), near_fill);
}
