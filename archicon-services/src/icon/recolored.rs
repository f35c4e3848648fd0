//! Image source that repaints another source's fill color on every pull.

use std::sync::Arc;

use archicon_theme::raster::Raster;
use archicon_theme::recolor::{ColorPair, Recolorer};

use crate::icon::source::ImageSource;

/// Wraps the original artwork and recolors each raster it yields.
///
/// Nothing is memoized: every zoom level is pulled from the original and
/// recolored independently, so consumers that ask for several zoom levels
/// over time always get matching pixel data.
pub struct RecoloredImageSource {
    original: Arc<dyn ImageSource>,
    pair: ColorPair,
    recolorer: Recolorer,
}

impl RecoloredImageSource {
    /// Recolor `original` from `pair.source()` to `pair.target()`.
    pub fn new(original: Arc<dyn ImageSource>, pair: ColorPair) -> Self {
        Self::with_recolorer(original, pair, Recolorer::default())
    }

    /// Same as [RecoloredImageSource::new] with custom thresholds.
    pub fn with_recolorer(original: Arc<dyn ImageSource>, pair: ColorPair, recolorer: Recolorer) -> Self {
        Self {
            original,
            pair,
            recolorer,
        }
    }

    /// The colors being replaced.
    pub fn pair(&self) -> ColorPair {
        self.pair
    }
}

impl ImageSource for RecoloredImageSource {
    fn image_data(&self, zoom: u32) -> Option<Raster> {
        let mut raster = self.original.image_data(zoom)?;
        self.recolorer.recolor(&mut raster, &self.pair);
        Some(raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use archicon_theme::color::Rgb;
    use archicon_theme::raster::Palette;

    use crate::icon::source::StaticImageSource;

    const FILL: Rgb = Rgb::new(255, 255, 181);
    const THEME: Rgb = Rgb::new(181, 220, 255);

    fn filled(size: u32) -> Raster {
        let pixels = vec![0; (size * size) as usize];
        Raster::with_pixels(size, size, Palette::indexed(vec![FILL]), pixels).unwrap()
    }

    #[test]
    fn test_every_zoom_is_recolored() {
        let original = StaticImageSource::new(filled(16)).with_variant(200, filled(32));
        let source = RecoloredImageSource::new(Arc::new(original), ColorPair::new(FILL, THEME).unwrap());

        for zoom in [100, 200] {
            let raster = source.image_data(zoom).unwrap();
            assert_eq!(raster.width(), 16 * zoom / 100);
            assert_eq!(raster.rgb_at(0, 0), THEME);
        }
    }

    #[test]
    fn test_original_is_pulled_on_every_call() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let counter = pulls.clone();
        let original = move |_zoom: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(filled(1))
        };
        let source = RecoloredImageSource::new(Arc::new(original), ColorPair::new(FILL, THEME).unwrap());

        source.image_data(100);
        source.image_data(100);

        assert_eq!(pulls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_missing_original_is_none() {
        let source = RecoloredImageSource::new(
            Arc::new(StaticImageSource::default()),
            ColorPair::new(FILL, THEME).unwrap(),
        );
        assert!(source.image_data(100).is_none());
    }
}
