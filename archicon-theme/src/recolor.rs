//! Fill color substitution for icon rasters.

use crate::color::Rgb;
use crate::color_match::{blend, ColorMatch};
use crate::raster::{Palette, Raster};

/// The inbuilt fill color of some artwork and the theme color replacing it.
///
/// Only exists when the two colors differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair {
    source: Rgb,
    target: Rgb,
}

impl ColorPair {
    /// Pair `source` with `target`, or `None` if there is nothing to replace.
    pub fn new(source: Rgb, target: Rgb) -> Option<Self> {
        (source != target).then_some(Self { source, target })
    }

    /// The color baked into the artwork.
    pub fn source(&self) -> Rgb {
        self.source
    }

    /// The color to paint instead.
    pub fn target(&self) -> Rgb {
        self.target
    }
}

/// Rewrites a raster's fill color, blending anti-aliased edge pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Recolorer {
    matcher: ColorMatch,
}

impl Recolorer {
    /// Create a recolorer with custom closeness thresholds.
    pub fn new(matcher: ColorMatch) -> Self {
        Self { matcher }
    }

    /// The thresholds in use.
    pub fn matcher(&self) -> &ColorMatch {
        &self.matcher
    }

    /// Recolor `raster` in place and return how many palette entries
    /// (indexed) or pixels (direct) changed.
    pub fn recolor(&self, raster: &mut Raster, pair: &ColorPair) -> usize {
        self.replace(raster, pair.source, pair.target)
    }

    /// Recolor `raster` from `source` to `target`. Equal colors are a no-op.
    pub fn replace(&self, raster: &mut Raster, source: Rgb, target: Rgb) -> usize {
        if source == target {
            return 0;
        }

        let (palette, pixels) = raster.parts_mut();
        let changed = match palette {
            // Only the color table changes; every pixel referencing an entry follows it.
            Palette::Indexed(colors) => {
                let mut changed = 0;
                for entry in colors.iter_mut() {
                    let replacement = if *entry == source {
                        target
                    } else if self.matcher.is_close(*entry, source) {
                        blend(*entry, source, target)
                    } else {
                        continue;
                    };
                    if replacement != *entry {
                        changed += 1;
                    }
                    *entry = replacement;
                }
                changed
            },
            Palette::Direct(layout) => {
                let source_pixel = layout.encode(source);
                let target_pixel = layout.encode(target);
                let mut changed = 0;
                for pixel in pixels.iter_mut() {
                    let color = layout.decode(*pixel);
                    let replacement = if *pixel == source_pixel || color == source {
                        target_pixel
                    } else if self.matcher.is_close(color, source) {
                        layout.encode(blend(color, source, target))
                    } else {
                        continue;
                    };
                    if replacement != *pixel {
                        changed += 1;
                    }
                    *pixel = replacement;
                }
                changed
            },
        };

        log::trace!("Recolored {} -> {}: {} entries changed", source, target, changed);
        changed
    }
}
