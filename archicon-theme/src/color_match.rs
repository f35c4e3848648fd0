//! Closeness test and ratio-preserving blend for anti-aliased fill pixels.

use crate::color::Rgb;

/// Default maximum RGB distance for a pixel to count as a blend of the fill color.
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 60.0;
/// Default brightness a pixel must exceed; darker pixels are outline strokes.
pub const DEFAULT_MIN_BRIGHTNESS: u8 = 80;

/// Decides which pixels are anti-aliased variants of a fill color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatch {
    /// Pixels further than this from the fill color are left alone.
    pub distance_threshold: f64,
    /// Pixels whose average brightness is at or below this are left alone.
    pub min_brightness: u8,
}

impl ColorMatch {
    /// Create a matcher with explicit thresholds.
    pub const fn new(distance_threshold: f64, min_brightness: u8) -> Self {
        Self {
            distance_threshold,
            min_brightness,
        }
    }

    /// Whether `pixel` is close enough to `source` to be treated as a blend of it.
    pub fn is_close(&self, pixel: Rgb, source: Rgb) -> bool {
        if pixel.distance(&source) > self.distance_threshold {
            return false;
        }
        pixel.brightness() > self.min_brightness
    }
}

impl Default for ColorMatch {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE_THRESHOLD, DEFAULT_MIN_BRIGHTNESS)
    }
}

/// Remap `pixel` from `source` to `target`, keeping each channel's ratio.
///
/// A zero source channel has ratio 1, so the target channel is used as is.
pub fn blend(pixel: Rgb, source: Rgb, target: Rgb) -> Rgb {
    let channel = |pixel: u8, source: u8, target: u8| -> u8 {
        let ratio = if source > 0 {
            pixel as f32 / source as f32
        } else {
            1.0
        };
        // Half rounds up; channels are never negative.
        (target as f32 * ratio + 0.5).floor().clamp(0.0, 255.0) as u8
    };

    Rgb::new(
        channel(pixel.red, source.red, target.red),
        channel(pixel.green, source.green, target.green),
        channel(pixel.blue, source.blue, target.blue),
    )
}
