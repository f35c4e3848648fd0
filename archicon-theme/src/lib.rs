#![warn(missing_docs)]

//! # Archicon Theming Core
//!
//! Colors, rasters and the fill-color substitution used to theme element icons.
//!
//! ## Overview
//!
//! Element icons are drawn with a solid "fill" color baked into the artwork.
//! When the user configures a different fill color for an element type, the
//! icon is recolored so it matches what the diagram shows:
//!
//! - **[Rgb](color::Rgb)**: An 8-bit RGB color with `#rrggbb` serialization
//! - **[Raster](raster::Raster)**: Decoded image data with an indexed or direct palette
//! - **[ColorMatch](color_match::ColorMatch)**: Closeness test and ratio-preserving blend
//! - **[Recolorer](recolor::Recolorer)**: Applies the substitution to a raster in place
//! - **[RecolorConfig](config::RecolorConfig)**: Thresholds loaded from TOML
//!
//! ## Quick Start
//!
//! ```rust
//! use archicon_theme::color::Rgb;
//! use archicon_theme::raster::{Palette, Raster};
//! use archicon_theme::recolor::{ColorPair, Recolorer};
//!
//! let palette = Palette::indexed(vec![Rgb::new(255, 255, 181), Rgb::BLACK]);
//! let mut raster = Raster::new(16, 16, palette).unwrap();
//!
//! let pair = ColorPair::new(Rgb::new(255, 255, 181), Rgb::new(200, 230, 255)).unwrap();
//! Recolorer::default().recolor(&mut raster, &pair);
//!
//! assert_eq!(raster.rgb_at(0, 0), Rgb::new(200, 230, 255));
//! ```
//!
//! ## Anti-aliasing
//!
//! Icon edges blend the fill color into the background. Those pixels are not
//! swapped outright: each channel keeps its ratio to the fill color and that
//! ratio is reapplied to the theme color. Dark outline pixels are excluded by
//! a brightness gate.

/// Contains the [color::Rgb] type.
pub mod color;
/// Contains the [color_match::ColorMatch] closeness test and blend.
pub mod color_match;
/// Contains the [config::RecolorConfig] struct for threshold configuration.
pub mod config;
/// Contains the [error::RasterError] and [error::ConfigError] types.
pub mod error;
/// Contains the [raster::Raster] and [raster::Palette] types.
pub mod raster;
/// Contains the [recolor::Recolorer] that rewrites fill colors.
pub mod recolor;
