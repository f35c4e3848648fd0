//! Themed Icon System
//!
//! This module turns an element type's original artwork into an icon painted
//! with the fill color configured for that type, including lazy per-zoom
//! image sources and a cache of realized icons.

mod cache;
mod error;
mod factory;
mod recolored;
mod source;

pub use cache::{ThemedImage, ThemedImageCache, ThemedImageKey};
pub use error::IconError;
pub use factory::{FillColorResolver, RefreshNotifier, ThemedIconFactory};
pub use recolored::RecoloredImageSource;
pub use source::{ImageSource, PngImageSource, StaticImageSource, DEFAULT_ZOOM};
