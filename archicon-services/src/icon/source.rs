//! Providers of decoded icon rasters.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use archicon_theme::raster::Raster;

use crate::icon::error::IconError;

/// The zoom level (in percent) of unscaled artwork.
pub const DEFAULT_ZOOM: u32 = 100;

/// Produces image data on demand, per zoom level.
///
/// Each call returns a fresh raster the caller owns.
pub trait ImageSource: Send + Sync {
    /// Image data for `zoom` percent, or `None` if there is none.
    fn image_data(&self, zoom: u32) -> Option<Raster>;
}

impl<F> ImageSource for F
where
    F: Fn(u32) -> Option<Raster> + Send + Sync,
{
    fn image_data(&self, zoom: u32) -> Option<Raster> {
        self(zoom)
    }
}

/// Already-decoded rasters per zoom level.
///
/// Zoom levels without their own raster fall back to the [DEFAULT_ZOOM] one.
#[derive(Debug, Clone, Default)]
pub struct StaticImageSource {
    variants: BTreeMap<u32, Raster>,
}

impl StaticImageSource {
    /// A source with a single unscaled raster.
    pub fn new(raster: Raster) -> Self {
        Self::default().with_variant(DEFAULT_ZOOM, raster)
    }

    /// Add the raster for `zoom`.
    pub fn with_variant(mut self, zoom: u32, raster: Raster) -> Self {
        self.variants.insert(zoom, raster);
        self
    }
}

impl ImageSource for StaticImageSource {
    fn image_data(&self, zoom: u32) -> Option<Raster> {
        self.variants
            .get(&zoom)
            .or_else(|| self.variants.get(&DEFAULT_ZOOM))
            .cloned()
    }
}

#[derive(Debug, Clone)]
enum PngData {
    Bytes(Arc<[u8]>),
    File(PathBuf),
}

/// PNG artwork decoded on every pull.
///
/// Zoom levels without their own PNG fall back to the [DEFAULT_ZOOM] one.
#[derive(Debug, Clone, Default)]
pub struct PngImageSource {
    variants: BTreeMap<u32, PngData>,
}

impl PngImageSource {
    /// A source over in-memory PNG bytes at [DEFAULT_ZOOM].
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::default().with_bytes(DEFAULT_ZOOM, bytes)
    }

    /// A source over a PNG file, picking up an `@2x` sibling for 200% if present.
    ///
    /// Files are read when image data is requested, not here.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut source = Self::default();
        if let Some(hidpi) = hidpi_sibling(&path).filter(|p| p.exists()) {
            source = source.with_file(DEFAULT_ZOOM * 2, hidpi);
        }
        source.with_file(DEFAULT_ZOOM, path)
    }

    /// Add in-memory PNG bytes for `zoom`.
    pub fn with_bytes(mut self, zoom: u32, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.variants.insert(zoom, PngData::Bytes(bytes.into()));
        self
    }

    /// Add a PNG file for `zoom`.
    pub fn with_file(mut self, zoom: u32, path: impl Into<PathBuf>) -> Self {
        self.variants.insert(zoom, PngData::File(path.into()));
        self
    }

    /// Zoom levels that have their own artwork.
    pub fn zoom_levels(&self) -> impl Iterator<Item = u32> + '_ {
        self.variants.keys().copied()
    }

    /// Read and decode the artwork for `zoom`.
    pub fn load(&self, zoom: u32) -> Result<Option<Raster>, IconError> {
        let Some(data) = self
            .variants
            .get(&zoom)
            .or_else(|| self.variants.get(&DEFAULT_ZOOM))
        else {
            return Ok(None);
        };

        let img = match data {
            PngData::Bytes(bytes) => image::load_from_memory(bytes)?,
            PngData::File(path) => {
                let bytes = fs::read(path).map_err(|source| IconError::Io {
                    path: path.clone(),
                    source,
                })?;
                image::load_from_memory(&bytes)?
            },
        };

        Ok(Some(Raster::from_rgba8(&img.to_rgba8())))
    }
}

impl ImageSource for PngImageSource {
    fn image_data(&self, zoom: u32) -> Option<Raster> {
        match self.load(zoom) {
            Ok(raster) => raster,
            Err(e) => {
                log::warn!("PngImageSource: failed to load artwork at {}%: {}", zoom, e);
                None
            },
        }
    }
}

/// `icon.png` -> `icon@2x.png`
fn hidpi_sibling(path: &Path) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let mut name = format!("{stem}@2x");
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    Some(path.with_file_name(name))
}
