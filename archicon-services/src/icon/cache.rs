//! Cache of realized themed icons.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use archicon_theme::color::Rgb;
use archicon_theme::raster::Raster;

use crate::element::ElementType;

/// A realized icon raster.
///
/// Disposing releases the image for rendering; the pixel data stays
/// readable so holders of a stale handle do not crash.
#[derive(Debug)]
pub struct ThemedImage {
    raster: Raster,
    disposed: AtomicBool,
}

impl ThemedImage {
    /// Wrap a realized raster.
    pub fn new(raster: Raster) -> Self {
        Self {
            raster,
            disposed: AtomicBool::new(false),
        }
    }

    /// The pixel data.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Release the image. Returns `false` if it was already released.
    pub fn dispose(&self) -> bool {
        !self.disposed.swap(true, Ordering::AcqRel)
    }

    /// Whether the image has been released.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

/// Cache key: type name plus the serialized theme color.
///
/// The color is part of the key, so a changed theme color never hits a stale entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemedImageKey {
    type_name: String,
    color: String,
}

impl ThemedImageKey {
    /// Key for `element` themed with `color`.
    pub fn new(element: &ElementType, color: Rgb) -> Self {
        Self {
            type_name: element.name().to_string(),
            color: color.to_hex(),
        }
    }

    /// The type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The `#rrggbb` theme color.
    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Thread-safe map from [ThemedImageKey] to the one realized image for it.
///
/// Entries are never removed individually, only all at once by
/// [ThemedImageCache::invalidate_all].
#[derive(Default)]
pub struct ThemedImageCache {
    images: RwLock<HashMap<ThemedImageKey, Arc<ThemedImage>>>,
}

impl ThemedImageCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached image.
    pub fn get(&self, key: &ThemedImageKey) -> Option<Arc<ThemedImage>> {
        let images = self.images.read().unwrap_or_else(PoisonError::into_inner);
        images.get(key).cloned()
    }

    /// Get the cached image for `key`, realizing and storing it on a miss.
    ///
    /// `realize` runs without the lock held. When two callers race on the same
    /// key the first stored image wins and is returned to both. Nothing is
    /// stored if `realize` yields `None`.
    pub fn get_or_realize<F>(&self, key: ThemedImageKey, realize: F) -> Option<Arc<ThemedImage>>
    where
        F: FnOnce() -> Option<Raster>,
    {
        if let Some(image) = self.get(&key) {
            return Some(image);
        }

        let raster = realize()?;
        let mut images = self.images.write().unwrap_or_else(PoisonError::into_inner);
        let image = match images.entry(key) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                log::debug!(
                    "ThemedImageCache: realized {} {}",
                    entry.key().type_name(),
                    entry.key().color()
                );
                entry.insert(Arc::new(ThemedImage::new(raster))).clone()
            },
        };
        Some(image)
    }

    /// Dispose every cached image and empty the cache. Returns how many were dropped.
    pub fn invalidate_all(&self) -> usize {
        let mut images = self.images.write().unwrap_or_else(PoisonError::into_inner);
        let count = images.len();
        for image in images.values() {
            image.dispose();
        }
        images.clear();
        count
    }

    /// Check if an image is cached.
    pub fn contains(&self, key: &ThemedImageKey) -> bool {
        let images = self.images.read().unwrap_or_else(PoisonError::into_inner);
        images.contains_key(key)
    }

    /// Get cache size (number of cached images).
    pub fn len(&self) -> usize {
        let images = self.images.read().unwrap_or_else(PoisonError::into_inner);
        images.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
