//! UI providers for model types.
//!
//! A provider supplies a type's icon artwork. Providers for types drawn as
//! filled shapes also expose the graphical capability, which knows the fill
//! color baked into that artwork.

use std::sync::Arc;

use archicon_theme::color::Rgb;
use indexmap::IndexMap;

use crate::element::ElementType;
use crate::icon::ImageSource;

/// Capability of providers whose type is drawn with a default fill color.
pub trait GraphicalObjectUiProvider: Send + Sync {
    /// The fill color baked into the type's icon, if it has one.
    fn default_color(&self) -> Option<Rgb>;
}

/// Supplies UI resources for one model type.
pub trait ObjectUiProvider: Send + Sync {
    /// The original icon artwork.
    fn image_source(&self) -> Option<Arc<dyn ImageSource>>;

    /// The graphical capability, if this type has one.
    fn as_graphical(&self) -> Option<&dyn GraphicalObjectUiProvider> {
        None
    }
}

/// Looks up the provider for a model type.
pub trait ProviderRegistry: Send + Sync {
    /// The provider for `element`, if one is registered.
    fn provider_for(&self, element: &ElementType) -> Option<Arc<dyn ObjectUiProvider>>;
}

/// Provider for an element drawn with a fill color.
pub struct ElementUiProvider {
    default_color: Option<Rgb>,
    image: Option<Arc<dyn ImageSource>>,
}

impl ElementUiProvider {
    /// Create a provider with the artwork's fill color and its image source.
    pub fn new(default_color: Option<Rgb>, image: Option<Arc<dyn ImageSource>>) -> Self {
        Self {
            default_color,
            image,
        }
    }
}

impl GraphicalObjectUiProvider for ElementUiProvider {
    fn default_color(&self) -> Option<Rgb> {
        self.default_color
    }
}

impl ObjectUiProvider for ElementUiProvider {
    fn image_source(&self) -> Option<Arc<dyn ImageSource>> {
        self.image.clone()
    }

    fn as_graphical(&self) -> Option<&dyn GraphicalObjectUiProvider> {
        Some(self)
    }
}

/// Providers keyed by type name, in registration order.
#[derive(Default)]
pub struct ProviderTable {
    providers: IndexMap<String, Arc<dyn ObjectUiProvider>>,
}

impl ProviderTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` for the type called `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn ObjectUiProvider>) {
        let name = name.into();
        if self.providers.insert(name.clone(), provider).is_some() {
            log::debug!("ProviderTable: replaced provider for '{}'", name);
        }
    }

    /// Builder form of [ProviderTable::register].
    pub fn with_provider(mut self, name: impl Into<String>, provider: Arc<dyn ObjectUiProvider>) -> Self {
        self.register(name, provider);
        self
    }

    /// Registered type names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no providers are registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ProviderRegistry for ProviderTable {
    fn provider_for(&self, element: &ElementType) -> Option<Arc<dyn ObjectUiProvider>> {
        self.providers.get(element.name()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoteProvider;

    impl ObjectUiProvider for NoteProvider {
        fn image_source(&self) -> Option<Arc<dyn ImageSource>> {
            None
        }
    }

    #[test]
    fn test_element_provider_is_graphical() {
        let provider = ElementUiProvider::new(Some(Rgb::new(255, 255, 181)), None);
        let graphical = provider.as_graphical().unwrap();
        assert_eq!(graphical.default_color(), Some(Rgb::new(255, 255, 181)));
    }

    #[test]
    fn test_plain_provider_has_no_graphical_capability() {
        assert!(NoteProvider.as_graphical().is_none());
    }

    #[test]
    fn test_table_keeps_registration_order() {
        let table = ProviderTable::new()
            .with_provider("BusinessRole", Arc::new(NoteProvider))
            .with_provider("BusinessActor", Arc::new(NoteProvider))
            .with_provider("BusinessRole", Arc::new(ElementUiProvider::new(None, None)));

        assert_eq!(table.names().collect::<Vec<_>>(), vec!["BusinessRole", "BusinessActor"]);
        assert_eq!(table.len(), 2);

        let role = table.provider_for(&ElementType::element("BusinessRole")).unwrap();
        assert!(role.as_graphical().is_some());
        assert!(table.provider_for(&ElementType::element("Node")).is_none());
    }
}
