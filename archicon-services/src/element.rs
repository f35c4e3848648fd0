//! Element type identifiers.

use std::fmt;

/// The broad kind of a model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    /// An ArchiMate element (Business Actor, Application Component, ...).
    Element,
    /// A junction joining relationships.
    Junction,
    /// A relationship between elements.
    Relationship,
    /// Anything else shown in a diagram (notes, groups, references).
    DiagramObject,
}

/// Identifies a model type, e.g. `BusinessActor`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementType {
    name: String,
    category: ElementCategory,
}

impl ElementType {
    /// Create a type identifier.
    pub fn new(name: impl Into<String>, category: ElementCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// An ArchiMate element type.
    pub fn element(name: impl Into<String>) -> Self {
        Self::new(name, ElementCategory::Element)
    }

    /// A relationship type.
    pub fn relationship(name: impl Into<String>) -> Self {
        Self::new(name, ElementCategory::Relationship)
    }

    /// The junction type.
    pub fn junction() -> Self {
        Self::new("Junction", ElementCategory::Junction)
    }

    /// The type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type's category.
    pub fn category(&self) -> ElementCategory {
        self.category
    }

    /// Only elements get theme-colored icons; relationships and junctions keep theirs.
    pub fn is_themable(&self) -> bool {
        self.category == ElementCategory::Element
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
