//! The product record stored by the catalog.

use std::fmt;

/// Identifier of a product within a catalog.
pub type ProductId = u64;

/// A single catalog entry.
///
/// Products are created once through [`Catalog::add`](super::Catalog::add)
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,
    /// Display name; indexed for term search.
    pub name: String,
    /// Category name; indexed for category filtering.
    pub category: String,
    /// Free text description; indexed for term search.
    pub description: String,
    /// Unit price.
    pub price: f64,
}

impl Product {
    /// Creates a product from its parts.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            description: description.into(),
            price,
        }
    }

    /// The text that feeds the term index: name and description joined by a
    /// single space.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.name, self.description)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "#{} {} [{}] {:.2}",
            self.id, self.name, self.category, self.price
        )
    }
}
