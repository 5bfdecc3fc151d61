//! In-memory product catalog with category and term indexes.
//!
//! A [`Catalog`] owns its products and two inverted indexes:
//!
//! - **Category index**: category name to product ids, in add order
//! - **Term index**: lowercase word from `name + " " + description` to
//!   product ids, one entry per occurrence
//!
//! Products are added synchronously through `&mut self` before any search
//! runs. Every read path (`lookup_*`, `search_by_terms`, `matching_ids` and
//! the search strategies) takes `&self`, so the borrow checker rules out
//! writes while lookups are in flight.
//!
//! # Duplicate Ids
//!
//! Adding a product with an id that already exists replaces the stored
//! product but keeps the index entries written for the earlier one. A search
//! for a term that only the replaced product contained still yields the id,
//! and the lookup returns the replacement. This is logged at `warn` level.
//!
//! # Examples
//!
//! ```rust
//! use catalog_fanout::catalog::Catalog;
//! use catalog_fanout::config::LatencyConfig;
//!
//! let mut catalog = Catalog::new(LatencyConfig::zero());
//! catalog.add(1, "Product One", "A", "Desc alpha", 9.99);
//! catalog.add(2, "Product Two", "A", "Desc beta", 19.99);
//!
//! assert_eq!(catalog.len(), 2);
//! assert!(catalog.contains(1));
//! ```

mod gauge;
mod index;
mod lookup;
mod product;

pub use gauge::{InFlightGauge, InFlightGuard};
pub use index::{IdSet, InvertedIndex, tokenize};
pub use product::{Product, ProductId};

use std::collections::HashMap;

use crate::config::{DEFAULT_WORKER_LIMIT, LatencyConfig};

/// An in-memory product store with simulated-latency lookups.
#[derive(Debug)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
    category_index: InvertedIndex,
    term_index: InvertedIndex,
    latency: LatencyConfig,
    worker_limit: usize,
    in_flight: InFlightGauge,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(LatencyConfig::default())
    }
}

impl Catalog {
    /// Creates an empty catalog whose lookups wait for `latency`.
    #[must_use]
    pub fn new(latency: LatencyConfig) -> Self {
        Self {
            products: HashMap::new(),
            category_index: InvertedIndex::new(),
            term_index: InvertedIndex::new(),
            latency,
            worker_limit: DEFAULT_WORKER_LIMIT,
            in_flight: InFlightGauge::new(),
        }
    }

    /// Sets the number of workers the parallel strategy may use.
    ///
    /// A limit of 0 is accepted here and rejected when the parallel strategy
    /// builds its pool.
    #[must_use]
    pub fn with_worker_limit(mut self, worker_limit: usize) -> Self {
        self.worker_limit = worker_limit;
        self
    }

    /// Adds a product and indexes it by category and by every term of its
    /// name and description.
    pub fn add(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) {
        self.add_product(Product::new(id, name, category, description, price));
    }

    /// Adds an already constructed product. See [`Catalog::add`].
    pub fn add_product(&mut self, product: Product) {
        let id = product.id;

        self.category_index.append(&product.category, id);
        for term in tokenize(&product.searchable_text()) {
            self.term_index.append(&term, id);
        }

        if let Some(previous) = self.products.insert(id, product) {
            tracing::warn!(
                id,
                previous_name = %previous.name,
                "product id added twice; stale index entries are kept"
            );
        }
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns `true` if no product has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Returns `true` if a product with `id` exists.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains_key(&id)
    }

    /// The simulated latencies this catalog was built with.
    #[must_use]
    pub const fn latency(&self) -> LatencyConfig {
        self.latency
    }

    /// Worker limit used by [`Catalog::parallel_search`].
    #[must_use]
    pub const fn worker_limit(&self) -> usize {
        self.worker_limit
    }

    /// Gauge of product lookups currently in flight.
    #[must_use]
    pub const fn in_flight(&self) -> &InFlightGauge {
        &self.in_flight
    }

    /// Category index, for inspection.
    #[must_use]
    pub const fn category_index(&self) -> &InvertedIndex {
        &self.category_index
    }

    /// Term index, for inspection.
    #[must_use]
    pub const fn term_index(&self) -> &InvertedIndex {
        &self.term_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> Catalog {
        let mut catalog = Catalog::new(LatencyConfig::zero());
        catalog.add(1, "Product One", "A", "Desc alpha", 1.0);
        catalog.add(2, "Product Two", "A", "Desc beta", 2.0);
        catalog.add(3, "Other", "B", "Desc alpha", 3.0);
        catalog
    }

    #[rstest]
    fn add_indexes_category_in_add_order(catalog: Catalog) {
        assert_eq!(catalog.category_index().postings("A"), &[1, 2]);
        assert_eq!(catalog.category_index().postings("B"), &[3]);
    }

    #[rstest]
    fn add_indexes_lowercase_terms(catalog: Catalog) {
        assert_eq!(catalog.term_index().postings("desc"), &[1, 2, 3]);
        assert_eq!(catalog.term_index().postings("alpha"), &[1, 3]);
        assert!(catalog.term_index().postings("Desc").is_empty());
    }

    #[rstest]
    fn repeated_term_is_indexed_once_per_occurrence() {
        let mut catalog = Catalog::new(LatencyConfig::zero());
        catalog.add(9, "Echo", "C", "echo ECHO", 0.0);
        assert_eq!(catalog.term_index().postings("echo"), &[9, 9, 9]);
    }

    #[rstest]
    fn every_indexed_id_exists(catalog: Catalog) {
        assert!(catalog.term_index().ids().all(|id| catalog.contains(id)));
        assert!(catalog.category_index().ids().all(|id| catalog.contains(id)));
    }

    #[rstest]
    fn worker_limit_defaults_to_fifty(catalog: Catalog) {
        assert_eq!(catalog.worker_limit(), 50);
        assert_eq!(catalog.with_worker_limit(4).worker_limit(), 4);
    }
}
