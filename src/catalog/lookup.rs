//! Simulated-latency lookup primitives.
//!
//! Every primitive suspends on `tokio::time::sleep` for its configured
//! latency before touching the in-memory data. The suspension yields to the
//! scheduler, so many lookups can wait at once on a single thread.

use std::time::Duration;

use super::{Catalog, IdSet, Product, ProductId, tokenize};

/// Suspends the current task for `latency`. Zero latency does not yield.
async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

impl Catalog {
    /// Fetches the details of a single product.
    ///
    /// Waits `latency().product`, then returns a copy of the stored product,
    /// or `None` if the id is unknown.
    pub async fn lookup_product(&self, id: ProductId) -> Option<Product> {
        let _guard = self.in_flight.enter();
        simulate_latency(self.latency.product).await;
        self.products.get(&id).cloned()
    }

    /// Returns the ids of every product whose name or description contains
    /// at least one of the query's terms.
    ///
    /// Waits `latency().search`. Terms are lowercased and split on
    /// whitespace; terms absent from the index contribute nothing.
    pub async fn search_by_terms(&self, query: &str) -> IdSet {
        simulate_latency(self.latency.search).await;
        let terms = tokenize(query);
        self.term_index.union(terms.iter().map(String::as_str))
    }

    /// Returns the ids filed under `category` in add order.
    ///
    /// Waits `latency().category`. Unknown categories yield an empty slice.
    pub async fn lookup_category(&self, category: &str) -> &[ProductId] {
        simulate_latency(self.latency.category).await;
        self.category_index.postings(category)
    }

    /// Term search, optionally narrowed to one category.
    ///
    /// The category lookup runs after the term search completes. `None` and
    /// an empty category string both mean "no filter".
    pub async fn matching_ids(&self, query: &str, category: Option<&str>) -> IdSet {
        let matching = self.search_by_terms(query).await;

        let Some(category) = category.filter(|category| !category.is_empty()) else {
            tracing::debug!(query, matched = matching.len(), "matched by terms");
            return matching;
        };

        let in_category: IdSet = self
            .lookup_category(category)
            .await
            .iter()
            .copied()
            .collect();
        let filtered: IdSet = matching.intersection(&in_category).copied().collect();

        tracing::debug!(
            query,
            category,
            by_terms = matching.len(),
            matched = filtered.len(),
            "matched by terms and category"
        );
        filtered
    }
}
