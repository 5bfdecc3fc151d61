use futures::future::join_all;

use super::SearchResults;
use crate::catalog::{Catalog, IdSet};

impl Catalog {
    /// Fetches matching products concurrently on the caller's scheduler.
    ///
    /// All lookups are outstanding at once and their waits overlap, so the
    /// fetch phase costs roughly one product latency regardless of the number
    /// of matches. Results keep the order in which lookups were submitted.
    pub async fn concurrent_search(&self, query: &str, category: Option<&str>) -> SearchResults {
        let matching = self.matching_ids(query, category).await;
        self.fetch_concurrently(matching).await
    }

    async fn fetch_concurrently(&self, matching: IdSet) -> SearchResults {
        join_all(matching.into_iter().map(|id| self.lookup_product(id))).await
    }
}
