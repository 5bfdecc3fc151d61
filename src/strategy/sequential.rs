use super::SearchResults;
use crate::catalog::Catalog;

impl Catalog {
    /// Fetches matching products one at a time.
    ///
    /// Each lookup's wait completes before the next one starts, so the total
    /// latency grows linearly with the number of matches.
    pub async fn sequential_search(&self, query: &str, category: Option<&str>) -> SearchResults {
        let matching = self.matching_ids(query, category).await;

        let mut results = Vec::with_capacity(matching.len());
        for id in matching {
            results.push(self.lookup_product(id).await);
        }
        results
    }
}
