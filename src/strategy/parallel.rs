use super::{SearchError, SearchResults};
use crate::catalog::{Catalog, IdSet};
use crate::pool::WorkerPool;

impl Catalog {
    /// Fetches matching products on a bounded pool of worker threads.
    ///
    /// A pool of [`worker_limit`](Catalog::worker_limit) threads is started
    /// for this call and shut down afterwards. Each lookup runs on its own
    /// private runtime; lookups beyond the limit queue for a free worker.
    /// Results are returned in completion order.
    ///
    /// The fetch phase blocks the calling thread until every lookup is done.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Pool`] if the worker limit is 0 or the workers
    /// cannot be started.
    pub async fn parallel_search(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> Result<SearchResults, SearchError> {
        let matching = self.matching_ids(query, category).await;
        let pool = WorkerPool::try_new(self.worker_limit())?;
        self.fetch_on_pool(&pool, matching)
    }

    /// Same as [`Catalog::parallel_search`], reusing an existing pool.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Pool`] if a worker cannot build its runtime.
    pub async fn parallel_search_with(
        &self,
        pool: &WorkerPool,
        query: &str,
        category: Option<&str>,
    ) -> Result<SearchResults, SearchError> {
        let matching = self.matching_ids(query, category).await;
        self.fetch_on_pool(pool, matching)
    }

    fn fetch_on_pool(
        &self,
        pool: &WorkerPool,
        matching: IdSet,
    ) -> Result<SearchResults, SearchError> {
        Ok(pool.run(matching, |id| self.lookup_product(id))?)
    }
}
