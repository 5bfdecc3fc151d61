//! Search strategies: three ways of fetching the details of matching products.
//!
//! Every strategy first resolves the matching ids with
//! [`Catalog::matching_ids`] and then calls [`Catalog::lookup_product`] once
//! per id. They differ only in how those lookups are executed and gathered:
//!
//! | Strategy | Execution | Result order |
//! |----------|-----------|--------------|
//! | [`Strategy::Sequential`] | one lookup at a time | id set iteration order |
//! | [`Strategy::Concurrent`] | all lookups on the caller's scheduler | id set iteration order |
//! | [`Strategy::Parallel`] | bounded worker threads, private runtime per lookup | completion order |
//!
//! Ids that cannot be resolved appear as `None` in the result.

mod concurrent;
mod parallel;
mod sequential;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::catalog::{Catalog, Product};
use crate::pool::PoolError;

/// Products fetched by a search; `None` marks an id that could not be found.
pub type SearchResults = Vec<Option<Product>>;

/// Errors returned by a search.
///
/// Only the parallel strategy can fail, and only for infrastructure reasons.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The worker pool could not be built or a worker could not start.
    #[error("parallel search failed: {0}")]
    Pool(#[from] PoolError),
}

/// Execution model used to fetch product details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Lookups run one after another.
    Sequential,
    /// Lookups wait concurrently on a single cooperative scheduler.
    Concurrent,
    /// Lookups run on a bounded pool of worker threads.
    Parallel,
}

impl Strategy {
    /// Every strategy, in benchmark order.
    pub const ALL: [Self; 3] = [Self::Sequential, Self::Concurrent, Self::Parallel];

    /// Human readable label used in benchmark output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::Concurrent => "Asynchronous parallel",
            Self::Parallel => "Multi-threaded",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}' (expected sequential, concurrent or parallel)")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "concurrent" | "async" => Ok(Self::Concurrent),
            "parallel" | "threads" => Ok(Self::Parallel),
            _ => Err(ParseStrategyError(value.to_string())),
        }
    }
}

impl Catalog {
    /// Runs `strategy` for `query`, optionally filtered by `category`.
    ///
    /// [`Strategy::Parallel`] blocks the calling thread while its workers
    /// run. On a current-thread runtime, other tasks joined with it make no
    /// progress until it returns; run it alone or from `spawn_blocking`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Pool`] if the parallel strategy cannot start
    /// its workers. The other strategies never fail.
    pub async fn search(
        &self,
        strategy: Strategy,
        query: &str,
        category: Option<&str>,
    ) -> Result<SearchResults, SearchError> {
        match strategy {
            Strategy::Sequential => Ok(self.sequential_search(query, category).await),
            Strategy::Concurrent => Ok(self.concurrent_search(query, category).await),
            Strategy::Parallel => self.parallel_search(query, category).await,
        }
    }
}
