//! # catalog-fanout
//!
//! An in-memory product catalog that compares three ways of fanning out
//! product lookups under simulated I/O latency.
//!
//! ## Overview
//!
//! - **Catalog**: products plus a category index and a term index, with
//!   lookup primitives that wait a configurable latency before returning
//! - **Strategies**: sequential, concurrent (one cooperative scheduler) and
//!   parallel (bounded worker threads, each lookup on a private runtime)
//! - **Benchmark driver**: builds sample catalogs, times every strategy and
//!   checks that all of them returned the same products
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for `Product` and `Strategy`
//! - `fxhash`: use `FxHash` for id sets (faster, not `HashDoS` resistant)
//!
//! ## Example
//!
//! ```rust
//! use catalog_fanout::prelude::*;
//!
//! # let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
//! # runtime.block_on(async {
//! let mut catalog = Catalog::new(LatencyConfig::zero());
//! catalog.add(1, "Product One", "A", "Desc alpha", 10.0);
//! catalog.add(2, "Product Two", "A", "Desc beta", 12.5);
//! catalog.add(3, "Other", "B", "Desc alpha", 7.0);
//!
//! let results = catalog
//!     .search(Strategy::Concurrent, "alpha", Some("A"))
//!     .await
//!     .unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].as_ref().map(|product| product.id), Some(1));
//! # });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use catalog_fanout::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bench::{PerformanceReport, Verification, run_performance_test};
    pub use crate::catalog::{Catalog, IdSet, Product, ProductId};
    pub use crate::config::{BenchmarkConfig, LatencyConfig};
    pub use crate::pool::WorkerPool;
    pub use crate::strategy::{SearchError, SearchResults, Strategy};
}

pub mod bench;
pub mod catalog;
pub mod config;
pub mod pool;
pub mod strategy;
