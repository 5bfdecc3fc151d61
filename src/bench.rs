//! Benchmark driver: builds sample catalogs and times every strategy.
//!
//! [`run_performance_test`] runs the three strategies one after another
//! against the same catalog, records wall-clock time and result counts, and
//! compares the returned id sets. A mismatch is reported in the
//! [`PerformanceReport`] and logged as a warning; it is never an error.

use std::collections::BTreeSet;
use std::fmt;
use std::time::{Duration, Instant};

use crate::catalog::{Catalog, Product, ProductId};
use crate::config::LatencyConfig;
use crate::strategy::{SearchError, SearchResults, Strategy};

/// Category shared by every sample product.
pub const SAMPLE_CATEGORY: &str = "Category A";

/// Price shared by every sample product.
pub const SAMPLE_PRICE: f64 = 99.99;

// =============================================================================
// Sample Data
// =============================================================================

/// Generates `count` synthetic products with ids `0..count`.
///
/// # Examples
///
/// ```rust
/// use catalog_fanout::bench::sample_products;
///
/// let first = sample_products(3).next().unwrap();
/// assert_eq!(first.name, "Product 0");
/// assert_eq!(first.description, "Description for product 0");
/// ```
pub fn sample_products(count: usize) -> impl Iterator<Item = Product> {
    (0..count as ProductId).map(|id| {
        Product::new(
            id,
            format!("Product {id}"),
            SAMPLE_CATEGORY,
            format!("Description for product {id}"),
            SAMPLE_PRICE,
        )
    })
}

/// Builds a catalog holding `count` sample products.
#[must_use]
pub fn build_catalog(count: usize, latency: LatencyConfig, worker_limit: usize) -> Catalog {
    let mut catalog = Catalog::new(latency).with_worker_limit(worker_limit);
    for product in sample_products(count) {
        catalog.add_product(product);
    }
    tracing::debug!(products = catalog.len(), "sample catalog built");
    catalog
}

// =============================================================================
// Report Types
// =============================================================================

/// Outcome of one strategy run.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyTiming {
    /// Strategy that produced the results.
    pub strategy: Strategy,
    /// Wall-clock time of the whole search, matching included.
    pub elapsed: Duration,
    /// Number of entries returned, `None` entries included.
    pub result_count: usize,
    /// Ids of the products returned.
    pub ids: BTreeSet<ProductId>,
}

impl StrategyTiming {
    fn new(strategy: Strategy, elapsed: Duration, results: &SearchResults) -> Self {
        Self {
            strategy,
            elapsed,
            result_count: results.len(),
            ids: result_ids(results),
        }
    }
}

/// Collects the ids of the products present in `results`.
#[must_use]
pub fn result_ids(results: &SearchResults) -> BTreeSet<ProductId> {
    results.iter().flatten().map(|product| product.id).collect()
}

/// Whether every strategy returned the same set of products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// All id sets are equal.
    Identical,
    /// At least one strategy returned a different id set.
    Mismatch,
}

impl Verification {
    /// Compares the id sets of every timing.
    #[must_use]
    pub fn of(timings: &[StrategyTiming]) -> Self {
        match timings.split_first() {
            Some((first, rest)) if rest.iter().any(|timing| timing.ids != first.ids) => {
                Self::Mismatch
            }
            _ => Self::Identical,
        }
    }

    /// Returns `true` for [`Verification::Identical`].
    #[must_use]
    pub const fn is_identical(self) -> bool {
        matches!(self, Self::Identical)
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identical => formatter
                .write_str("Results verified: All systems returned identical products"),
            Self::Mismatch => formatter.write_str("WARNING: Result sets don't match!"),
        }
    }
}

/// Timings and verification for one catalog size.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    /// Number of products in the catalog.
    pub product_count: usize,
    /// Query every strategy was run with.
    pub query: String,
    /// Category filter every strategy was run with.
    pub category: Option<String>,
    /// One entry per strategy, in run order.
    pub timings: Vec<StrategyTiming>,
    /// Cross-strategy consistency check.
    pub verification: Verification,
}

impl PerformanceReport {
    /// The timing recorded for `strategy`, if it was run.
    #[must_use]
    pub fn timing(&self, strategy: Strategy) -> Option<&StrategyTiming> {
        self.timings
            .iter()
            .find(|timing| timing.strategy == strategy)
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            formatter,
            "Searching for '{}' in {} systems...",
            self.query,
            self.timings.len()
        )?;
        for timing in &self.timings {
            writeln!(
                formatter,
                "{} search time: {:.3} seconds",
                timing.strategy,
                timing.elapsed.as_secs_f64()
            )?;
            writeln!(
                formatter,
                "{} results found: {}",
                timing.strategy, timing.result_count
            )?;
        }
        write!(formatter, "\n{}", self.verification)
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Runs every strategy against `catalog` and compares their results.
///
/// # Errors
///
/// Returns [`SearchError`] if the parallel strategy cannot start its workers.
/// A result mismatch between strategies is not an error; it is reported in
/// [`PerformanceReport::verification`].
pub async fn run_performance_test(
    catalog: &Catalog,
    query: &str,
    category: Option<&str>,
) -> Result<PerformanceReport, SearchError> {
    let mut timings = Vec::with_capacity(Strategy::ALL.len());

    for strategy in Strategy::ALL {
        let started = Instant::now();
        let results = catalog.search(strategy, query, category).await?;
        let timing = StrategyTiming::new(strategy, started.elapsed(), &results);

        tracing::info!(
            %strategy,
            elapsed_secs = timing.elapsed.as_secs_f64(),
            results = timing.result_count,
            "strategy finished"
        );
        timings.push(timing);
    }

    let verification = Verification::of(&timings);
    if !verification.is_identical() {
        tracing::warn!(
            products = catalog.len(),
            query,
            "strategies returned different result sets"
        );
    }

    Ok(PerformanceReport {
        product_count: catalog.len(),
        query: query.to_string(),
        category: category.map(str::to_string),
        timings,
        verification,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn timing(strategy: Strategy, ids: &[ProductId]) -> StrategyTiming {
        StrategyTiming {
            strategy,
            elapsed: Duration::from_millis(5),
            result_count: ids.len(),
            ids: ids.iter().copied().collect(),
        }
    }

    #[rstest]
    fn sample_products_follow_naming_scheme() {
        let products: Vec<_> = sample_products(3).collect();
        assert_eq!(products.len(), 3);
        assert_eq!(products[2].id, 2);
        assert_eq!(products[2].name, "Product 2");
        assert_eq!(products[2].category, SAMPLE_CATEGORY);
        assert_eq!(products[2].description, "Description for product 2");
        assert!((products[2].price - SAMPLE_PRICE).abs() < f64::EPSILON);
    }

    #[rstest]
    fn verification_identical_when_sets_match() {
        let timings = [
            timing(Strategy::Sequential, &[1, 2]),
            timing(Strategy::Concurrent, &[2, 1]),
            timing(Strategy::Parallel, &[1, 2]),
        ];
        assert_eq!(Verification::of(&timings), Verification::Identical);
    }

    #[rstest]
    fn verification_mismatch_when_any_set_differs() {
        let timings = [
            timing(Strategy::Sequential, &[1, 2]),
            timing(Strategy::Concurrent, &[1, 2]),
            timing(Strategy::Parallel, &[1]),
        ];
        assert_eq!(Verification::of(&timings), Verification::Mismatch);
    }

    #[rstest]
    fn verification_of_nothing_is_identical() {
        assert!(Verification::of(&[]).is_identical());
    }

    #[rstest]
    fn result_ids_skip_missing_products() {
        let results = vec![
            Some(Product::new(4, "a", "c", "d", 1.0)),
            None,
            Some(Product::new(2, "b", "c", "d", 1.0)),
        ];
        assert_eq!(result_ids(&results), BTreeSet::from([2, 4]));
    }

    #[rstest]
    fn report_display_matches_benchmark_output() {
        let report = PerformanceReport {
            product_count: 2,
            query: "Product 1".to_string(),
            category: None,
            timings: vec![timing(Strategy::Sequential, &[1])],
            verification: Verification::Identical,
        };
        let rendered = report.to_string();
        assert!(rendered.starts_with("Searching for 'Product 1' in 1 systems..."));
        assert!(rendered.contains("Sequential search time: 0.005 seconds"));
        assert!(rendered.contains("Sequential results found: 1"));
        assert!(rendered.ends_with("Results verified: All systems returned identical products"));
    }
}
