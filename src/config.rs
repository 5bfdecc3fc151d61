//! Latency and benchmark configuration.
//!
//! Every simulated lookup in a [`Catalog`](crate::catalog::Catalog) waits for a
//! fixed duration taken from a [`LatencyConfig`]. The configuration is passed
//! into the catalog explicitly so tests can run with zero latency while the
//! benchmark binary reads realistic values from the environment.
//!
//! # Environment Variables
//!
//! - `SEARCH_LOOKUP_TIME`: term search latency in seconds (default: `0.05`)
//! - `PRODUCT_LOOKUP_TIME`: product detail latency in seconds (default: `0.001`)
//! - `CATEGORY_LOOKUP_TIME`: category lookup latency in seconds (default: `0.02`)
//! - `CATALOG_SIZES`: comma separated catalog sizes (default: `100,1000,10000`)
//! - `SEARCH_QUERY`: query string (default: `Product 500`)
//! - `SEARCH_CATEGORY`: optional category filter (default: unset)
//! - `PARALLEL_WORKERS`: worker limit for the parallel strategy (default: `50`)

use std::time::Duration;

use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Default number of workers used by the parallel strategy.
pub const DEFAULT_WORKER_LIMIT: usize = 50;

/// Default query used by the benchmark driver.
pub const DEFAULT_QUERY: &str = "Product 500";

/// Default catalog sizes exercised by the benchmark driver.
pub const DEFAULT_SIZES: [usize; 3] = [100, 1_000, 10_000];

const DEFAULT_SEARCH_LOOKUP: Duration = Duration::from_millis(50);
const DEFAULT_PRODUCT_LOOKUP: Duration = Duration::from_millis(1);
const DEFAULT_CATEGORY_LOOKUP: Duration = Duration::from_millis(20);

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while building a configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// An environment variable is set but cannot be parsed.
    #[error("invalid value for {name}: {message} (got '{value}')")]
    InvalidValue {
        /// Variable name.
        name: String,
        /// Parser message.
        message: String,
        /// Raw value.
        value: String,
    },

    /// A latency is negative, NaN or infinite.
    #[error("latency for {name} must be a finite, non-negative number of seconds (got {seconds})")]
    InvalidLatency {
        /// Which latency was rejected.
        name: &'static str,
        /// The rejected value.
        seconds: f64,
    },

    /// The parallel strategy needs at least one worker.
    #[error("worker limit must be greater than 0")]
    ZeroWorkerLimit,

    /// No catalog size was configured.
    #[error("at least one catalog size is required")]
    NoSizes,
}

// =============================================================================
// LatencyConfig
// =============================================================================

/// Simulated latencies for the three catalog lookup primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    /// Delay before a term search returns.
    pub search: Duration,
    /// Delay before a single product lookup returns.
    pub product: Duration,
    /// Delay before a category lookup returns.
    pub category: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            search: DEFAULT_SEARCH_LOOKUP,
            product: DEFAULT_PRODUCT_LOOKUP,
            category: DEFAULT_CATEGORY_LOOKUP,
        }
    }
}

impl LatencyConfig {
    /// Creates a configuration from explicit durations.
    #[must_use]
    pub const fn new(search: Duration, product: Duration, category: Duration) -> Self {
        Self {
            search,
            product,
            category,
        }
    }

    /// A configuration with no simulated latency at all.
    #[must_use]
    pub const fn zero() -> Self {
        Self::uniform(Duration::ZERO)
    }

    /// Uses the same latency for every primitive.
    #[must_use]
    pub const fn uniform(latency: Duration) -> Self {
        Self::new(latency, latency, latency)
    }

    /// Creates a configuration from latencies expressed in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLatency`] if any value is negative, NaN
    /// or infinite.
    pub fn from_secs_f64(search: f64, product: f64, category: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            search: seconds_to_duration("SEARCH_LOOKUP_TIME", search)?,
            product: seconds_to_duration("PRODUCT_LOOKUP_TIME", product)?,
            category: seconds_to_duration("CATEGORY_LOOKUP_TIME", category)?,
        })
    }

    /// Reads the latencies from `SEARCH_LOOKUP_TIME`, `PRODUCT_LOOKUP_TIME`
    /// and `CATEGORY_LOOKUP_TIME`.
    ///
    /// Missing variables fall back to [`LatencyConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but is not a valid, finite,
    /// non-negative number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Self::from_secs_f64(
            parse_env_f64("SEARCH_LOOKUP_TIME", defaults.search.as_secs_f64())?,
            parse_env_f64("PRODUCT_LOOKUP_TIME", defaults.product.as_secs_f64())?,
            parse_env_f64("CATEGORY_LOOKUP_TIME", defaults.category.as_secs_f64())?,
        )
    }
}

fn seconds_to_duration(name: &'static str, seconds: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| ConfigError::InvalidLatency { name, seconds })
}

// =============================================================================
// BenchmarkConfig
// =============================================================================

/// Everything the benchmark driver needs for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    /// Catalog sizes to benchmark, in order.
    pub sizes: Vec<usize>,
    /// Query passed to every strategy.
    pub query: String,
    /// Optional category filter.
    pub category: Option<String>,
    /// Simulated lookup latencies.
    pub latency: LatencyConfig,
    /// Worker limit for the parallel strategy.
    pub worker_limit: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            query: DEFAULT_QUERY.to_string(),
            category: None,
            latency: LatencyConfig::default(),
            worker_limit: DEFAULT_WORKER_LIMIT,
        }
    }
}

impl BenchmarkConfig {
    /// Reads the benchmark configuration from the environment.
    ///
    /// # I/O Notice
    ///
    /// This reads process environment variables and should be called once at
    /// startup.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is present but invalid, or if the
    /// resulting configuration fails [`BenchmarkConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let sizes = match std::env::var("CATALOG_SIZES") {
            Ok(value) => parse_sizes(&value)?,
            Err(std::env::VarError::NotPresent) => DEFAULT_SIZES.to_vec(),
            Err(error) => return Err(invalid_value("CATALOG_SIZES", &error, String::new())),
        };

        let query =
            read_env_string("SEARCH_QUERY")?.unwrap_or_else(|| DEFAULT_QUERY.to_string());

        let category =
            read_env_string("SEARCH_CATEGORY")?.filter(|value| !value.trim().is_empty());

        let worker_limit = parse_env_usize("PARALLEL_WORKERS", DEFAULT_WORKER_LIMIT)?;

        let config = Self {
            sizes,
            query,
            category,
            latency: LatencyConfig::from_env()?,
            worker_limit,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the driver relies on.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoSizes`] if `sizes` is empty
    /// - [`ConfigError::ZeroWorkerLimit`] if `worker_limit` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::NoSizes);
        }
        if self.worker_limit == 0 {
            return Err(ConfigError::ZeroWorkerLimit);
        }
        Ok(())
    }
}

// =============================================================================
// Environment Variable Parsing
// =============================================================================

fn invalid_value(name: &str, error: &impl ToString, value: String) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        message: error.to_string(),
        value,
    }
}

/// Parses a comma separated list of sizes, ignoring blank entries.
pub(crate) fn parse_sizes(raw: &str) -> Result<Vec<usize>, ConfigError> {
    let sizes = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .map_err(|error| invalid_value("CATALOG_SIZES", &error, raw.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if sizes.is_empty() {
        return Err(ConfigError::NoSizes);
    }
    Ok(sizes)
}

/// Reads a string variable, `None` if it is not set.
fn read_env_string(name: &str) -> Result<Option<String>, ConfigError> {
    present_value(name, std::env::var(name))
}

fn present_value(
    name: &str,
    lookup: Result<String, std::env::VarError>,
) -> Result<Option<String>, ConfigError> {
    match lookup {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(error) => Err(invalid_value(name, &error, String::new())),
    }
}

/// Parses an f64 from an environment variable.
///
/// Returns the default value if the variable is not set.
fn parse_env_f64(name: &str, default: f64) -> Result<f64, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|error: std::num::ParseFloatError| invalid_value(name, &error, value.clone())),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(error) => Err(invalid_value(name, &error, String::new())),
    }
}

/// Parses a usize from an environment variable.
///
/// Returns the default value if the variable is not set.
fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|error: std::num::ParseIntError| invalid_value(name, &error, value.clone())),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(error) => Err(invalid_value(name, &error, String::new())),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_latency_matches_documented_values() {
        let latency = LatencyConfig::default();
        assert_eq!(latency.search, Duration::from_millis(50));
        assert_eq!(latency.product, Duration::from_millis(1));
        assert_eq!(latency.category, Duration::from_millis(20));
    }

    #[rstest]
    fn zero_latency_is_all_zero() {
        assert_eq!(
            LatencyConfig::zero(),
            LatencyConfig::new(Duration::ZERO, Duration::ZERO, Duration::ZERO)
        );
    }

    #[rstest]
    #[case(0.0, 0.5, 1.25)]
    #[case(0.001, 0.0, 0.0)]
    fn from_secs_f64_accepts_non_negative_values(
        #[case] search: f64,
        #[case] product: f64,
        #[case] category: f64,
    ) {
        let latency = LatencyConfig::from_secs_f64(search, product, category).unwrap();
        assert_eq!(latency.search, Duration::from_secs_f64(search));
        assert_eq!(latency.product, Duration::from_secs_f64(product));
        assert_eq!(latency.category, Duration::from_secs_f64(category));
    }

    #[rstest]
    #[case(-0.1)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn from_secs_f64_rejects_invalid_values(#[case] product: f64) {
        let result = LatencyConfig::from_secs_f64(0.0, product, 0.0);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidLatency {
                name: "PRODUCT_LOOKUP_TIME",
                ..
            })
        ));
    }

    #[rstest]
    #[case("100,1000,10000", vec![100, 1000, 10000])]
    #[case(" 5 , 7 ", vec![5, 7])]
    #[case("3,,4,", vec![3, 4])]
    fn parse_sizes_reads_comma_separated_values(#[case] raw: &str, #[case] expected: Vec<usize>) {
        assert_eq!(parse_sizes(raw).unwrap(), expected);
    }

    #[rstest]
    fn parse_sizes_rejects_garbage() {
        let error = parse_sizes("10,abc").unwrap_err();
        assert!(error.to_string().contains("CATALOG_SIZES"));
    }

    #[rstest]
    fn parse_sizes_rejects_empty_list() {
        assert_eq!(parse_sizes(" , "), Err(ConfigError::NoSizes));
    }

    #[rstest]
    fn present_value_distinguishes_unset_from_set() {
        assert_eq!(
            present_value("SEARCH_QUERY", Ok("lamp".to_string())),
            Ok(Some("lamp".to_string()))
        );
        assert_eq!(
            present_value("SEARCH_QUERY", Err(std::env::VarError::NotPresent)),
            Ok(None)
        );
    }

    #[rstest]
    #[case("SEARCH_QUERY")]
    #[case("SEARCH_CATEGORY")]
    fn present_value_rejects_non_unicode(#[case] name: &str) {
        let lookup = Err(std::env::VarError::NotUnicode(std::ffi::OsString::from("lamp")));
        let error = present_value(name, lookup).unwrap_err();
        assert!(matches!(
            &error,
            ConfigError::InvalidValue { name: reported, .. } if reported == name
        ));
    }

    #[rstest]
    fn validate_rejects_zero_workers() {
        let config = BenchmarkConfig {
            worker_limit: 0,
            ..BenchmarkConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroWorkerLimit));
    }

    #[rstest]
    fn default_benchmark_config_is_valid() {
        let config = BenchmarkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sizes, vec![100, 1_000, 10_000]);
        assert_eq!(config.query, "Product 500");
        assert_eq!(config.category, None);
    }
}
