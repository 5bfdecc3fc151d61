//! Catalog fan-out benchmark.
//!
//! Builds sample catalogs of increasing size and times the sequential,
//! concurrent and parallel search strategies against each of them.
//!
//! # Environment Variables
//!
//! - `SEARCH_LOOKUP_TIME`, `PRODUCT_LOOKUP_TIME`, `CATEGORY_LOOKUP_TIME`:
//!   simulated latencies in seconds
//! - `CATALOG_SIZES`: comma separated catalog sizes (default: `100,1000,10000`)
//! - `SEARCH_QUERY`: query string (default: `Product 500`)
//! - `SEARCH_CATEGORY`: optional category filter
//! - `PARALLEL_WORKERS`: worker limit of the parallel strategy (default: `50`)
//! - `RUST_LOG`: logging filter (default: `catalog_fanout=info`)

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_fanout::bench::{build_catalog, run_performance_test};
use catalog_fanout::config::BenchmarkConfig;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_fanout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match BenchmarkConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "configuration error");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        sizes = ?config.sizes,
        query = %config.query,
        category = ?config.category,
        latency = ?config.latency,
        worker_limit = config.worker_limit,
        "benchmark configuration loaded"
    );

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(%error, "failed to create tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async_main(config))
}

async fn async_main(config: BenchmarkConfig) -> ExitCode {
    for &size in &config.sizes {
        println!("\n{}", "=".repeat(50));
        println!("Starting performance test with {size} products...");
        println!("Adding products to the catalog...");

        let catalog = build_catalog(size, config.latency, config.worker_limit);

        match run_performance_test(&catalog, &config.query, config.category.as_deref()).await {
            Ok(report) => println!("\n{report}"),
            Err(error) => {
                tracing::error!(%error, size, "performance test failed");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
