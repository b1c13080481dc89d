//! Batch coordinator - runs the harvester over every requested storefront
//!
//! Each storefront gets its own task. A failed or panicking harvest becomes a
//! failure marker for that storefront only; the other tasks keep running and
//! the outcome keeps the input order.

use crate::config::Config;
use crate::crawler::Harvester;
use crate::record::{BatchOutcome, StorefrontOutcome, StorefrontResult};
use crate::HarvestError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinError;

/// Runs harvests concurrently, optionally capped
#[derive(Debug, Clone)]
pub struct BatchRunner {
    harvester: Harvester,
    max_concurrent: Option<usize>,
}

impl BatchRunner {
    /// Creates a runner from the configuration
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        let harvester = Harvester::new(config)?;
        Ok(Self::with_harvester(
            harvester,
            config.harvester.max_concurrent_storefronts,
        ))
    }

    /// Creates a runner around an existing harvester
    ///
    /// `max_concurrent` of `None` starts every storefront at once.
    pub fn with_harvester(harvester: Harvester, max_concurrent: Option<usize>) -> Self {
        Self {
            harvester,
            max_concurrent,
        }
    }

    /// Harvests every storefront and collects one outcome per input
    pub async fn run(&self, storefronts: Vec<String>) -> BatchOutcome {
        let total = storefronts.len();
        let start_time = Instant::now();
        tracing::info!(
            "Harvesting {} storefronts (concurrency: {})",
            total,
            self.max_concurrent
                .map(|limit| limit.to_string())
                .unwrap_or_else(|| "unbounded".to_string())
        );

        let semaphore = self
            .max_concurrent
            .map(|permits| Arc::new(Semaphore::new(permits)));

        let tasks: Vec<_> = storefronts
            .into_iter()
            .map(|storefront| {
                let harvester = self.harvester.clone();
                let semaphore = semaphore.clone();
                let handle = tokio::spawn({
                    let storefront = storefront.clone();
                    async move {
                        let _permit = match semaphore {
                            Some(semaphore) => Some(semaphore.acquire_owned().await),
                            None => None,
                        };
                        harvester.harvest(&storefront).await
                    }
                });
                (storefront, handle)
            })
            .collect();

        let mut slots = Vec::with_capacity(total);
        for (storefront, handle) in tasks {
            slots.push(storefront_outcome(storefront, handle.await));
        }

        let outcome = BatchOutcome::new(slots);
        tracing::info!(
            "Batch completed: {} of {} storefronts harvested in {:?}",
            outcome.successes().count(),
            total,
            start_time.elapsed()
        );

        outcome
    }
}

/// Turns a finished harvest task into the storefront's outcome
fn storefront_outcome(
    storefront: String,
    joined: Result<Result<StorefrontResult, HarvestError>, JoinError>,
) -> StorefrontOutcome {
    match joined.map_err(HarvestError::from) {
        Ok(Ok(result)) => {
            tracing::info!(
                "Harvested {} ({} products)",
                storefront,
                result.product_count()
            );
            StorefrontOutcome::Harvested(result)
        }
        Ok(Err(e)) | Err(e) => {
            tracing::warn!("Failed to harvest {}: {}", storefront, e);
            StorefrontOutcome::Failed { url: storefront }
        }
    }
}

/// Harvests every storefront with settings taken from `config`
///
/// # Example
///
/// ```no_run
/// use shop_harvest::config::Config;
/// use shop_harvest::crawler::run_batch;
///
/// # async fn example() -> shop_harvest::Result<()> {
/// let outcome = run_batch(&Config::default(), vec!["shop.example".to_string()]).await?;
/// println!("{} harvested", outcome.successes().count());
/// # Ok(())
/// # }
/// ```
pub async fn run_batch(
    config: &Config,
    storefronts: Vec<String>,
) -> Result<BatchOutcome, HarvestError> {
    let runner = BatchRunner::new(config)?;
    Ok(runner.run(storefronts).await)
}
