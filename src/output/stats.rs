//! Batch statistics
//!
//! Summarizes a finished batch for the end-of-run log and console output.

use crate::record::BatchOutcome;
use chrono::{DateTime, Utc};

/// Harvest statistics summary
#[derive(Debug, Clone)]
pub struct BatchStatistics {
    /// When the batch started
    pub started_at: DateTime<Utc>,

    /// When the batch finished
    pub finished_at: DateTime<Utc>,

    /// Number of storefronts requested
    pub requested: usize,

    /// Number of storefronts harvested
    pub harvested: usize,

    /// Storefronts whose harvest failed, in input order
    pub failed: Vec<String>,

    /// Product slots filled across all harvested storefronts
    pub products: usize,

    /// Product slots left empty by a failed detail fetch
    pub product_failures: usize,

    /// Harvested storefronts with an email address
    pub with_email: usize,

    /// Harvested storefronts with a Facebook link
    pub with_facebook: usize,

    /// Harvested storefronts with a Twitter link
    pub with_twitter: usize,
}

impl BatchStatistics {
    /// Computes statistics for a finished batch
    pub fn from_outcome(
        outcome: &BatchOutcome,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let mut stats = Self {
            started_at,
            finished_at,
            requested: outcome.len(),
            harvested: 0,
            failed: outcome.failures().map(str::to_string).collect(),
            products: 0,
            product_failures: 0,
            with_email: 0,
            with_facebook: 0,
            with_twitter: 0,
        };

        for result in outcome.successes() {
            stats.harvested += 1;
            stats.products += result.product_count();
            stats.product_failures += result.products().len() - result.product_count();

            let contacts = result.contacts();
            stats.with_email += usize::from(contacts.email.is_some());
            stats.with_facebook += usize::from(contacts.facebook.is_some());
            stats.with_twitter += usize::from(contacts.twitter.is_some());
        }

        stats
    }

    /// Wall-clock duration of the batch in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// Share of requested storefronts that were harvested, in percent
    pub fn success_rate(&self) -> f64 {
        if self.requested > 0 {
            (self.harvested as f64 / self.requested as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &BatchStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    println!("  Duration: {}s", stats.duration_seconds());
    println!("  Storefronts requested: {}", stats.requested);
    println!("  Storefronts harvested: {}", stats.harvested);
    println!();

    println!("Contacts:");
    println!("  Email: {}", stats.with_email);
    println!("  Facebook: {}", stats.with_facebook);
    println!("  Twitter: {}", stats.with_twitter);
    println!();

    println!("Products:");
    println!("  Harvested: {}", stats.products);
    println!("  Failed detail fetches: {}", stats.product_failures);
    println!();

    if !stats.failed.is_empty() {
        println!("Failed Storefronts ({}):", stats.failed.len());
        for url in &stats.failed {
            println!("  - {}", url);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} storefronts harvested)",
        stats.success_rate(),
        stats.harvested,
        stats.requested
    );
}
