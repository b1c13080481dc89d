//! CSV report writer
//!
//! Failed storefronts are dropped without a trace in the report. The header
//! is picked according to [`ColumnPolicy`]:
//!
//! - `Widest` takes the columns of the result with the most fields (the first
//!   one on a tie). A row carrying a column outside that header loses it;
//!   the loss is logged.
//! - `Union` takes every column seen on any result, in canonical order.

use crate::config::ColumnPolicy;
use crate::record::{
    image_field, title_field, BatchOutcome, StorefrontResult, EMAIL_FIELD, FACEBOOK_FIELD,
    TWITTER_FIELD, URL_FIELD,
};
use crate::HarvestError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// What was written to the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Header of the report, empty when nothing was written
    pub columns: Vec<String>,
    /// Number of data rows
    pub rows: usize,
    /// Values left out because their column is not in the header
    pub dropped_fields: usize,
}

/// Chooses the report header for a set of successful results
pub fn report_columns(results: &[&StorefrontResult], policy: ColumnPolicy) -> Vec<String> {
    match policy {
        ColumnPolicy::Widest => widest_columns(results),
        ColumnPolicy::Union => union_columns(results),
    }
}

fn widest_columns(results: &[&StorefrontResult]) -> Vec<String> {
    let mut widest: Option<&StorefrontResult> = None;
    for &result in results {
        if widest.map_or(true, |w| result.field_count() > w.field_count()) {
            widest = Some(result);
        }
    }

    widest
        .map(|result| result.fields().into_iter().map(|(key, _)| key).collect())
        .unwrap_or_default()
}

fn union_columns(results: &[&StorefrontResult]) -> Vec<String> {
    if results.is_empty() {
        return Vec::new();
    }

    let mut columns: Vec<String> = [EMAIL_FIELD, FACEBOOK_FIELD, TWITTER_FIELD]
        .iter()
        .map(|c| c.to_string())
        .collect();

    let slots = results
        .iter()
        .map(|r| r.products().len())
        .max()
        .unwrap_or(0);

    for position in 0..slots {
        let products = results.iter().filter_map(|r| r.products().get(position)?.as_ref());
        let (mut has_title, mut has_image) = (false, false);
        for product in products {
            has_title = true;
            has_image |= product.image.is_some();
        }
        if has_title {
            columns.push(title_field(position + 1));
        }
        if has_image {
            columns.push(image_field(position + 1));
        }
    }

    columns.push(URL_FIELD.to_string());
    columns
}

/// Writes the successful results of a batch as CSV
///
/// Nothing is written when no storefront succeeded.
pub fn write_report<W: Write>(
    writer: W,
    outcome: &BatchOutcome,
    policy: ColumnPolicy,
) -> Result<ReportSummary, HarvestError> {
    let results: Vec<&StorefrontResult> = outcome.successes().collect();
    let columns = report_columns(&results, policy);

    let mut summary = ReportSummary {
        columns: columns.clone(),
        ..ReportSummary::default()
    };

    if columns.is_empty() {
        return Ok(summary);
    }

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    wtr.write_record(&columns)?;

    for result in results {
        let fields = result.fields();

        let dropped: Vec<&str> = fields
            .iter()
            .filter(|(key, value)| value.is_some() && !columns.contains(key))
            .map(|(key, _)| key.as_str())
            .collect();
        if !dropped.is_empty() {
            tracing::warn!(
                "Report header has no column for {} of {}",
                dropped.join(", "),
                result.url()
            );
            summary.dropped_fields += dropped.len();
        }

        let row: Vec<&str> = columns
            .iter()
            .map(|column| {
                fields
                    .iter()
                    .find(|(key, _)| key == column)
                    .and_then(|(_, value)| *value)
                    .unwrap_or("")
            })
            .collect();
        wtr.write_record(&row)?;
        summary.rows += 1;
    }

    wtr.flush()?;
    Ok(summary)
}

/// Writes the report to a file, replacing any existing one
pub fn write_report_to_path(
    path: &Path,
    outcome: &BatchOutcome,
    policy: ColumnPolicy,
) -> Result<ReportSummary, HarvestError> {
    let file = File::create(path)?;
    write_report(file, outcome, policy)
}
