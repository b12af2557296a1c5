//! Outcomes of monitor operations and their console rendering.
//!
//! Every outcome renders to a human-readable status line; callers never see
//! a raw error without context.

use std::fmt;

use tw_core::{AppError, TrendItem};

const RULE_WIDTH: usize = 80;

/// Result of one fetch-and-store cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchReport {
    /// The source call failed; nothing was written.
    SourceFailed { source: String, error: AppError },
    /// The source had nothing to offer; nothing was written.
    NoTrends { source: String },
    /// The whole batch was persisted.
    Stored { source: String, backend: String, count: usize },
    /// The fetch succeeded but persisting the batch did not.
    StoreFailed {
        source: String,
        backend: String,
        fetched: usize,
        error: AppError,
    },
}

impl FetchReport {
    pub fn is_stored(&self) -> bool {
        matches!(self, FetchReport::Stored { .. })
    }

    /// Number of records written by this cycle.
    pub fn written(&self) -> usize {
        match self {
            FetchReport::Stored { count, .. } => *count,
            _ => 0,
        }
    }
}

impl fmt::Display for FetchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchReport::SourceFailed { source, error } => {
                write!(f, "No trends fetched from {source} ({error}). Nothing to save.")
            }
            FetchReport::NoTrends { source } => {
                write!(f, "No trends fetched from {source}. Nothing to save.")
            }
            FetchReport::Stored { source, backend, count } => {
                write!(f, "Saved {count} trends from {source} to {backend}.")
            }
            FetchReport::StoreFailed {
                source,
                backend,
                fetched,
                error,
            } => write!(
                f,
                "Fetched {fetched} trends from {source}, but saving to {backend} failed ({error})."
            ),
        }
    }
}

/// Result of reading back the latest records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatestReport {
    /// The store is reachable but holds nothing yet.
    NoData,
    /// Records in the order the store returned them (newest first).
    Trends(Vec<TrendItem>),
    Failed { backend: String, error: AppError },
}

impl LatestReport {
    pub fn items(&self) -> &[TrendItem] {
        match self {
            LatestReport::Trends(items) => items,
            _ => &[],
        }
    }
}

impl fmt::Display for LatestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatestReport::NoData => write!(f, "No data in database yet."),
            LatestReport::Failed { backend, error } => {
                write!(f, "Could not read trends from {backend} ({error}).")
            }
            LatestReport::Trends(items) => {
                writeln!(f, "Last {} saved trends:", items.len())?;
                for item in items {
                    writeln!(f)?;
                    write!(f, "{}", render_item(item))?;
                }
                Ok(())
            }
        }
    }
}

/// Renders one record as a short block: header, url, timestamp, rule.
pub fn render_item(item: &TrendItem) -> String {
    format!(
        "[{} #{}] {} (score={})\n  {}\n  fetched_at={}\n{}",
        item.platform.as_str().to_uppercase(),
        item.rank,
        item.title,
        item.score,
        item.url,
        item.fetched_at.to_rfc3339(),
        "-".repeat(RULE_WIDTH),
    )
}
