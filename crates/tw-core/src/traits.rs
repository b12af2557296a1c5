//! # Core Traits (Ports)
//!
//! Any plugin must implement one of these traits to be wired into a monitor.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Platform, TrendItem};
use crate::request::FetchRequest;

/// Producer of trend batches.
///
/// `Ok(vec![])` means the platform had nothing to offer; `Err` means the
/// fetch itself failed. Neither is fatal to the caller.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Human-readable label used in logs and status lines.
    fn name(&self) -> &str;

    /// The platform stamped on every item this source produces.
    fn platform(&self) -> Platform;

    /// Fetches at most `request.effective_limit()` items, ranked 1..=N in the
    /// platform's own order and sharing one `fetched_at`.
    async fn fetch_trends(&self, request: &FetchRequest) -> Result<Vec<TrendItem>>;
}

/// Persistence contract for trend batches.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TrendStore: Send + Sync {
    /// Short backend label ("sqlite", "mongo").
    fn backend(&self) -> &str;

    /// Persists a batch and returns how many records were written.
    /// An empty batch is a no-op returning `Ok(0)`.
    async fn save_trends(&self, items: &[TrendItem]) -> Result<usize>;

    /// Up to `limit` records, newest insertion first. A non-positive limit is
    /// coerced to the default count.
    async fn get_latest(&self, limit: i64) -> Result<Vec<TrendItem>>;
}

/// Fetches from `source`, folding any failure into an empty batch after
/// logging it as a warning.
pub async fn fetch_or_empty(source: &dyn TrendSource, request: &FetchRequest) -> Vec<TrendItem> {
    match source.fetch_trends(request).await {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(source = source.name(), error = %err, "fetch failed, returning empty batch");
            Vec::new()
        }
    }
}
