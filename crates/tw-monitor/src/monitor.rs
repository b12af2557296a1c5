//! # TrendMonitor
//!
//! Sequences one source and one store. Holds nothing but the two capability
//! handles; no retries and no caching happen here.

use tw_core::{FetchRequest, TrendSource, TrendStore};

use crate::report::{FetchReport, LatestReport};

pub struct TrendMonitor {
    source: Box<dyn TrendSource>,
    store: Box<dyn TrendStore>,
}

impl TrendMonitor {
    pub fn new(source: Box<dyn TrendSource>, store: Box<dyn TrendStore>) -> Self {
        Self { source, store }
    }

    pub fn source(&self) -> &dyn TrendSource {
        self.source.as_ref()
    }

    pub fn store(&self) -> &dyn TrendStore {
        self.store.as_ref()
    }

    /// Swaps the source, returning the previous one.
    pub fn set_source(&mut self, source: Box<dyn TrendSource>) -> Box<dyn TrendSource> {
        std::mem::replace(&mut self.source, source)
    }

    /// Swaps the store (e.g. switching backend) while keeping the source.
    pub fn set_store(&mut self, store: Box<dyn TrendStore>) -> Box<dyn TrendStore> {
        std::mem::replace(&mut self.store, store)
    }

    pub async fn fetch_and_store(&self, limit: i64) -> FetchReport {
        self.fetch_and_store_with(&FetchRequest::new(limit)).await
    }

    /// Fetches one batch and persists it. An empty or failed fetch never
    /// reaches the store.
    pub async fn fetch_and_store_with(&self, request: &FetchRequest) -> FetchReport {
        let source = self.source.name().to_string();

        let items = match self.source.fetch_trends(request).await {
            Ok(items) => items,
            Err(error) => {
                tracing::warn!(%source, %error, "source fetch failed");
                return FetchReport::SourceFailed { source, error };
            }
        };

        if items.is_empty() {
            tracing::info!(%source, "no trends fetched, nothing to save");
            return FetchReport::NoTrends { source };
        }

        let backend = self.store.backend().to_string();
        match self.store.save_trends(&items).await {
            Ok(count) => {
                tracing::info!(%source, %backend, count, "trends stored");
                FetchReport::Stored { source, backend, count }
            }
            Err(error) => {
                tracing::error!(%source, %backend, %error, "failed to save trends");
                FetchReport::StoreFailed {
                    source,
                    backend,
                    fetched: items.len(),
                    error,
                }
            }
        }
    }

    pub async fn show_latest(&self, limit: i64) -> LatestReport {
        match self.store.get_latest(limit).await {
            Ok(items) if items.is_empty() => LatestReport::NoData,
            Ok(items) => LatestReport::Trends(items),
            Err(error) => {
                let backend = self.store.backend().to_string();
                tracing::error!(%backend, %error, "failed to read trends");
                LatestReport::Failed { backend, error }
            }
        }
    }
}
