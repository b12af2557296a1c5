//! # tw-source-youtube
//!
//! Synthetic video-platform source. Makes no network calls: it generates a
//! deterministic batch so the source contract can be exercised without a
//! live dependency.

use async_trait::async_trait;
use tw_core::{rank_batch, FetchRequest, Platform, Result, TrendEntry, TrendItem, TrendSource};

/// Region used when neither the constructor nor the request provides one.
pub const DEFAULT_REGION: &str = "US";

const TOP_SCORE: i64 = 500;
const SCORE_STEP: i64 = 5;

pub struct YouTubeDemoSource {
    region: String,
}

impl YouTubeDemoSource {
    /// A blank region falls back to [`DEFAULT_REGION`].
    pub fn new(region: impl Into<String>) -> Self {
        let region = region.into();
        let region = if region.trim().is_empty() {
            DEFAULT_REGION.to_string()
        } else {
            region.trim().to_string()
        };
        Self { region }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn entries(limit: usize, region: &str) -> impl Iterator<Item = TrendEntry> + '_ {
        (1..=limit).map(move |i| {
            TrendEntry::new(
                format!("Trending YouTube Video #{i} ({region})"),
                format!("https://youtube.com/watch?v=video{i}&gl={region}"),
                TOP_SCORE - SCORE_STEP * i as i64,
            )
        })
    }
}

impl Default for YouTubeDemoSource {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

#[async_trait]
impl TrendSource for YouTubeDemoSource {
    fn name(&self) -> &str {
        "youtube-demo"
    }

    fn platform(&self) -> Platform {
        Platform::Video
    }

    /// Always returns exactly `request.effective_limit()` items.
    async fn fetch_trends(&self, request: &FetchRequest) -> Result<Vec<TrendItem>> {
        let limit = request.effective_limit();
        let region = request.region_or(&self.region);
        tracing::debug!(limit, region, "generating demo video trends");
        Ok(rank_batch(Platform::Video, Self::entries(limit, region)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_core::{DEFAULT_LIMIT, MAX_LIMIT};

    #[tokio::test]
    async fn test_three_us_videos() {
        let source = YouTubeDemoSource::default();
        let items = source
            .fetch_trends(&FetchRequest::new(3).with_region("US"))
            .await
            .unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items.iter().map(|t| t.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(items.iter().all(|t| t.platform == Platform::Video));
        assert!(items.windows(2).all(|w| w[0].score > w[1].score));
        assert!(items.iter().all(|t| t.fetched_at == items[0].fetched_at));
        assert_eq!(items[0].title, "Trending YouTube Video #1 (US)");
        assert_eq!(items[0].score, 495);
    }

    #[tokio::test]
    async fn test_invalid_limit_yields_default_count() {
        let source = YouTubeDemoSource::default();
        for bad in [0, -1, -500] {
            let items = source.fetch_trends(&FetchRequest::new(bad)).await.unwrap();
            assert_eq!(items.len(), DEFAULT_LIMIT, "limit {bad}");
        }
    }

    #[tokio::test]
    async fn test_huge_limit_is_capped() {
        let source = YouTubeDemoSource::default();
        let items = source.fetch_trends(&FetchRequest::new(i64::MAX)).await.unwrap();
        assert_eq!(items.len(), MAX_LIMIT);
        assert_eq!(items.last().map(|t| t.rank), Some(MAX_LIMIT as i64));
    }

    #[tokio::test]
    async fn test_region_override_and_blank_fallback() {
        let source = YouTubeDemoSource::new("GB");
        let own = source.fetch_trends(&FetchRequest::new(1)).await.unwrap();
        assert!(own[0].title.ends_with("(GB)"));
        assert!(own[0].url.contains("video1") && own[0].url.contains("GB"));

        let overridden = source
            .fetch_trends(&FetchRequest::new(1).with_region("JP"))
            .await
            .unwrap();
        assert!(overridden[0].title.ends_with("(JP)"));

        let blank = source
            .fetch_trends(&FetchRequest::new(1).with_region(""))
            .await
            .unwrap();
        assert!(blank[0].title.ends_with("(GB)"));

        assert_eq!(YouTubeDemoSource::new("   ").region(), DEFAULT_REGION);
    }
}
