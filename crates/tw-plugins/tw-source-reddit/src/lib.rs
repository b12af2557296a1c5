//! # tw-source-reddit
//!
//! Social-feed source backed by a subreddit's `hot` listing.

mod listing;

pub use listing::{parse_listing, LINK_BASE};

use async_trait::async_trait;
use reqwest::Client;
use tw_core::{rank_batch, AppError, FetchRequest, HttpOptions, Platform, Result, TrendItem, TrendSource};

/// Listing API root.
pub const DEFAULT_API_BASE: &str = "https://www.reddit.com";

/// Subreddit used when the configured one is blank.
pub const DEFAULT_SUBREDDIT: &str = "news";

pub struct RedditSource {
    client: Client,
    subreddit: String,
    api_base: String,
    label: String,
}

impl RedditSource {
    /// Source for `r/{subreddit}` with the default client settings.
    pub fn new(subreddit: impl Into<String>) -> Result<Self> {
        Self::with_options(subreddit, DEFAULT_API_BASE, &HttpOptions::default())
    }

    /// Fully configured source; `api_base` lets tests point at a local server.
    pub fn with_options(
        subreddit: impl Into<String>,
        api_base: impl Into<String>,
        options: &HttpOptions,
    ) -> Result<Self> {
        let subreddit = subreddit.into();
        let subreddit = match subreddit.trim().trim_start_matches("r/") {
            "" => DEFAULT_SUBREDDIT.to_string(),
            name => name.to_string(),
        };

        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("http client: {e}")))?;

        Ok(Self {
            label: format!("reddit:r/{subreddit}"),
            client,
            subreddit,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }

    fn listing_url(&self) -> String {
        format!("{}/r/{}/hot.json", self.api_base, self.subreddit)
    }
}

#[async_trait]
impl TrendSource for RedditSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn platform(&self) -> Platform {
        Platform::Social
    }

    async fn fetch_trends(&self, request: &FetchRequest) -> Result<Vec<TrendItem>> {
        let limit = request.effective_limit();
        let url = self.listing_url();
        tracing::debug!(%url, limit, "fetching subreddit listing");

        let body = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(AppError::fetch)?
            .bytes()
            .await
            .map_err(AppError::fetch)?;

        let entries = parse_listing(&body, limit)?;
        if entries.is_empty() {
            tracing::warn!(subreddit = %self.subreddit, "listing returned no posts");
        }
        Ok(rank_batch(Platform::Social, entries))
    }
}
