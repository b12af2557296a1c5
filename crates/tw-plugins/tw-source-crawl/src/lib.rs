//! # tw-source-crawl
//!
//! Generic web-crawl source: fetches one static page and turns its repeated
//! rows into a batch. Defaults target the Hacker News front page.

mod extract;

pub use extract::{extract_rows, RowSelectors, DEFAULT_LINK_SELECTOR, DEFAULT_ROW_SELECTOR};

use async_trait::async_trait;
use reqwest::Client;
use tw_core::{rank_batch, AppError, FetchRequest, HttpOptions, Platform, Result, TrendItem, TrendSource};
use url::Url;

pub const DEFAULT_CRAWL_URL: &str = "https://news.ycombinator.com/";

pub struct CrawlSource {
    client: Client,
    page_url: Url,
    selectors: RowSelectors,
    label: String,
}

impl CrawlSource {
    /// Crawler for the Hacker News front page with default settings.
    pub fn hacker_news() -> Result<Self> {
        Self::new(DEFAULT_CRAWL_URL, RowSelectors::default(), &HttpOptions::default())
    }

    pub fn new(page_url: &str, selectors: RowSelectors, options: &HttpOptions) -> Result<Self> {
        let page_url = Url::parse(page_url)
            .map_err(|e| AppError::Validation(format!("crawl url {page_url:?}: {e}")))?;

        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("http client: {e}")))?;

        Ok(Self {
            label: format!("crawl:{}", page_url.host_str().unwrap_or("page")),
            client,
            page_url,
            selectors,
        })
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }
}

#[async_trait]
impl TrendSource for CrawlSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn platform(&self) -> Platform {
        Platform::Web
    }

    async fn fetch_trends(&self, request: &FetchRequest) -> Result<Vec<TrendItem>> {
        let limit = request.effective_limit();
        tracing::debug!(url = %self.page_url, limit, "crawling page");

        let html = self
            .client
            .get(self.page_url.clone())
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(AppError::fetch)?
            .text()
            .await
            .map_err(AppError::fetch)?;

        let entries = extract_rows(&html, &self.page_url, &self.selectors, limit);
        if entries.is_empty() {
            tracing::warn!(url = %self.page_url, "crawl returned no rows");
            return Ok(Vec::new());
        }
        Ok(rank_batch(Platform::Web, entries))
    }
}
