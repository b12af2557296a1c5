//! Request shaping for fetches and reads.
//!
//! Bad counts and blank regions are coerced to defaults here instead of
//! being rejected; they only affect how much is asked for, never what a
//! record contains.

use std::time::Duration;

/// Count used whenever the caller's count is missing or unusable.
pub const DEFAULT_LIMIT: usize = 10;

/// Largest count any single fetch or read will honour. Matches the listing
/// API's own cap.
pub const MAX_LIMIT: usize = 100;

/// Maps a raw count to a usable one: anything below 1 becomes
/// [`DEFAULT_LIMIT`], anything above [`MAX_LIMIT`] is clamped to it.
pub fn coerce_limit(raw: i64) -> usize {
    if raw <= 0 {
        DEFAULT_LIMIT
    } else {
        usize::try_from(raw).map_or(MAX_LIMIT, |n| n.min(MAX_LIMIT))
    }
}

/// Parses operator input such as `"25"`, `""` or `"lots"`.
pub fn parse_limit(input: &str) -> usize {
    input
        .trim()
        .parse::<i64>()
        .map(coerce_limit)
        .unwrap_or(DEFAULT_LIMIT)
}

/// User-Agent sent by every networked source.
pub const DEFAULT_USER_AGENT: &str = "TrendWatchScraper/1.0";

/// Upper bound on any single network or crawl call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client settings shared by the networked sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Parameters for one `fetch_trends` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchRequest {
    /// Upper bound on items, as given by the caller (may be invalid)
    pub limit: i64,
    /// Region hint for sources that support one
    pub region: Option<String>,
}

impl FetchRequest {
    pub fn new(limit: i64) -> Self {
        Self {
            limit,
            region: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn effective_limit(&self) -> usize {
        coerce_limit(self.limit)
    }

    /// The requested region, or `fallback` if none was given or it is blank.
    pub fn region_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.region.as_deref().map(str::trim) {
            Some(region) if !region.is_empty() => region,
            _ => fallback,
        }
    }
}

impl From<usize> for FetchRequest {
    fn from(limit: usize) -> Self {
        Self::new(i64::try_from(limit).unwrap_or(i64::MAX))
    }
}
