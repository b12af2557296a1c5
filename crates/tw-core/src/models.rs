//! # Domain Models
//!
//! `TrendItem` is the normalized record every source produces and every
//! store persists. Stores keep their own surrogate ids; those never appear here.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timestamp::repair_fetched_at;

/// The kind of source that produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Social link aggregator (reddit-style listings)
    Social,
    /// Video platform
    Video,
    /// Generic crawled web page
    Web,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Social => "social",
            Platform::Video => "video",
            Platform::Web => "web",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown platform {:?}", self.0)
    }
}

impl std::error::Error for UnknownPlatform {}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    /// Accepts the canonical names plus the vendor names older rows were
    /// written with ("reddit", "youtube").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "social" | "reddit" => Ok(Platform::Social),
            "video" | "youtube" => Ok(Platform::Video),
            "web" => Ok(Platform::Web),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

/// A single trending item, stamped with its position in the batch it was
/// fetched with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendItem {
    pub platform: Platform,
    /// May be empty when the source provided no title
    pub title: String,
    /// Absolute URL
    pub url: String,
    /// Producer-defined ranking signal
    pub score: i64,
    /// 1-based position within the batch
    pub rank: i64,
    /// Shared by every item of one batch
    pub fetched_at: DateTime<Utc>,
}

impl TrendItem {
    /// Rebuilds a record from persisted field values.
    ///
    /// Unparseable timestamps are repaired (see [`repair_fetched_at`]).
    /// Returns `None` when the platform is not one of the known kinds.
    pub fn restore(platform: &str, title: String, url: String, score: i64, rank: i64, fetched_at: &str) -> Option<Self> {
        let platform = match platform.parse::<Platform>() {
            Ok(platform) => platform,
            Err(err) => {
                tracing::warn!(%err, url, "skipping stored record");
                return None;
            }
        };
        Some(Self {
            platform,
            title,
            url,
            score,
            rank,
            fetched_at: repair_fetched_at(fetched_at),
        })
    }
}

/// What a source knows about one item before the batch is ranked and stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendEntry {
    pub title: String,
    pub url: String,
    pub score: i64,
}

impl TrendEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>, score: i64) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            score,
        }
    }
}

/// Turns entries (already in the source's own priority order) into a batch:
/// ranks are assigned 1..=N in that order and every item shares one timestamp.
pub fn rank_batch<I>(platform: Platform, entries: I) -> Vec<TrendItem>
where
    I: IntoIterator<Item = TrendEntry>,
{
    rank_batch_at(platform, Utc::now(), entries)
}

/// Same as [`rank_batch`] with an explicit snapshot time.
pub fn rank_batch_at<I>(platform: Platform, fetched_at: DateTime<Utc>, entries: I) -> Vec<TrendItem>
where
    I: IntoIterator<Item = TrendEntry>,
{
    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| TrendItem {
            platform,
            title: entry.title,
            url: entry.url,
            score: entry.score,
            rank: idx as i64 + 1,
            fetched_at,
        })
        .collect()
}
