//! Wire format of a subreddit listing (`{ data: { children: [ { data } ] } }`).

use serde::Deserialize;
use tw_core::{AppError, Result, TrendEntry};

/// Prefix joined to each post's `permalink`.
pub const LINK_BASE: &str = "https://reddit.com";

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Default, Deserialize)]
struct Post {
    #[serde(default)]
    title: String,
    #[serde(default)]
    permalink: String,
    score: Option<i64>,
    ups: Option<i64>,
}

impl From<Post> for TrendEntry {
    fn from(post: Post) -> Self {
        TrendEntry {
            title: post.title,
            url: format!("{LINK_BASE}{}", post.permalink),
            score: post.score.or(post.ups).unwrap_or(0),
        }
    }
}

/// Decodes a listing body into at most `limit` entries in listing order.
pub fn parse_listing(body: &[u8], limit: usize) -> Result<Vec<TrendEntry>> {
    let listing: Listing = serde_json::from_slice(body).map_err(AppError::parse)?;
    Ok(listing
        .data
        .children
        .into_iter()
        .take(limit)
        .map(|child| child.data.into())
        .collect())
}
