//! Shape of a document in the `trends` collection.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use tw_core::timestamp::format_fetched_at;
use tw_core::TrendItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDocument {
    /// Driver-assigned on insert; its ordering is the store's insertion order.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub rank: i64,
    /// Written as an ISO-8601 string; older writers may have left a BSON date.
    #[serde(default)]
    pub fetched_at: Bson,
}

impl From<&TrendItem> for TrendDocument {
    fn from(item: &TrendItem) -> Self {
        Self {
            id: None,
            platform: item.platform.as_str().to_string(),
            title: item.title.clone(),
            url: item.url.clone(),
            score: item.score,
            rank: item.rank,
            fetched_at: Bson::String(format_fetched_at(&item.fetched_at)),
        }
    }
}

impl TrendDocument {
    fn fetched_at_text(&self) -> String {
        match &self.fetched_at {
            Bson::String(raw) => raw.clone(),
            Bson::DateTime(dt) => dt.try_to_rfc3339_string().unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// `None` for documents whose platform is not a known kind.
    pub fn into_item(self) -> Option<TrendItem> {
        let fetched_at = self.fetched_at_text();
        TrendItem::restore(&self.platform, self.title, self.url, self.score, self.rank, &fetched_at)
    }
}
