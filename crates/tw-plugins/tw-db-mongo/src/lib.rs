//! # tw-db-mongo
//!
//! Document-store backend: a single `trends` collection, newest-first reads
//! ordered by the driver-assigned `_id`.

mod document;

pub use document::TrendDocument;

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tokio::sync::OnceCell;
use tw_core::{coerce_limit, AppError, Result, TrendItem, TrendStore};

pub const DEFAULT_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "trendwatch";
pub const COLLECTION: &str = "trends";

// server reply code for "collection already exists"
const NAMESPACE_EXISTS: i32 = 48;

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

pub struct MongoTrendStore {
    database: Database,
    collection: Collection<TrendDocument>,
    prepared: OnceCell<()>,
}

impl MongoTrendStore {
    /// Builds the client without touching the server; an unreachable server
    /// surfaces as a storage error on the first save or read. A malformed
    /// URI still fails here.
    pub async fn new(uri: &str, database: &str) -> Result<Self> {
        Self::with_timeout(uri, database, SERVER_SELECTION_TIMEOUT).await
    }

    /// Like [`MongoTrendStore::new`] with a custom server selection timeout.
    pub async fn with_timeout(uri: &str, database: &str, server_selection: Duration) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await.map_err(AppError::storage)?;
        options.app_name = Some("trendwatch".to_string());
        options.server_selection_timeout = Some(server_selection);

        let client = Client::with_options(options).map_err(AppError::storage)?;
        let database = client.database(database);
        Ok(Self {
            collection: database.collection(COLLECTION),
            database,
            prepared: OnceCell::new(),
        })
    }

    /// Makes sure the `trends` collection exists, once per store. Opening the
    /// same database twice leaves the collection and its documents alone. A
    /// failed attempt is retried on the next call.
    async fn ready(&self) -> Result<()> {
        self.prepared
            .get_or_try_init(|| self.ensure_collection())
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::error!(error = %e, "could not prepare trends collection");
                AppError::storage(e)
            })
    }

    async fn ensure_collection(&self) -> mongodb::error::Result<()> {
        let existing = self.database.list_collection_names().await?;
        if existing.iter().any(|name| name == COLLECTION) {
            return Ok(());
        }
        match self.database.create_collection(COLLECTION).await {
            Ok(()) => Ok(()),
            // created concurrently by another process
            Err(e) if matches!(*e.kind, ErrorKind::Command(ref c) if c.code == NAMESPACE_EXISTS) => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn find_latest(&self, limit: i64) -> mongodb::error::Result<Vec<TrendDocument>> {
        self.collection
            .find(doc! {})
            .sort(doc! { "_id": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Drops the whole database. Only meant for test cleanup.
    pub async fn drop_database(&self) -> Result<()> {
        self.database.drop().await.map_err(AppError::storage)
    }
}

#[async_trait]
impl TrendStore for MongoTrendStore {
    fn backend(&self) -> &str {
        "mongo"
    }

    async fn save_trends(&self, items: &[TrendItem]) -> Result<usize> {
        if items.is_empty() {
            return Ok(0);
        }
        self.ready().await?;
        let docs: Vec<TrendDocument> = items.iter().map(TrendDocument::from).collect();
        let result = self.collection.insert_many(docs).await.map_err(|e| {
            tracing::error!(error = %e, count = items.len(), "mongo insert_many failed");
            AppError::storage(e)
        })?;
        Ok(result.inserted_ids.len())
    }

    async fn get_latest(&self, limit: i64) -> Result<Vec<TrendItem>> {
        let limit = i64::try_from(coerce_limit(limit)).unwrap_or(i64::MAX);
        self.ready().await?;
        let docs = self.find_latest(limit).await.map_err(|e| {
            tracing::error!(error = %e, "mongo query failed");
            AppError::storage(e)
        })?;

        Ok(docs.into_iter().filter_map(TrendDocument::into_item).collect())
    }
}
