//! # tw-db-sqlite Implementation
//!
//! Relational-file backend: one SQLite file, one `trends` table whose columns
//! mirror `TrendItem` plus an autoincrement surrogate key.
//!
//! A connection is opened per call and closed before returning, so nothing is
//! held between monitor operations.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection, FromRow};
use tw_core::timestamp::format_fetched_at;
use tw_core::{coerce_limit, AppError, Result, TrendItem, TrendStore};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS trends (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    platform   TEXT,
    title      TEXT,
    url        TEXT,
    score      INTEGER,
    rank       INTEGER,
    fetched_at TEXT
)";

const INSERT_TREND: &str =
    "INSERT INTO trends (platform, title, url, score, rank, fetched_at) VALUES (?, ?, ?, ?, ?, ?)";

// fetched_at is cast so legacy non-text values still decode and get repaired
const SELECT_LATEST: &str = "SELECT platform, title, url, score, rank, CAST(fetched_at AS TEXT) AS fetched_at
     FROM trends ORDER BY id DESC LIMIT ?";

pub struct SqliteTrendStore {
    options: SqliteConnectOptions,
}

/// A row as stored. Every column is nullable so hand-edited rows still load.
#[derive(Debug, FromRow)]
struct TrendRow {
    platform: Option<String>,
    title: Option<String>,
    url: Option<String>,
    score: Option<i64>,
    rank: Option<i64>,
    fetched_at: Option<String>,
}

impl TrendRow {
    fn into_item(self) -> Option<TrendItem> {
        TrendItem::restore(
            self.platform.as_deref().unwrap_or_default(),
            self.title.unwrap_or_default(),
            self.url.unwrap_or_default(),
            self.score.unwrap_or_default(),
            self.rank.unwrap_or_default(),
            self.fetched_at.as_deref().unwrap_or_default(),
        )
    }
}

impl SqliteTrendStore {
    /// Opens (creating if needed) the store at `location`, either a plain
    /// file path or a `sqlite:` URL, and ensures the table exists.
    ///
    /// Safe to call repeatedly against the same file.
    pub async fn new(location: &str) -> Result<Self> {
        let options = if location.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(location).map_err(AppError::storage)?
        } else {
            SqliteConnectOptions::new().filename(Path::new(location))
        }
        .create_if_missing(true);

        let store = Self { options };
        store.ensure_schema().await.map_err(|e| {
            tracing::error!(location, error = %e, "could not open trend database");
            AppError::storage(e)
        })?;
        Ok(store)
    }

    async fn connect(&self) -> sqlx::Result<SqliteConnection> {
        self.options.connect().await
    }

    async fn ensure_schema(&self) -> sqlx::Result<()> {
        let mut conn = self.connect().await?;
        sqlx::query(CREATE_TABLE).execute(&mut conn).await?;
        conn.close().await
    }

    /// One transaction per batch; a failure part way leaves earlier batches as they were.
    async fn insert_batch(&self, items: &[TrendItem]) -> sqlx::Result<()> {
        let mut conn = self.connect().await?;
        let mut tx = conn.begin().await?;

        for item in items {
            sqlx::query(INSERT_TREND)
                .bind(item.platform.as_str())
                .bind(&item.title)
                .bind(&item.url)
                .bind(item.score)
                .bind(item.rank)
                .bind(format_fetched_at(&item.fetched_at))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        conn.close().await
    }

    async fn select_latest(&self, limit: usize) -> sqlx::Result<Vec<TrendRow>> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query_as::<_, TrendRow>(SELECT_LATEST)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&mut conn)
            .await?;
        conn.close().await?;
        Ok(rows)
    }
}

#[async_trait]
impl TrendStore for SqliteTrendStore {
    fn backend(&self) -> &str {
        "sqlite"
    }

    async fn save_trends(&self, items: &[TrendItem]) -> Result<usize> {
        if items.is_empty() {
            return Ok(0);
        }
        self.insert_batch(items).await.map_err(|e| {
            tracing::error!(error = %e, count = items.len(), "sqlite insert failed");
            AppError::storage(e)
        })?;
        tracing::debug!(count = items.len(), "batch committed");
        Ok(items.len())
    }

    async fn get_latest(&self, limit: i64) -> Result<Vec<TrendItem>> {
        let rows = self.select_latest(coerce_limit(limit)).await.map_err(|e| {
            tracing::error!(error = %e, "sqlite query failed");
            AppError::storage(e)
        })?;
        Ok(rows.into_iter().filter_map(TrendRow::into_item).collect())
    }
}
