//! Compiled-to-order plugin assembly: each backend and source is only
//! available when its feature is enabled.

use anyhow::Result;
use async_trait::async_trait;
use configs::{Backend, Settings, SourceKind};
use tw_core::{TrendSource, TrendStore};

/// Builds capability objects for the menu. Kept behind a trait so the menu
/// can be driven with test doubles.
#[async_trait]
pub trait Wiring: Send + Sync {
    async fn open_store(&self, backend: Backend) -> Result<Box<dyn TrendStore>>;
    fn build_source(&self, kind: SourceKind) -> Result<Box<dyn TrendSource>>;
}

pub struct PluginWiring {
    settings: Settings,
}

impl PluginWiring {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[allow(dead_code)]
    fn http_options(&self) -> tw_core::HttpOptions {
        tw_core::HttpOptions {
            user_agent: self.settings.source.user_agent.clone(),
            timeout: self.settings.source.timeout(),
        }
    }
}

#[async_trait]
impl Wiring for PluginWiring {
    async fn open_store(&self, backend: Backend) -> Result<Box<dyn TrendStore>> {
        #[allow(unused_variables)]
        let storage = &self.settings.storage;
        match backend {
            #[cfg(feature = "db-sqlite")]
            Backend::Sqlite => {
                let store = tw_db_sqlite::SqliteTrendStore::new(&storage.sqlite_path).await?;
                Ok(Box::new(store))
            }
            #[cfg(feature = "db-mongo")]
            Backend::Mongo => {
                use secrecy::ExposeSecret;
                let store =
                    tw_db_mongo::MongoTrendStore::new(storage.mongo_uri.expose_secret(), &storage.mongo_database)
                        .await?;
                Ok(Box::new(store))
            }
            #[allow(unreachable_patterns)]
            other => anyhow::bail!("{other:?} backend is not compiled into this build"),
        }
    }

    fn build_source(&self, kind: SourceKind) -> Result<Box<dyn TrendSource>> {
        #[allow(unused_variables)]
        let source = &self.settings.source;
        match kind {
            #[cfg(feature = "source-reddit")]
            SourceKind::Reddit => Ok(Box::new(tw_source_reddit::RedditSource::with_options(
                &source.subreddit,
                tw_source_reddit::DEFAULT_API_BASE,
                &self.http_options(),
            )?)),
            #[cfg(feature = "source-youtube")]
            SourceKind::Youtube => Ok(Box::new(tw_source_youtube::YouTubeDemoSource::new(&source.region))),
            #[cfg(feature = "source-crawl")]
            SourceKind::Crawl => Ok(Box::new(tw_source_crawl::CrawlSource::new(
                &source.crawl_url,
                tw_source_crawl::RowSelectors::default(),
                &self.http_options(),
            )?)),
            #[allow(unreachable_patterns)]
            other => anyhow::bail!("{other:?} source is not compiled into this build"),
        }
    }
}
