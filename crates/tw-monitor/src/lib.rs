//! trendwatch/crates/tw-monitor/src/lib.rs
//!
//! Coordinates one `TrendSource` with one `TrendStore` and reports what happened.

pub mod monitor;
pub mod report;

pub use monitor::TrendMonitor;
pub use report::{render_item, FetchReport, LatestReport};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tw_core::{rank_batch_at, AppError, FetchRequest, MockTrendSource, MockTrendStore, Platform, TrendEntry, TrendItem};

    fn items(n: usize) -> Vec<TrendItem> {
        let ts = Utc.with_ymd_and_hms(2025, 9, 1, 6, 0, 0).unwrap();
        rank_batch_at(
            Platform::Social,
            ts,
            (1..=n).map(|i| TrendEntry::new(format!("t{i}"), format!("https://reddit.com/{i}"), i as i64)),
        )
    }

    fn source_returning(result: tw_core::Result<Vec<TrendItem>>) -> MockTrendSource {
        let mut source = MockTrendSource::new();
        source.expect_name().return_const("reddit:r/news".to_string());
        source.expect_fetch_trends().times(1).return_once(move |_| result);
        source
    }

    fn store_named() -> MockTrendStore {
        let mut store = MockTrendStore::new();
        store.expect_backend().return_const("sqlite".to_string());
        store
    }

    #[tokio::test]
    async fn test_fetch_error_skips_store() {
        let source = source_returning(Err(AppError::fetch("connection reset")));
        let mut store = store_named();
        store.expect_save_trends().never();

        let monitor = TrendMonitor::new(Box::new(source), Box::new(store));
        let report = monitor.fetch_and_store(5).await;

        assert!(matches!(report, FetchReport::SourceFailed { .. }));
        assert!(report.to_string().starts_with("No trends fetched"));
        assert_eq!(report.written(), 0);
    }

    #[tokio::test]
    async fn test_empty_fetch_skips_store() {
        let source = source_returning(Ok(Vec::new()));
        let mut store = store_named();
        store.expect_save_trends().never();

        let monitor = TrendMonitor::new(Box::new(source), Box::new(store));
        let report = monitor.fetch_and_store(5).await;

        assert_eq!(
            report,
            FetchReport::NoTrends {
                source: "reddit:r/news".into()
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_then_store() {
        let source = source_returning(Ok(items(3)));
        let mut store = store_named();
        store
            .expect_save_trends()
            .withf(|batch| batch.len() == 3 && batch[0].rank == 1)
            .times(1)
            .returning(|batch| Ok(batch.len()));

        let monitor = TrendMonitor::new(Box::new(source), Box::new(store));
        let report = monitor.fetch_and_store(3).await;

        assert!(report.is_stored());
        assert_eq!(report.written(), 3);
        assert_eq!(report.to_string(), "Saved 3 trends from reddit:r/news to sqlite.");
    }

    #[tokio::test]
    async fn test_store_failure_is_distinct() {
        let source = source_returning(Ok(items(2)));
        let mut store = store_named();
        store
            .expect_save_trends()
            .times(1)
            .returning(|_| Err(AppError::storage("database is locked")));

        let monitor = TrendMonitor::new(Box::new(source), Box::new(store));
        let report = monitor.fetch_and_store(2).await;

        match &report {
            FetchReport::StoreFailed { fetched, error, .. } => {
                assert_eq!(*fetched, 2);
                assert!(matches!(error, AppError::Storage(_)));
            }
            other => panic!("unexpected report {other:?}"),
        }
        assert!(report.to_string().contains("saving to sqlite failed"));
    }

    #[tokio::test]
    async fn test_show_latest_no_data() {
        let mut store = store_named();
        store.expect_get_latest().returning(|_| Ok(Vec::new()));
        let monitor = TrendMonitor::new(Box::new(MockTrendSource::new()), Box::new(store));

        let report = monitor.show_latest(10).await;
        assert_eq!(report, LatestReport::NoData);
        assert_eq!(report.to_string(), "No data in database yet.");
    }

    #[tokio::test]
    async fn test_show_latest_renders_in_store_order() {
        let mut store = store_named();
        store
            .expect_get_latest()
            .withf(|limit| *limit == 2)
            .returning(|_| Ok(items(2).into_iter().rev().collect()));
        let monitor = TrendMonitor::new(Box::new(MockTrendSource::new()), Box::new(store));

        let report = monitor.show_latest(2).await;
        assert_eq!(report.items().len(), 2);
        assert_eq!(report.items()[0].rank, 2);

        let text = report.to_string();
        assert!(text.starts_with("Last 2 saved trends:"));
        let first = text.find("[SOCIAL #2] t2 (score=2)").unwrap();
        let second = text.find("[SOCIAL #1] t1 (score=1)").unwrap();
        assert!(first < second);
        assert!(text.contains("fetched_at=2025-09-01T06:00:00+00:00"));
    }

    #[tokio::test]
    async fn test_show_latest_failure() {
        let mut store = store_named();
        store
            .expect_get_latest()
            .returning(|_| Err(AppError::storage("no such table")));
        let monitor = TrendMonitor::new(Box::new(MockTrendSource::new()), Box::new(store));

        let report = monitor.show_latest(5).await;
        assert!(matches!(report, LatestReport::Failed { .. }));
        assert!(report.items().is_empty());
    }

    #[tokio::test]
    async fn test_switching_store_keeps_source() {
        let mut source = MockTrendSource::new();
        source.expect_name().return_const("youtube-demo".to_string());
        source.expect_fetch_trends().times(1).returning(|_| Ok(items(1)));

        let mut old_store = store_named();
        old_store.expect_save_trends().never();

        let mut new_store = MockTrendStore::new();
        new_store.expect_backend().return_const("mongo".to_string());
        new_store.expect_save_trends().times(1).returning(|b| Ok(b.len()));

        let mut monitor = TrendMonitor::new(Box::new(source), Box::new(old_store));
        let previous = monitor.set_store(Box::new(new_store));
        assert_eq!(previous.backend(), "sqlite");
        assert_eq!(monitor.store().backend(), "mongo");

        let report = monitor.fetch_and_store(1).await;
        assert_eq!(report.to_string(), "Saved 1 trends from youtube-demo to mongo.");
    }

    #[tokio::test]
    async fn test_fetch_with_passes_region_through() {
        let mut source = MockTrendSource::new();
        source.expect_name().return_const("youtube-demo".to_string());
        source
            .expect_fetch_trends()
            .withf(|req| req.region.as_deref() == Some("JP") && req.effective_limit() == 2)
            .times(1)
            .returning(|_| Ok(items(2)));

        let mut store = store_named();
        store.expect_save_trends().times(1).returning(|b| Ok(b.len()));

        let monitor = TrendMonitor::new(Box::new(source), Box::new(store));
        let report = monitor
            .fetch_and_store_with(&FetchRequest::new(2).with_region("JP"))
            .await;
        assert_eq!(report.written(), 2);
    }

    #[tokio::test]
    async fn test_switching_source_keeps_store() {
        let mut old_source = MockTrendSource::new();
        old_source.expect_name().return_const("reddit:r/news".to_string());
        old_source.expect_fetch_trends().never();

        let mut new_source = MockTrendSource::new();
        new_source.expect_name().return_const("crawl:news.ycombinator.com".to_string());
        new_source.expect_fetch_trends().times(1).returning(|_| Ok(items(4)));

        let mut store = store_named();
        store.expect_save_trends().times(1).returning(|b| Ok(b.len()));

        let mut monitor = TrendMonitor::new(Box::new(old_source), Box::new(store));
        let previous = monitor.set_source(Box::new(new_source));
        assert_eq!(previous.name(), "reddit:r/news");
        assert_eq!(monitor.source().name(), "crawl:news.ycombinator.com");

        let report = monitor.fetch_and_store(4).await;
        assert_eq!(report.to_string(), "Saved 4 trends from crawl:news.ycombinator.com to sqlite.");
    }

    #[test]
    fn test_render_item() {
        let item = &items(1)[0];
        let text = render_item(item);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[SOCIAL #1] t1 (score=1)");
        assert_eq!(lines[1], "  https://reddit.com/1");
        assert_eq!(lines[3].len(), 80);
    }
}
