//! Row extraction from a fetched page.
//!
//! `scraper::Html` is not `Send`, so everything here is synchronous and must
//! finish before the caller's next `.await`.

use scraper::{ElementRef, Html, Selector};
use tw_core::{AppError, Result, TrendEntry};
use url::Url;

/// Story rows on the Hacker News front page.
pub const DEFAULT_ROW_SELECTOR: &str = "tr.athing";
/// Title link inside a story row.
pub const DEFAULT_LINK_SELECTOR: &str = "span.titleline a";

const TOP_SCORE: i64 = 1000;
const SCORE_STEP: i64 = 10;

/// Compiled row/link selectors.
#[derive(Debug, Clone)]
pub struct RowSelectors {
    row: Selector,
    link: Selector,
}

impl RowSelectors {
    pub fn parse(row: &str, link: &str) -> Result<Self> {
        Ok(Self {
            row: compile(row)?,
            link: compile(link)?,
        })
    }
}

impl Default for RowSelectors {
    fn default() -> Self {
        Self::parse(DEFAULT_ROW_SELECTOR, DEFAULT_LINK_SELECTOR)
            .unwrap_or_else(|e| unreachable!("built-in selectors are valid: {e}"))
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::Validation(format!("selector {selector:?}: {e}")))
}

/// Pulls up to `limit` rows in document order. Rows without a usable link
/// are skipped; scores decrease by position among the rows kept.
pub fn extract_rows(html: &str, page_url: &Url, selectors: &RowSelectors, limit: usize) -> Vec<TrendEntry> {
    let document = Html::parse_document(html);
    document
        .select(&selectors.row)
        .filter_map(|row| row_link(row, page_url, &selectors.link))
        .take(limit)
        .enumerate()
        .map(|(idx, (title, url))| {
            let rank = idx as i64 + 1;
            TrendEntry::new(title, url, TOP_SCORE - SCORE_STEP * rank)
        })
        .collect()
}

fn row_link(row: ElementRef<'_>, page_url: &Url, link: &Selector) -> Option<(String, String)> {
    let anchor = row.select(link).next()?;
    let href = anchor.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    let url = page_url.join(href).ok()?;
    let title = anchor.text().collect::<String>().trim().to_string();
    Some((title, url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONT_PAGE: &str = r#"
        <html><body><table>
          <tr class="athing" id="1">
            <td class="title"><span class="titleline"><a href="https://example.com/rust">Rust 2.0 released</a></span></td>
          </tr>
          <tr class="spacer"></tr>
          <tr class="athing" id="2">
            <td class="title"><span class="titleline"><a href="item?id=2">Ask HN: Favourite crates?</a></span></td>
          </tr>
          <tr class="athing" id="3">
            <td class="title"><span class="titleline">No link here</span></td>
          </tr>
          <tr class="athing" id="4">
            <td class="title"><span class="titleline"><a href="https://example.org/four">  Fourth  </a></span></td>
          </tr>
        </table></body></html>"#;

    fn page() -> Url {
        Url::parse("https://news.ycombinator.com/").unwrap()
    }

    #[test]
    fn test_extract_rows_in_document_order() {
        let entries = extract_rows(FRONT_PAGE, &page(), &RowSelectors::default(), 10);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].title, "Rust 2.0 released");
        assert_eq!(entries[0].score, 990);
        assert_eq!(entries[1].url, "https://news.ycombinator.com/item?id=2");
        assert_eq!(entries[1].score, 980);
        assert_eq!(entries[2].title, "Fourth");
        assert_eq!(entries[2].score, 970);
    }

    #[test]
    fn test_extract_rows_respects_limit() {
        let entries = extract_rows(FRONT_PAGE, &page(), &RowSelectors::default(), 1);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_extract_rows_no_matches() {
        let entries = extract_rows("<html><p>maintenance</p></html>", &page(), &RowSelectors::default(), 10);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_custom_selectors() {
        let html = r#"<ul><li class="hit"><a href="/a">A</a></li><li class="hit"><a href="/b">B</a></li></ul>"#;
        let selectors = RowSelectors::parse("li.hit", "a").unwrap();
        let entries = extract_rows(html, &Url::parse("https://lobste.rs/").unwrap(), &selectors, 10);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].url, "https://lobste.rs/b");
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        assert!(matches!(RowSelectors::parse("tr[", "a"), Err(AppError::Validation(_))));
    }
}
