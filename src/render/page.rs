//! Static HTML rendering of the board.
//!
//! The loaded document is never modified: columns are sorted copies of
//! display data, and every missing field falls back to a fixed label.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use url::Url;

use crate::domain::{sort_by_recency, Category, FeedDocument, Sentiment, StoryEntry};
use crate::render::loader::LoadOutcome;

pub const UNKNOWN_DATE: &str = "Unknown date";
pub const UNKNOWN_SOURCE: &str = "Unknown source";
pub const UNTITLED_STORY: &str = "Untitled story";
pub const LOAD_FAILURE_MESSAGE: &str = "Stories could not be loaded right now. Please try again later.";

const PAGE_TITLE: &str = "Nonmarket Ethics News";

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub title: String,
    pub full_title: String,
    pub href: String,
    pub source: String,
    pub date_label: String,
    pub sentiment: Sentiment,
    published: Option<DateTime<Utc>>,
}

impl Tile {
    pub fn from_entry(entry: &StoryEntry) -> Self {
        let full_title = non_blank(entry.title.as_deref()).unwrap_or(UNTITLED_STORY);
        let title = non_blank(entry.short_title.as_deref()).unwrap_or(full_title);
        let published = entry.published();

        Self {
            title: title.to_string(),
            full_title: full_title.to_string(),
            href: safe_href(entry.url.as_deref()),
            source: non_blank(entry.source.as_deref())
                .unwrap_or(UNKNOWN_SOURCE)
                .to_string(),
            date_label: date_label(published),
            sentiment: entry.sentiment,
            published,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.sentiment {
            Sentiment::Positive => "tile tile-positive",
            Sentiment::Negative => "tile tile-negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub category: Category,
    pub tiles: Vec<Tile>,
}

impl Column {
    fn from_entries(category: Category, entries: &[StoryEntry]) -> Self {
        let mut tiles: Vec<Tile> = entries.iter().map(Tile::from_entry).collect();
        sort_by_recency(&mut tiles, |t| t.published);
        Self { category, tiles }
    }

    fn empty(category: Category) -> Self {
        Self {
            category,
            tiles: Vec::new(),
        }
    }
}

/// Everything the page shows, derived from one load attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub updated_label: Option<String>,
    pub columns: Vec<Column>,
    pub error: Option<String>,
}

impl Board {
    pub fn from_document(document: &FeedDocument) -> Self {
        Self {
            updated_label: document
                .updated_at
                .as_deref()
                .and_then(parse_timestamp)
                .map(|ts| ts.format("%b %-d, %Y %H:%M UTC").to_string()),
            columns: Category::ALL
                .iter()
                .map(|c| Column::from_entries(*c, document.column(*c)))
                .collect(),
            error: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            updated_label: None,
            columns: Category::ALL.iter().map(|c| Column::empty(*c)).collect(),
            error: Some(LOAD_FAILURE_MESSAGE.to_string()),
        }
    }

    pub fn from_outcome(outcome: &LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Loaded(document) => Self::from_document(document),
            LoadOutcome::Failed(_) => Self::failed(),
        }
    }

    pub fn column(&self, category: Category) -> Option<&Column> {
        self.columns.iter().find(|c| c.category == category)
    }
}

/// Only absolute http(s) links become clickable; anything else points nowhere
pub fn safe_href(raw: Option<&str>) -> String {
    non_blank(raw)
        .filter(|s| Url::parse(s).is_ok_and(|url| matches!(url.scheme(), "http" | "https")))
        .unwrap_or("#")
        .to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn date_label(published: Option<DateTime<Utc>>) -> String {
    published
        .map(|ts| ts.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; background: #f4f4f2; color: #1d1d1b; }
    header { padding: 1.5rem 2rem 0.5rem; }
    header h1 { margin: 0; font-size: 1.6rem; }
    .updated { color: #666; font-size: 0.9rem; margin: 0.25rem 0 0; }
    .load-error { margin: 1rem 2rem; padding: 0.75rem 1rem; background: #fff3cd; border: 1px solid #e0c36a; }
    main { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; padding: 1rem 2rem 2rem; }
    @media (max-width: 760px) { main { grid-template-columns: 1fr; } }
    .column h2 { margin: 0 0 0.75rem; font-size: 1.2rem; }
    .tiles { display: flex; flex-direction: column; gap: 0.6rem; }
    .tile { display: block; padding: 0.75rem 1rem; border-radius: 6px; text-decoration: none; color: inherit; }
    .tile-positive { background: #d8f0d8; border-left: 5px solid #2e8b3a; }
    .tile-negative { background: #f6dada; border-left: 5px solid #b3322f; }
    .tile-title { display: block; font-weight: 600; margin-bottom: 0.3rem; }
    .tile-meta { font-size: 0.85rem; color: #444; }
    .empty-state { color: #777; font-style: italic; }
"#;

fn render_column(out: &mut String, column: &Column) {
    let _ = writeln!(
        out,
        r#"    <section class="column" id="{}">"#,
        column.category.key()
    );
    let _ = writeln!(out, "      <h2>{}</h2>", escape_html(column.category.label()));

    if column.tiles.is_empty() {
        let _ = writeln!(
            out,
            r#"      <p class="empty-state">No {} stories available.</p>"#,
            column.category.key()
        );
    } else {
        let _ = writeln!(out, r#"      <div class="tiles">"#);
        for tile in &column.tiles {
            let _ = writeln!(
                out,
                r#"        <a class="{}" href="{}" title="{}" target="_blank" rel="noopener noreferrer"><span class="tile-title">{}</span><span class="tile-meta"><span class="tile-source">{}</span> &middot; <time class="tile-date">{}</time></span></a>"#,
                tile.css_class(),
                escape_html(&tile.href),
                escape_html(&tile.full_title),
                escape_html(&tile.title),
                escape_html(&tile.source),
                escape_html(&tile.date_label),
            );
        }
        let _ = writeln!(out, "      </div>");
    }

    let _ = writeln!(out, "    </section>");
}

/// Render the full HTML document for a board
pub fn render_page(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\">\n");
    out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "  <title>{}</title>", PAGE_TITLE);
    let _ = writeln!(out, "  <style>{}  </style>", STYLE);
    out.push_str("</head>\n<body>\n  <header>\n");
    let _ = writeln!(out, "    <h1>{}</h1>", PAGE_TITLE);
    if let Some(updated) = &board.updated_label {
        let _ = writeln!(out, r#"    <p class="updated">Updated {}</p>"#, escape_html(updated));
    }
    out.push_str("  </header>\n");

    if let Some(error) = &board.error {
        let _ = writeln!(out, r#"  <p class="load-error" role="alert">{}</p>"#, escape_html(error));
    }

    out.push_str("  <main>\n");
    for column in &board.columns {
        render_column(&mut out, column);
    }
    out.push_str("  </main>\n</body>\n</html>\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn entry(title: &str, url: &str, published: Option<&str>, sentiment: Sentiment) -> StoryEntry {
        StoryEntry {
            title: Some(title.to_string()),
            short_title: None,
            url: Some(url.to_string()),
            source: Some("Wire".to_string()),
            published_at: published.map(str::to_string),
            sentiment,
        }
    }

    fn select_count(html: &Html, selector: &str) -> usize {
        html.select(&Selector::parse(selector).unwrap()).count()
    }

    fn sample_document() -> FeedDocument {
        let shared = entry(
            "State charity inquiry",
            "https://e.com/shared",
            Some("2026-10-18T10:00:00Z"),
            Sentiment::Negative,
        );
        FeedDocument {
            updated_at: Some("2026-10-19T06:00:00Z".to_string()),
            government: vec![
                entry("Old reform", "https://e.com/old", Some("2026-10-01T10:00:00Z"), Sentiment::Positive),
                entry("No date", "https://e.com/nodate", None, Sentiment::Positive),
                shared.clone(),
                entry("Bad date", "https://e.com/bad", Some("last tuesday"), Sentiment::Negative),
            ],
            nonprofit: vec![shared],
        }
    }

    #[test]
    fn test_empty_column_has_single_empty_state() {
        let mut document = sample_document();
        document.government.clear();

        let html = Html::parse_document(&render_page(&Board::from_document(&document)));

        assert_eq!(select_count(&html, "#government .empty-state"), 1);
        assert_eq!(select_count(&html, "#government .tile"), 0);
        assert_eq!(select_count(&html, "#nonprofit .tile"), 1);
        assert_eq!(select_count(&html, "#nonprofit .empty-state"), 0);
    }

    #[test]
    fn test_failed_load_shows_one_message_and_empty_columns() {
        let board = Board::from_outcome(&LoadOutcome::Failed("HTTP error: 500".to_string()));
        let html = Html::parse_document(&render_page(&board));

        assert_eq!(select_count(&html, ".load-error"), 1);
        assert_eq!(select_count(&html, ".empty-state"), 2);
        assert_eq!(select_count(&html, ".tile"), 0);
        assert_eq!(select_count(&html, "#government .empty-state"), 1);
        assert_eq!(select_count(&html, "#nonprofit .empty-state"), 1);
    }

    #[test]
    fn test_tiles_sorted_newest_first_with_unknown_dates_last() {
        let board = Board::from_document(&sample_document());
        let gov = board.column(Category::Government).unwrap();

        let hrefs: Vec<&str> = gov.tiles.iter().map(|t| t.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec!["https://e.com/shared", "https://e.com/old", "https://e.com/nodate", "https://e.com/bad"]
        );
        assert_eq!(gov.tiles[2].date_label, UNKNOWN_DATE);
        assert_eq!(gov.tiles[3].date_label, UNKNOWN_DATE);
        assert_eq!(gov.tiles[0].date_label, "Oct 18, 2026");
    }

    #[test]
    fn test_rendering_does_not_mutate_document() {
        let document = sample_document();
        let before = document.clone();
        let _ = render_page(&Board::from_document(&document));
        assert_eq!(document, before);
    }

    #[test]
    fn test_shared_story_identical_in_both_columns() {
        let board = Board::from_document(&sample_document());
        let gov = board.column(Category::Government).unwrap();
        let np = board.column(Category::Nonprofit).unwrap();

        let in_gov = gov.tiles.iter().find(|t| t.href == "https://e.com/shared").unwrap();
        let in_np = np.tiles.iter().find(|t| t.href == "https://e.com/shared").unwrap();
        assert_eq!(in_gov, in_np);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let document = FeedDocument::from_json(br#"{"nonprofit": [{}]}"#).unwrap();
        let board = Board::from_document(&document);
        let tile = &board.column(Category::Nonprofit).unwrap().tiles[0];

        assert_eq!(tile.title, UNTITLED_STORY);
        assert_eq!(tile.source, UNKNOWN_SOURCE);
        assert_eq!(tile.date_label, UNKNOWN_DATE);
        assert_eq!(tile.href, "#");
        assert_eq!(tile.css_class(), "tile tile-negative");
    }

    #[test]
    fn test_missing_sentiment_gets_negative_style() {
        let document =
            FeedDocument::from_json(br#"{"government": [{"title": "T", "url": "https://e.com"}]}"#)
                .unwrap();
        let html = Html::parse_document(&render_page(&Board::from_document(&document)));

        assert_eq!(select_count(&html, "#government a.tile-negative"), 1);
        assert_eq!(select_count(&html, "#government a.tile-positive"), 0);
    }

    #[test]
    fn test_missing_published_at_renders_unknown_date() {
        let document =
            FeedDocument::from_json(br#"{"government": [{"title": "T", "url": "https://e.com"}]}"#)
                .unwrap();
        let html = Html::parse_document(&render_page(&Board::from_document(&document)));
        let date = html
            .select(&Selector::parse("#government .tile-date").unwrap())
            .next()
            .unwrap()
            .text()
            .collect::<String>();

        assert_eq!(date, "Unknown date");
    }

    #[test]
    fn test_short_title_preferred_and_full_title_in_tooltip() {
        let mut story = entry("A very long headline", "https://e.com/x", None, Sentiment::Positive);
        story.short_title = Some("A very…".to_string());
        let tile = Tile::from_entry(&story);

        assert_eq!(tile.title, "A very…");
        assert_eq!(tile.full_title, "A very long headline");
        assert_eq!(tile.css_class(), "tile tile-positive");
    }

    #[test]
    fn test_non_http_links_are_not_clickable() {
        let document = FeedDocument::from_json(
            br#"{"government": [
                {"title": "T", "url": "javascript:alert(document.cookie)"},
                {"title": "D", "url": "data:text/html,<b>x</b>"},
                {"title": "R", "url": "/relative/path"}
            ]}"#,
        )
        .unwrap();
        let page = render_page(&Board::from_document(&document));

        assert!(!page.contains("javascript:"));
        assert!(!page.contains("data:text"));
        let html = Html::parse_document(&page);
        assert_eq!(select_count(&html, r##"#government a.tile[href="#"]"##), 3);
    }

    #[test]
    fn test_safe_href_keeps_http_links() {
        assert_eq!(safe_href(Some("https://e.com/a?b=1")), "https://e.com/a?b=1");
        assert_eq!(safe_href(Some(" http://e.com/ ")), "http://e.com/");
        assert_eq!(safe_href(Some("JavaScript:void(0)")), "#");
        assert_eq!(safe_href(None), "#");
    }

    #[test]
    fn test_text_is_escaped() {
        let document = FeedDocument {
            updated_at: None,
            government: vec![entry(
                "<script>alert(1)</script> & co",
                "https://e.com/?a=1&b=\"2\"",
                None,
                Sentiment::Negative,
            )],
            nonprofit: vec![],
        };
        let page = render_page(&Board::from_document(&document));

        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; co"));
        assert!(page.contains(r#"href="https://e.com/?a=1&amp;b=&quot;2&quot;""#));
    }

    #[test]
    fn test_updated_label() {
        let board = Board::from_document(&sample_document());
        assert_eq!(board.updated_label.as_deref(), Some("Oct 19, 2026 06:00 UTC"));

        let html = Html::parse_document(&render_page(&board));
        assert_eq!(select_count(&html, ".updated"), 1);
    }
}
