use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::domain::{sort_by_recency, Story};
use crate::services::classifier::{self, Rejection};
use crate::sources::{SearchQuery, StorySource};

/// Tallies of a collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
    pub queries_ok: usize,
    pub queries_failed: usize,
    pub items_seen: usize,
    pub accepted: usize,
    pub duplicates: usize,
    pub rejected: usize,
}

pub struct CollectResult {
    pub stories: Vec<Story>,
    pub report: CollectReport,
}

pub struct CollectService<S: StorySource> {
    source: S,
}

impl<S: StorySource> CollectService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Run every query, classify the hits and return them newest first.
    ///
    /// A failing query is logged and skipped. A URL counts as seen only once
    /// one of its occurrences has been accepted.
    pub fn collect(&self, queries: &[SearchQuery]) -> CollectResult {
        let mut report = CollectReport::default();
        let mut seen_urls: HashSet<String> = HashSet::new();
        let mut stories = Vec::new();

        for query in queries {
            let items = match self.source.fetch_items(query) {
                Ok(items) => {
                    report.queries_ok += 1;
                    items
                }
                Err(e) => {
                    report.queries_failed += 1;
                    warn!(source = self.source.name(), query = %query.text, error = %e, "query failed, skipping");
                    continue;
                }
            };

            debug!(query = %query.text, count = items.len(), "fetched items");

            for item in &items {
                report.items_seen += 1;

                if seen_urls.contains(item.url.trim()) {
                    report.duplicates += 1;
                    continue;
                }

                match classifier::normalize(item, query) {
                    Ok(story) => {
                        seen_urls.insert(story.url.clone());
                        stories.push(story);
                        report.accepted += 1;
                    }
                    Err(reason) => {
                        report.rejected += 1;
                        if reason != Rejection::NoSentiment {
                            debug!(title = %item.title, ?reason, "item rejected");
                        }
                    }
                }
            }
        }

        sort_by_recency(&mut stories, |s| s.published_at);

        info!(
            accepted = report.accepted,
            duplicates = report.duplicates,
            rejected = report.rejected,
            failed_queries = report.queries_failed,
            "collection finished"
        );

        CollectResult { stories, report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CandidateItem;
    use crate::errors::BoardError;
    use crate::sources::traits::MockStorySource;
    use chrono::{TimeZone, Utc};

    fn candidate(title: &str, url: &str, day: Option<u32>) -> CandidateItem {
        CandidateItem::new(title.to_string(), url.to_string())
            .with_source(Some("Wire".to_string()))
            .with_published(day.map(|d| Utc.with_ymd_and_hms(2026, 10, d, 12, 0, 0).unwrap()))
    }

    fn mock_source() -> MockStorySource {
        let mut source = MockStorySource::new();
        source.expect_name().return_const("mock");
        source
    }

    #[test]
    fn test_dedupes_by_url_across_queries() {
        let mut source = mock_source();
        source.expect_fetch_items().returning(|query| {
            Ok(match query.text.as_str() {
                "gov" => vec![candidate("Mayor indicted", "https://e.com/1", Some(5))],
                _ => vec![
                    candidate("Mayor indicted", "https://e.com/1", Some(5)),
                    candidate("Charity fraud case", "https://e.com/2", Some(6)),
                ],
            })
        });

        let service = CollectService::new(source);
        let result = service.collect(&[SearchQuery::government("gov"), SearchQuery::nonprofit("np")]);

        assert_eq!(result.stories.len(), 2);
        assert_eq!(result.report.duplicates, 1);
        assert_eq!(result.report.items_seen, 3);

        // First accepted occurrence wins
        let mayor = result.stories.iter().find(|s| s.url == "https://e.com/1").unwrap();
        assert!(mayor.government);
        assert!(!mayor.nonprofit);
    }

    #[test]
    fn test_failing_query_is_skipped() {
        let mut source = mock_source();
        source.expect_fetch_items().returning(|query| {
            if query.text == "broken" {
                Err(BoardError::FeedParse("bad xml".to_string()))
            } else {
                Ok(vec![candidate("Senate fraud inquiry widens", "https://e.com/3", Some(2))])
            }
        });

        let service = CollectService::new(source);
        let result = service.collect(&[
            SearchQuery::government("broken"),
            SearchQuery::government("fine"),
        ]);

        assert_eq!(result.report.queries_failed, 1);
        assert_eq!(result.report.queries_ok, 1);
        assert_eq!(result.stories.len(), 1);
    }

    #[test]
    fn test_sorted_newest_first_missing_last() {
        let mut source = mock_source();
        source.expect_fetch_items().returning(|_| {
            Ok(vec![
                candidate("Governor cleared", "https://e.com/a", None),
                candidate("County graft trial", "https://e.com/b", Some(3)),
                candidate("City fraud inquiry", "https://e.com/c", Some(9)),
            ])
        });

        let service = CollectService::new(source);
        let result = service.collect(&[SearchQuery::government("q")]);

        let urls: Vec<&str> = result.stories.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["https://e.com/c", "https://e.com/b", "https://e.com/a"]);
    }

    #[test]
    fn test_rejected_url_can_be_accepted_later() {
        let mut source = mock_source();
        source.expect_fetch_items().returning(|query| {
            Ok(match query.text.as_str() {
                "first" => vec![CandidateItem::new(String::new(), "https://e.com/x".to_string())],
                _ => vec![candidate("Agency bribery charges", "https://e.com/x", Some(1))],
            })
        });

        let service = CollectService::new(source);
        let result = service.collect(&[
            SearchQuery::government("first"),
            SearchQuery::government("second"),
        ]);

        assert_eq!(result.report.rejected, 1);
        assert_eq!(result.report.duplicates, 0);
        assert_eq!(result.stories.len(), 1);
    }

    #[test]
    fn test_no_queries_yields_nothing() {
        let source = MockStorySource::new();
        let service = CollectService::new(source);
        let result = service.collect(&[]);

        assert!(result.stories.is_empty());
        assert_eq!(result.report, CollectReport::default());
    }
}
