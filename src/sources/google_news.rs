use std::time::Duration;

use url::Url;

use crate::domain::CandidateItem;
use crate::errors::{BoardError, BoardResult};
use crate::sources::rss_atom::RssAtomSource;
use crate::sources::traits::{SearchQuery, StorySource};

const SEARCH_ENDPOINT: &str = "https://news.google.com/rss/search";

/// English-language Google News search results, read through their RSS endpoint.
pub struct GoogleNewsSource {
    rss_source: RssAtomSource,
}

impl GoogleNewsSource {
    pub fn new(user_agent: &str, timeout: Duration) -> BoardResult<Self> {
        Ok(Self {
            rss_source: RssAtomSource::new(user_agent, timeout)?,
        })
    }

    /// Build the RSS search URL for a query
    pub fn search_url(query: &str) -> BoardResult<String> {
        let url = Url::parse_with_params(
            SEARCH_ENDPOINT,
            &[("q", query), ("hl", "en-US"), ("gl", "US"), ("ceid", "US:en")],
        )
        .map_err(|e| BoardError::InvalidUrl(e.to_string()))?;

        Ok(url.to_string())
    }
}

impl StorySource for GoogleNewsSource {
    fn name(&self) -> &'static str {
        "google-news"
    }

    fn fetch_items(&self, query: &SearchQuery) -> BoardResult<Vec<CandidateItem>> {
        let feed_url = Self::search_url(&query.text)?;
        self.rss_source.fetch_feed(&feed_url)
    }
}
