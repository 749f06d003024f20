use chrono::{DateTime, Utc};

/// An unclassified item as it came out of a source feed.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateItem {
    pub title: String,
    pub url: String,
    pub source: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl CandidateItem {
    pub fn new(title: String, url: String) -> Self {
        Self {
            title,
            url,
            source: None,
            published_at: None,
        }
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    pub fn with_published(mut self, published_at: Option<DateTime<Utc>>) -> Self {
        self.published_at = published_at;
        self
    }
}
