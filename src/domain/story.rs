use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Character budget for tile titles.
pub const SHORT_TITLE_LIMIT: usize = 95;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            _ => Err(format!("Unknown sentiment: {}", s)),
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Government,
    Nonprofit,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Government, Category::Nonprofit];

    /// Key of the column in the feed document
    pub fn key(&self) -> &'static str {
        match self {
            Category::Government => "government",
            Category::Nonprofit => "nonprofit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Government => "Government",
            Category::Nonprofit => "Nonprofit",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A classified story, ready to be placed into one or both columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub title: String,
    pub short_title: Option<String>,
    pub source: Option<String>,
    pub url: String,
    pub published_at: Option<DateTime<Utc>>,
    pub sentiment: Sentiment,
    pub government: bool,
    pub nonprofit: bool,
}

impl Story {
    pub fn new(title: String, url: String, sentiment: Sentiment) -> Self {
        Self {
            title,
            short_title: None,
            source: None,
            url,
            published_at: None,
            sentiment,
            government: false,
            nonprofit: false,
        }
    }

    pub fn with_short_title(mut self, short_title: Option<String>) -> Self {
        self.short_title = short_title;
        self
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    pub fn with_published(mut self, published_at: Option<DateTime<Utc>>) -> Self {
        self.published_at = published_at;
        self
    }

    pub fn with_categories(mut self, government: bool, nonprofit: bool) -> Self {
        self.government = government;
        self.nonprofit = nonprofit;
        self
    }

    pub fn belongs_to(&self, category: Category) -> bool {
        match category {
            Category::Government => self.government,
            Category::Nonprofit => self.nonprofit,
        }
    }
}

/// Collapse whitespace and cut to `limit` characters, ending in an ellipsis when cut.
pub fn short_title(title: &str, limit: usize) -> String {
    let cleaned = WHITESPACE.replace_all(title, " ");
    let cleaned = cleaned.trim();

    if cleaned.chars().count() <= limit {
        return cleaned.to_string();
    }

    let cut: String = cleaned.chars().take(limit.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Stable sort, newest first; items without a timestamp go last.
pub fn sort_by_recency<T, F>(items: &mut [T], published: F)
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    items.sort_by(|a, b| published(b).cmp(&published(a)));
}
