//! The JSON document shared by the generator and the renderer.
//!
//! Writing is strict: every story carries a title, url and sentiment.
//! Reading is lenient: any field may be missing or of the wrong type and
//! degrades to a default at display time instead of failing the whole load.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::story::{Category, Sentiment, Story};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedDocument {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub government: Vec<StoryEntry>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub nonprofit: Vec<StoryEntry>,
}

impl FeedDocument {
    pub fn new(updated_at: DateTime<Utc>) -> Self {
        Self {
            updated_at: Some(format_timestamp(&updated_at)),
            government: Vec::new(),
            nonprofit: Vec::new(),
        }
    }

    pub fn column(&self, category: Category) -> &[StoryEntry] {
        match category {
            Category::Government => &self.government,
            Category::Nonprofit => &self.nonprofit,
        }
    }

    pub fn column_mut(&mut self, category: Category) -> &mut Vec<StoryEntry> {
        match category {
            Category::Government => &mut self.government,
            Category::Nonprofit => &mut self.nonprofit,
        }
    }

    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One story as it appears inside a column of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub short_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_sentiment")]
    pub sentiment: Sentiment,
}

impl StoryEntry {
    /// Timestamp if present and valid RFC 3339.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl From<&Story> for StoryEntry {
    fn from(story: &Story) -> Self {
        Self {
            title: Some(story.title.clone()),
            short_title: story.short_title.clone(),
            url: Some(story.url.clone()),
            source: story.source.clone(),
            published_at: story.published_at.as_ref().map(format_timestamp),
            sentiment: story.sentiment,
        }
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_sentiment<'de, D>(deserializer: D) -> Result<Sentiment, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default())
}

fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<StoryEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
