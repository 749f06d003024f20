//! Keyword rules that decide whether a candidate item becomes a story,
//! which column(s) it belongs to, and which color its tile gets.
//!
//! Matching is plain substring search over the lowercased
//! "title source" text, so "bribe" also hits "bribery".

use url::Url;

use crate::domain::{short_title, CandidateItem, Sentiment, Story, SHORT_TITLE_LIMIT};
use crate::sources::SearchQuery;

pub const UNKNOWN_SOURCE: &str = "Unknown source";

pub const POSITIVE_KEYWORDS: &[&str] = &[
    "reform",
    "transparency",
    "oversight",
    "accountability",
    "improve",
    "improved",
    "improves",
    "cleaned up",
    "cleared",
    "acquitted",
    "new ethics rules",
    "adopts ethics",
];

pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "corruption",
    "graft",
    "bribery",
    "bribe",
    "fraud",
    "embezzlement",
    "kickback",
    "money laundering",
    "scandal",
    "probe",
    "investigation",
    "charged",
    "indicted",
    "convicted",
    "arrested",
    "misuse",
    "misconduct",
];

pub const GOVERNMENT_TERMS: &[&str] = &[
    "government",
    "public",
    "municipal",
    "city",
    "state",
    "federal",
    "minister",
    "senate",
    "congress",
    "parliament",
    "mayor",
    "governor",
    "agency",
    "department",
    "county",
];

pub const NONPROFIT_TERMS: &[&str] = &[
    "nonprofit",
    "non-profit",
    "charity",
    "foundation",
    "ngo",
    "not-for-profit",
    "philanthropy",
];

pub const BUSINESS_TERMS: &[&str] = &[
    "earnings",
    "quarterly results",
    "stock",
    "share price",
    "ipo",
    "merger",
    "acquisition",
    "ceo",
    "investor",
    "wall street",
];

/// Why a candidate did not become a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingTitle,
    MissingUrl,
    UnsupportedUrl,
    BusinessOnly,
    NoSentiment,
}

fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}

/// Negative wins over positive; `None` when neither vocabulary matches.
pub fn classify_sentiment(text: &str) -> Option<Sentiment> {
    if contains_any(text, NEGATIVE_KEYWORDS) {
        Some(Sentiment::Negative)
    } else if contains_any(text, POSITIVE_KEYWORDS) {
        Some(Sentiment::Positive)
    } else {
        None
    }
}

pub fn is_business_only(text: &str) -> bool {
    contains_any(text, BUSINESS_TERMS)
        && !contains_any(text, GOVERNMENT_TERMS)
        && !contains_any(text, NONPROFIT_TERMS)
}

/// Turn a candidate into a classified story.
pub fn normalize(item: &CandidateItem, query: &SearchQuery) -> Result<Story, Rejection> {
    let title = item.title.trim();
    let url = item.url.trim();

    if title.is_empty() {
        return Err(Rejection::MissingTitle);
    }
    if url.is_empty() {
        return Err(Rejection::MissingUrl);
    }
    if !Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https")) {
        return Err(Rejection::UnsupportedUrl);
    }

    let source = item
        .source
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_SOURCE);

    let text = format!("{} {}", title, source).to_lowercase();

    if is_business_only(&text) {
        return Err(Rejection::BusinessOnly);
    }

    let sentiment = classify_sentiment(&text).ok_or(Rejection::NoSentiment)?;

    let mut government = contains_any(&text, GOVERNMENT_TERMS);
    let mut nonprofit = contains_any(&text, NONPROFIT_TERMS);

    // The query already picked the topic; keep the hit in its column.
    if !government && !nonprofit {
        government = query.default_government;
        nonprofit = query.default_nonprofit;
    }

    Ok(Story::new(title.to_string(), url.to_string(), sentiment)
        .with_short_title(Some(short_title(title, SHORT_TITLE_LIMIT)))
        .with_source(Some(source.to_string()))
        .with_published(item.published_at)
        .with_categories(government, nonprofit))
}
