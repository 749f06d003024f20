use std::time::Duration;

use feed_rs::parser;
use reqwest::blocking::{Client, Response};
use scraper::Html;
use tracing::debug;

use crate::domain::CandidateItem;
use crate::errors::{BoardError, BoardResult};

/// Largest feed body accepted, in bytes.
pub const MAX_FEED_SIZE: u64 = 5 * 1024 * 1024;

/// Separator news search feeds put between headline and publisher.
const PUBLISHER_SEPARATOR: &str = " - ";

pub struct RssAtomSource {
    client: Client,
}

impl RssAtomSource {
    pub fn new(user_agent: &str, timeout: Duration) -> BoardResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a feed URL and turn its entries into candidate items
    pub fn fetch_feed(&self, url: &str) -> BoardResult<Vec<CandidateItem>> {
        let bytes = self.fetch_bytes(url)?;
        let items = Self::parse_items(&bytes)?;
        debug!(url, count = items.len(), "parsed feed");
        Ok(items)
    }

    fn fetch_bytes(&self, url: &str) -> BoardResult<Vec<u8>> {
        let response = self.client.get(url).send()?;
        read_capped(response, MAX_FEED_SIZE)
    }

    pub fn parse_items(bytes: &[u8]) -> BoardResult<Vec<CandidateItem>> {
        let parsed = parser::parse(bytes).map_err(|e| BoardError::FeedParse(e.to_string()))?;

        let items = parsed
            .entries
            .into_iter()
            .map(|entry| {
                let title = entry
                    .title
                    .map(|t| html_to_text(&t.content))
                    .unwrap_or_default();

                let url = entry
                    .links
                    .into_iter()
                    .next()
                    .map(|l| l.href.trim().to_string())
                    .unwrap_or_default();

                let published = entry.published.or(entry.updated);
                let source = publisher_from_title(&title);

                CandidateItem::new(title, url)
                    .with_source(source)
                    .with_published(published)
            })
            .collect();

        Ok(items)
    }
}

/// Check the status and read the body, refusing anything over `max_size` bytes
pub fn read_capped(response: Response, max_size: u64) -> BoardResult<Vec<u8>> {
    if !response.status().is_success() {
        return Err(BoardError::HttpStatus(response.status()));
    }

    if let Some(content_length) = response.content_length() {
        if content_length > max_size {
            return Err(BoardError::FeedTooLarge(content_length));
        }
    }

    let bytes = response.bytes()?;
    if bytes.len() as u64 > max_size {
        return Err(BoardError::FeedTooLarge(bytes.len() as u64));
    }

    Ok(bytes.to_vec())
}

/// Extract plain text from possibly marked-up feed text, preserving word boundaries
pub fn html_to_text(raw: &str) -> String {
    if !raw.contains('<') {
        return raw.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    let fragment = Html::parse_fragment(raw);
    let mut text = String::new();

    for node in fragment.root_element().descendants() {
        if let Some(text_node) = node.value().as_text() {
            text.push_str(text_node);
        }
        // Only block elements separate words; inline markup can sit mid-word
        if let Some(element) = node.value().as_element() {
            match element.name() {
                "p" | "br" | "div" => text.push(' '),
                _ => {}
            }
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// "Headline - Publisher" yields "Publisher"
pub fn publisher_from_title(title: &str) -> Option<String> {
    let (_, publisher) = title.rsplit_once(PUBLISHER_SEPARATOR)?;
    let publisher = publisher.trim();

    if publisher.is_empty() {
        None
    } else {
        Some(publisher.to_string())
    }
}
