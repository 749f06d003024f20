use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use tracing::{debug, warn};

use crate::domain::FeedDocument;
use crate::errors::BoardResult;
use crate::sources::rss_atom::{read_capped, MAX_FEED_SIZE};

/// Where the renderer reads the feed document from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    File(PathBuf),
    Remote(String),
}

impl FeedLocation {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();

        if lower.starts_with("http://") || lower.starts_with("https://") {
            FeedLocation::Remote(trimmed.to_string())
        } else {
            FeedLocation::File(PathBuf::from(trimmed))
        }
    }
}

impl std::fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedLocation::File(path) => write!(f, "{}", path.display()),
            FeedLocation::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Result of loading the document; failures are data, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(FeedDocument),
    Failed(String),
}

pub struct FeedLoader {
    client: Client,
    max_size: u64,
}

impl FeedLoader {
    pub fn new(user_agent: &str, timeout: Duration) -> BoardResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            max_size: MAX_FEED_SIZE,
        })
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Load the document, folding every failure into [`LoadOutcome::Failed`]
    pub fn load(&self, location: &FeedLocation) -> LoadOutcome {
        match self.try_load(location) {
            Ok(document) => {
                debug!(%location, "loaded feed document");
                LoadOutcome::Loaded(document)
            }
            Err(e) => {
                warn!(%location, error = %e, "failed to load feed document");
                LoadOutcome::Failed(e.to_string())
            }
        }
    }

    pub fn try_load(&self, location: &FeedLocation) -> BoardResult<FeedDocument> {
        let bytes = match location {
            FeedLocation::File(path) => fs::read(path)?,
            FeedLocation::Remote(url) => self.fetch_remote(url)?,
        };

        Ok(FeedDocument::from_json(&bytes)?)
    }

    fn fetch_remote(&self, url: &str) -> BoardResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()?;

        read_capped(response, self.max_size)
    }
}
