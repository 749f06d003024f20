use std::path::PathBuf;

use crate::errors::{BoardError, BoardResult};
use crate::sources::SearchQuery;

pub const DEFAULT_OUTPUT_PATH: &str = "data/stories.json";
pub const DEFAULT_PAGE_PATH: &str = "index.html";
pub const DEFAULT_MAX_STORIES: usize = 60;
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_USER_AGENT: &str = "ethics-news-board/1.0";

pub const GOVERNMENT_QUERIES: &[&str] = &[
    "government ethics",
    "public corruption",
    "public sector graft",
    "ethics commission investigation",
    "city council bribery",
    "federal corruption case",
];

pub const NONPROFIT_QUERIES: &[&str] = &[
    "nonprofit ethics",
    "charity corruption",
    "charity fraud case",
    "ngo corruption",
    "foundation embezzlement",
    "nonprofit governance reform",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub output_path: PathBuf,
    pub page_path: PathBuf,
    pub max_stories_per_column: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub government_queries: Vec<String>,
    pub nonprofit_queries: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            page_path: PathBuf::from(DEFAULT_PAGE_PATH),
            max_stories_per_column: DEFAULT_MAX_STORIES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            government_queries: to_owned_list(GOVERNMENT_QUERIES),
            nonprofit_queries: to_owned_list(NONPROFIT_QUERIES),
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Load `.env` files into the process environment; existing variables win
    pub fn load_dotenv() {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();
    }

    /// Read the process environment; call [`Config::load_dotenv`] first for `.env` support
    pub fn from_env() -> BoardResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup; unset variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> BoardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("ETHICS_BOARD_OUTPUT") {
            config.output_path = PathBuf::from(path);
        }

        if let Some(path) = lookup("ETHICS_BOARD_PAGE") {
            config.page_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("ETHICS_BOARD_MAX_STORIES") {
            config.max_stories_per_column = parse_positive("ETHICS_BOARD_MAX_STORIES", &raw)?;
        }

        if let Some(raw) = lookup("ETHICS_BOARD_TIMEOUT_SECS") {
            config.timeout_secs = parse_positive("ETHICS_BOARD_TIMEOUT_SECS", &raw)?;
        }

        if let Some(agent) = lookup("ETHICS_BOARD_USER_AGENT") {
            config.user_agent = agent;
        }

        if let Some(raw) = lookup("ETHICS_BOARD_GOVERNMENT_QUERIES") {
            config.government_queries = split_queries(&raw);
        }

        if let Some(raw) = lookup("ETHICS_BOARD_NONPROFIT_QUERIES") {
            config.nonprofit_queries = split_queries(&raw);
        }

        Ok(config)
    }

    /// Generating needs at least one query; rendering does not.
    pub fn ensure_queries(&self) -> BoardResult<()> {
        if self.government_queries.is_empty() && self.nonprofit_queries.is_empty() {
            return Err(BoardError::Config("no search queries configured".to_string()));
        }
        Ok(())
    }

    /// Government queries first, then nonprofit queries.
    pub fn search_queries(&self) -> Vec<SearchQuery> {
        self.government_queries
            .iter()
            .map(|q| SearchQuery::government(q))
            .chain(self.nonprofit_queries.iter().map(|q| SearchQuery::nonprofit(q)))
            .collect()
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn split_queries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<T>(name: &str, raw: &str) -> BoardResult<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(BoardError::InvalidEnvVar {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}
