use crate::domain::CandidateItem;
use crate::errors::BoardResult;

/// A news search with the column(s) a hit should land in when its text
/// carries no explicit category term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub default_government: bool,
    pub default_nonprofit: bool,
}

impl SearchQuery {
    pub fn government(text: &str) -> Self {
        Self {
            text: text.to_string(),
            default_government: true,
            default_nonprofit: false,
        }
    }

    pub fn nonprofit(text: &str) -> Self {
        Self {
            text: text.to_string(),
            default_government: false,
            default_nonprofit: true,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait StorySource: Send + Sync {
    /// Human readable name, used in logs
    fn name(&self) -> &'static str;

    /// Fetch the raw items a search query returns
    fn fetch_items(&self, query: &SearchQuery) -> BoardResult<Vec<CandidateItem>>;
}
