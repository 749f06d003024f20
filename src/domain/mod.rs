pub mod candidate;
pub mod document;
pub mod story;

pub use candidate::CandidateItem;
pub use document::{FeedDocument, StoryEntry};
pub use story::{short_title, sort_by_recency, Category, Sentiment, Story, SHORT_TITLE_LIMIT};
