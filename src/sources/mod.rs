pub mod google_news;
pub mod rss_atom;
pub mod traits;

pub use google_news::GoogleNewsSource;
pub use rss_atom::RssAtomSource;
pub use traits::{SearchQuery, StorySource};
