pub mod loader;
pub mod page;

pub use loader::{FeedLoader, FeedLocation, LoadOutcome};
pub use page::{render_page, Board, Column, Tile};
