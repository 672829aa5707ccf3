pub mod article;
pub mod feed;
pub mod stats;
pub mod status;

pub use article::{Article, ParsedArticle, RelevanceTier, MAX_RELEVANCE, MIN_RELEVANCE, TOP_RELEVANCE};
pub use feed::{FeedCategory, FeedDescriptor};
pub use stats::NewsStats;
pub use status::{FeedHealth, FeedStatus, FeedStatusEntry};
