pub mod filter;
pub mod news_service;
pub mod registry;

pub use filter::{compute_stats, filter_articles, split_top_news, NewsFilter};
pub use news_service::{mock_articles, NewsService, MOCK_SOURCE};
pub use registry::{FeedMap, FeedRegistry};
