pub mod fetcher;
pub mod http;
pub mod retry;
pub mod rss;

pub use fetcher::FeedFetcher;
pub use http::{proxied_url, HttpResponse, HttpTransport, ReqwestTransport};
pub use retry::{retry_with_backoff, RetryPolicy};
pub use rss::parse_feed;
