use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{Article, FeedCategory, FeedDescriptor, FeedHealth, FeedStatusEntry, MAX_RELEVANCE};
use crate::errors::NewsResult;
use crate::scoring::{KeywordSource, RelevanceScorer};
use crate::services::registry::{FeedMap, FeedRegistry};
use crate::sources::{parse_feed, FeedFetcher, HttpTransport};
use crate::storage::traits::KeyValueStore;
use crate::text::translate_to_portuguese;

pub const MOCK_SOURCE: &str = "Mock Data";

/// Owns the registry, the fetcher (with its status map) and the scorer.
/// Everything runs on the caller's thread, one feed at a time.
pub struct NewsService<S: KeyValueStore, T: HttpTransport, K: KeywordSource> {
    registry: FeedRegistry<S>,
    fetcher: FeedFetcher<T>,
    scorer: RelevanceScorer<K>,
}

impl<S: KeyValueStore, T: HttpTransport, K: KeywordSource> NewsService<S, T, K> {
    pub fn new(registry: FeedRegistry<S>, fetcher: FeedFetcher<T>, scorer: RelevanceScorer<K>) -> Self {
        Self {
            registry,
            fetcher,
            scorer,
        }
    }

    /// Fetch every feed in `category`, newest first.
    ///
    /// A failing feed is logged and skipped; an empty result means nothing
    /// could be loaded and callers may fall back to [`mock_articles`].
    pub fn fetch_by_category(&mut self, category: FeedCategory) -> Vec<Article> {
        // Pull the keyword list before the first request goes out
        self.scorer.keywords();

        let feeds: Vec<FeedDescriptor> = self.registry.feeds_for(category).to_vec();
        let mut articles = Vec::new();

        for feed in &feeds {
            match self.fetch_feed(feed, category) {
                Ok(mut fetched) => {
                    info!(feed = %feed.name, count = fetched.len(), "Loaded feed");
                    articles.append(&mut fetched);
                }
                Err(e) => {
                    warn!(feed = %feed.name, url = %feed.url, error = %e, "Could not load feed");
                }
            }
        }

        // stable: equal dates keep feed order
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        info!(category = %category, count = articles.len(), "Category fetch complete");
        articles
    }

    fn fetch_feed(&mut self, feed: &FeedDescriptor, category: FeedCategory) -> NewsResult<Vec<Article>> {
        let xml = self.fetcher.fetch(&feed.url)?;

        let parsed = match parse_feed(&xml) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.fetcher.record_failure(&feed.url, e.to_string());
                return Err(e);
            }
        };

        let articles = parsed
            .into_iter()
            .map(|item| {
                let mut article = item.into_article(category);
                if category.needs_translation() {
                    article.title = translate_to_portuguese(&article.title);
                    article.description = translate_to_portuguese(&article.description);
                }
                article.relevance_score = self.scorer.score(&article.title, &article.description);
                article
            })
            .collect();

        Ok(articles)
    }

    /// One row per registered feed, `Unchecked` until it has been fetched
    pub fn feed_status(&self) -> Vec<FeedStatusEntry> {
        self.registry
            .descriptors()
            .map(|feed| match self.fetcher.status(&feed.url) {
                Some(status) => FeedStatusEntry {
                    category: feed.category,
                    name: feed.name.clone(),
                    url: feed.url.clone(),
                    status: status.status,
                    last_attempt: Some(status.last_attempt),
                    error: status.error.clone(),
                },
                None => FeedStatusEntry {
                    category: feed.category,
                    name: feed.name.clone(),
                    url: feed.url.clone(),
                    status: FeedHealth::Unchecked,
                    last_attempt: None,
                    error: None,
                },
            })
            .collect()
    }

    pub fn feeds(&self) -> &FeedMap {
        self.registry.list()
    }

    pub fn add_feed(&mut self, category: FeedCategory, name: &str, url: &str) -> NewsResult<bool> {
        self.registry.add(category, name, url)
    }

    pub fn remove_feed(&mut self, url: &str) -> NewsResult<bool> {
        self.registry.remove(url)
    }
}

/// Single demo article shown when a category yields nothing
pub fn mock_articles(category: FeedCategory) -> Vec<Article> {
    vec![Article {
        title: format!("[MOCK] Notícia de Demonstração - {}", category),
        description: "Esta é uma notícia de demonstração porque os feeds RSS estão indisponíveis."
            .to_string(),
        link: "#".to_string(),
        published_at: Utc::now(),
        source: MOCK_SOURCE.to_string(),
        category: category.as_str().to_string(),
        feed_category: category,
        relevance_score: MAX_RELEVANCE,
        image: None,
    }]
}
