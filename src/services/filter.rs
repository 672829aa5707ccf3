use crate::domain::{Article, FeedCategory, NewsStats};

/// Predicate value meaning "no restriction"
pub const ALL: &str = "all";

/// Independent predicates, combined with AND. `None`, empty and `"all"`
/// leave the set unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsFilter {
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub feed_category: Option<String>,
}

impl NewsFilter {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_feed_category(mut self, feed_category: impl Into<String>) -> Self {
        self.feed_category = Some(feed_category.into());
        self
    }

    pub fn matches(&self, article: &Article) -> bool {
        if let Some(search) = active(&self.search) {
            let needle = search.to_lowercase();
            if !article.title.to_lowercase().contains(&needle)
                && !article.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if let Some(source) = active(&self.source) {
            if article.source != source {
                return false;
            }
        }

        if let Some(category) = active(&self.category) {
            if article.category != category {
                return false;
            }
        }

        if let Some(feed_category) = active(&self.feed_category) {
            let wanted = feed_category.parse::<FeedCategory>().ok();
            if wanted != Some(article.feed_category) {
                return false;
            }
        }

        true
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != ALL)
}

pub fn filter_articles(articles: &[Article], filter: &NewsFilter) -> Vec<Article> {
    articles
        .iter()
        .filter(|article| filter.matches(article))
        .cloned()
        .collect()
}

/// Counts per source and per category. The category count is keyed by the
/// article's `category` label, which equals the feed category label.
pub fn compute_stats(articles: &[Article]) -> NewsStats {
    let mut stats = NewsStats {
        total: articles.len(),
        ..NewsStats::default()
    };

    for article in articles {
        *stats.by_source.entry(article.source.clone()).or_insert(0) += 1;
        *stats
            .by_feed_category
            .entry(article.category.clone())
            .or_insert(0) += 1;
    }

    stats
}

/// Split into (top, regular) around the top relevance threshold, keeping order
pub fn split_top_news(articles: &[Article]) -> (Vec<Article>, Vec<Article>) {
    articles.iter().cloned().partition(Article::is_top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParsedArticle;
    use chrono::Utc;
    use std::collections::HashMap;

    fn article(title: &str, description: &str, source: &str, category: FeedCategory) -> Article {
        ParsedArticle {
            title: title.to_string(),
            link: format!("https://news.test/{}", title.len()),
            description: description.to_string(),
            published_at: Utc::now(),
            source: source.to_string(),
            image: None,
        }
        .into_article(category)
    }

    fn sample() -> Vec<Article> {
        vec![
            article("Selic sobe", "Copom eleva juros", "InfoMoney", FeedCategory::Domestic),
            article("Bitcoin cai", "Mercado cripto recua", "CoinDesk", FeedCategory::Crypto),
            article("Fed holds", "Rates steady, selic unaffected", "Reuters", FeedCategory::International),
        ]
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let articles = sample();
        assert_eq!(filter_articles(&articles, &NewsFilter::default()), articles);
    }

    #[test]
    fn test_all_sentinel_is_ignored() {
        let articles = sample();
        let filter = NewsFilter::default()
            .with_source(ALL)
            .with_category(ALL)
            .with_feed_category(ALL);
        assert_eq!(filter_articles(&articles, &filter), articles);
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let articles = sample();
        let filtered = filter_articles(&articles, &NewsFilter::default().with_search("SELIC"));

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].title, "Selic sobe");
        assert_eq!(filtered[1].title, "Fed holds");
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let articles = sample();
        let filter = NewsFilter::default()
            .with_search("selic")
            .with_source("Reuters");

        let filtered = filter_articles(&articles, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].source, "Reuters");
    }

    #[test]
    fn test_category_and_feed_category() {
        let articles = sample();

        let by_category = filter_articles(&articles, &NewsFilter::default().with_category("Criptomoedas"));
        assert_eq!(by_category.len(), 1);

        let by_feed = filter_articles(&articles, &NewsFilter::default().with_feed_category("crypto"));
        assert_eq!(by_feed, by_category);

        let unknown = filter_articles(&articles, &NewsFilter::default().with_feed_category("sports"));
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let articles = sample();
        let filter = NewsFilter::default().with_search("cripto");

        let once = filter_articles(&articles, &filter);
        let twice = filter_articles(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_stats_counts() {
        let articles = vec![
            article("a", "", "X", FeedCategory::Domestic),
            article("b", "", "X", FeedCategory::Domestic),
            article("c", "", "Y", FeedCategory::International),
        ];

        let stats = compute_stats(&articles);

        assert_eq!(stats.total, 3);
        assert_eq!(
            stats.by_source,
            HashMap::from([("X".to_string(), 2), ("Y".to_string(), 1)])
        );
        assert_eq!(
            stats.by_feed_category,
            HashMap::from([("Nacional".to_string(), 2), ("Internacional".to_string(), 1)])
        );
    }

    #[test]
    fn test_stats_of_nothing() {
        let stats = compute_stats(&[]);
        assert_eq!(stats, NewsStats::default());
    }

    #[test]
    fn test_split_top_news() {
        let mut articles = sample();
        articles[1].relevance_score = 90;
        articles[2].relevance_score = 99;

        let (top, regular) = split_top_news(&articles);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].title, "Bitcoin cai");
        assert_eq!(regular.len(), 1);
        assert_eq!(regular[0].title, "Selic sobe");
    }
}
