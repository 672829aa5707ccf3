use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::domain::{FeedCategory, FeedDescriptor};
use crate::errors::{NewsError, NewsResult};
use crate::storage::traits::KeyValueStore;

/// Storage key holding the serialized registry
pub const REGISTRY_KEY: &str = "rss_feeds";

pub type FeedMap = BTreeMap<FeedCategory, Vec<FeedDescriptor>>;

/// Persisted shape: `{"Nacional": [{"name": .., "url": ..}], ..}`
type StoredRegistry = BTreeMap<FeedCategory, Vec<StoredFeed>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredFeed {
    name: String,
    url: String,
}

const DEFAULT_FEEDS: &[(FeedCategory, &str, &str)] = &[
    (FeedCategory::Domestic, "InfoMoney", "https://www.infomoney.com.br/feed/"),
    (
        FeedCategory::Domestic,
        "Valor Investe",
        "https://valorinveste.globo.com/rss/valor-investe/ultimas/",
    ),
    (
        FeedCategory::International,
        "Reuters Business",
        "http://feeds.reuters.com/reuters/businessNews",
    ),
    (FeedCategory::International, "Financial Times", "https://www.ft.com/rss/home"),
    (FeedCategory::Crypto, "CoinDesk", "https://www.coindesk.com/feed"),
    (FeedCategory::Crypto, "Livecoins", "https://livecoins.com.br/feed/"),
];

/// Category -> feed list, written through to a [`KeyValueStore`] on every change.
pub struct FeedRegistry<S: KeyValueStore> {
    store: S,
    feeds: FeedMap,
}

impl<S: KeyValueStore> FeedRegistry<S> {
    /// Load the persisted registry. Missing or unreadable data falls back to
    /// the built-in defaults without surfacing an error.
    pub fn load(store: S) -> Self {
        let feeds = match store.get(REGISTRY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<StoredRegistry>(&raw) {
                Ok(stored) => from_stored(stored),
                Err(e) => {
                    warn!(error = %e, "Stored feed registry is unreadable, using defaults");
                    Self::default_feeds()
                }
            },
            Ok(None) => {
                debug!("No stored feed registry, using defaults");
                Self::default_feeds()
            }
            Err(e) => {
                warn!(error = %e, "Could not read feed registry, using defaults");
                Self::default_feeds()
            }
        };

        Self { store, feeds }
    }

    pub fn default_feeds() -> FeedMap {
        let mut feeds = empty_map();
        for (category, name, url) in DEFAULT_FEEDS {
            feeds
                .entry(*category)
                .or_default()
                .push(FeedDescriptor::new(*name, *url, *category));
        }
        feeds
    }

    pub fn list(&self) -> &FeedMap {
        &self.feeds
    }

    pub fn feeds_for(&self, category: FeedCategory) -> &[FeedDescriptor] {
        self.feeds
            .get(&category)
            .map(|feeds| feeds.as_slice())
            .unwrap_or(&[])
    }

    /// All descriptors in category order
    pub fn descriptors(&self) -> impl Iterator<Item = &FeedDescriptor> {
        self.feeds.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.feeds.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, url: &str) -> bool {
        self.descriptors().any(|feed| feed.url == url)
    }

    /// Add a feed. Returns `Ok(false)` when the URL is already registered
    /// under any category (exact, case-sensitive match).
    pub fn add(&mut self, category: FeedCategory, name: &str, url: &str) -> NewsResult<bool> {
        let name = name.trim();
        let url = url.trim();

        if name.is_empty() {
            return Err(NewsError::InvalidInput("Feed name is empty".to_string()));
        }
        Url::parse(url).map_err(|e| NewsError::InvalidUrl(format!("{}: {}", url, e)))?;

        if self.contains(url) {
            return Ok(false);
        }

        let mut updated = self.feeds.clone();
        updated
            .entry(category)
            .or_default()
            .push(FeedDescriptor::new(name, url, category));

        self.commit(updated)?;
        Ok(true)
    }

    /// Remove the feed with this URL. Returns `Ok(false)` if it is not registered.
    pub fn remove(&mut self, url: &str) -> NewsResult<bool> {
        let url = url.trim();
        if !self.contains(url) {
            return Ok(false);
        }

        let mut updated = self.feeds.clone();
        for feeds in updated.values_mut() {
            feeds.retain(|feed| feed.url != url);
        }

        self.commit(updated)?;
        Ok(true)
    }

    /// Persist `updated` and only then make it the live registry
    fn commit(&mut self, updated: FeedMap) -> NewsResult<()> {
        let stored: StoredRegistry = updated
            .iter()
            .map(|(category, feeds)| {
                let feeds = feeds
                    .iter()
                    .map(|f| StoredFeed {
                        name: f.name.clone(),
                        url: f.url.clone(),
                    })
                    .collect();
                (*category, feeds)
            })
            .collect();

        let raw = serde_json::to_string(&stored)?;
        self.store.set(REGISTRY_KEY, &raw)?;
        self.feeds = updated;
        Ok(())
    }
}

fn empty_map() -> FeedMap {
    FeedCategory::ALL
        .iter()
        .map(|category| (*category, Vec::new()))
        .collect()
}

/// Rebuild descriptors from storage, dropping blank and repeated URLs
fn from_stored(stored: StoredRegistry) -> FeedMap {
    let mut feeds = empty_map();
    let mut seen = HashSet::new();

    for (category, entries) in stored {
        for entry in entries {
            let url = entry.url.trim().to_string();
            if url.is_empty() {
                warn!(category = %category, name = %entry.name, "Dropping stored feed without URL");
                continue;
            }
            if !seen.insert(url.clone()) {
                warn!(url = %url, "Dropping duplicate stored feed");
                continue;
            }
            feeds
                .entry(category)
                .or_default()
                .push(FeedDescriptor::new(entry.name, url, category));
        }
    }

    feeds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::{SqliteKeyValueStore, SqliteStorage};
    use crate::storage::traits::MockKeyValueStore;

    fn setup_registry() -> FeedRegistry<SqliteKeyValueStore> {
        let storage = SqliteStorage::in_memory().unwrap();
        FeedRegistry::load(SqliteKeyValueStore::new(storage))
    }

    #[test]
    fn test_defaults_when_nothing_stored() {
        let registry = setup_registry();

        assert_eq!(registry.len(), 6);
        for category in FeedCategory::ALL {
            assert_eq!(registry.feeds_for(category).len(), 2);
        }
        assert_eq!(registry.feeds_for(FeedCategory::Domestic)[0].name, "InfoMoney");
    }

    #[test]
    fn test_add_then_list() {
        let mut registry = setup_registry();

        let added = registry
            .add(FeedCategory::Crypto, "Cointelegraph", "https://cointelegraph.com/rss")
            .unwrap();

        assert!(added);
        let crypto = registry.feeds_for(FeedCategory::Crypto);
        assert_eq!(crypto.len(), 3);
        assert_eq!(crypto[2].url, "https://cointelegraph.com/rss");
        assert_eq!(crypto[2].category, FeedCategory::Crypto);
    }

    #[test]
    fn test_duplicate_url_rejected_anywhere() {
        let mut registry = setup_registry();
        let before = registry.list().clone();

        let added = registry
            .add(FeedCategory::Domestic, "Again", "https://www.coindesk.com/feed")
            .unwrap();

        assert!(!added);
        assert_eq!(registry.list(), &before);
    }

    #[test]
    fn test_url_match_is_case_sensitive() {
        let mut registry = setup_registry();
        let added = registry
            .add(FeedCategory::Crypto, "Upper", "https://www.coindesk.com/FEED")
            .unwrap();
        assert!(added);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut registry = setup_registry();

        assert!(matches!(
            registry.add(FeedCategory::Crypto, "", "https://x.test/rss"),
            Err(NewsError::InvalidInput(_))
        ));
        assert!(matches!(
            registry.add(FeedCategory::Crypto, "Bad", "not a url"),
            Err(NewsError::InvalidUrl(_))
        ));
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_remove_exactly_one() {
        let mut registry = setup_registry();

        assert!(registry.remove("https://www.ft.com/rss/home").unwrap());
        assert_eq!(registry.len(), 5);
        assert!(!registry.contains("https://www.ft.com/rss/home"));
        assert_eq!(registry.feeds_for(FeedCategory::International).len(), 1);
    }

    #[test]
    fn test_padded_url_added_then_removed() {
        let mut registry = setup_registry();

        assert!(registry
            .add(FeedCategory::Crypto, "Padded", " https://x.test/rss ")
            .unwrap());
        assert!(registry.contains("https://x.test/rss"));

        assert!(registry.remove(" https://x.test/rss ").unwrap());
        assert!(!registry.contains("https://x.test/rss"));
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_remove_unknown_returns_false() {
        let mut registry = setup_registry();
        assert!(!registry.remove("https://nowhere.test/rss").unwrap());
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_mutations_persist() {
        let storage = SqliteStorage::in_memory().unwrap();
        let mut registry = FeedRegistry::load(SqliteKeyValueStore::new(storage.clone()));

        registry
            .add(FeedCategory::Domestic, "Money Times", "https://www.moneytimes.com.br/feed/")
            .unwrap();
        registry.remove("https://www.infomoney.com.br/feed/").unwrap();

        let reloaded = FeedRegistry::load(SqliteKeyValueStore::new(storage));
        assert_eq!(reloaded.list(), registry.list());
        assert_eq!(reloaded.feeds_for(FeedCategory::Domestic)[1].name, "Money Times");
    }

    #[test]
    fn test_corrupt_storage_falls_back() {
        let storage = SqliteStorage::in_memory().unwrap();
        let store = SqliteKeyValueStore::new(storage.clone());
        store.set(REGISTRY_KEY, "{not json").unwrap();

        let registry = FeedRegistry::load(SqliteKeyValueStore::new(storage));
        assert_eq!(registry.list(), &FeedRegistry::<SqliteKeyValueStore>::default_feeds());
    }

    #[test]
    fn test_stored_registry_dedupes_and_fills_categories() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| {
            Ok(Some(
                r#"{"Nacional":[{"name":"A","url":"https://a.test/rss"},{"name":"B","url":"https://a.test/rss"},{"name":"C","url":" "}]}"#
                    .to_string(),
            ))
        });

        let registry = FeedRegistry::load(store);
        assert_eq!(registry.len(), 1);
        assert!(registry.feeds_for(FeedCategory::Crypto).is_empty());
        assert_eq!(registry.list().len(), 3);
    }

    #[test]
    fn test_failed_write_leaves_registry_unchanged() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .returning(|_, _| Err(NewsError::Database(rusqlite::Error::InvalidQuery)));

        let mut registry = FeedRegistry::load(store);
        let result = registry.add(FeedCategory::Crypto, "X", "https://x.test/rss");

        assert!(result.is_err());
        assert!(!registry.contains("https://x.test/rss"));
        assert_eq!(registry.len(), 6);
    }
}
