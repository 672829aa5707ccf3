use rusqlite::OptionalExtension;

use crate::errors::NewsResult;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::KeyValueStore;

pub struct SqliteKeyValueStore {
    storage: SqliteStorage,
}

impl SqliteKeyValueStore {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> NewsResult<Option<String>> {
        let conn = self.storage.connection()?;
        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> NewsResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_store() -> SqliteKeyValueStore {
        let storage = SqliteStorage::in_memory().unwrap();
        SqliteKeyValueStore::new(storage)
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = setup_store();
        assert!(store.get("rss_feeds").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let store = setup_store();
        store.set("rss_feeds", "{}").unwrap();
        assert_eq!(store.get("rss_feeds").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_set_overwrites() {
        let store = setup_store();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_shared_storage_sees_writes() {
        let storage = SqliteStorage::in_memory().unwrap();
        let writer = SqliteKeyValueStore::new(storage.clone());
        let reader = SqliteKeyValueStore::new(storage);

        writer.set("k", "v").unwrap();
        assert_eq!(reader.get("k").unwrap().as_deref(), Some("v"));
    }
}
