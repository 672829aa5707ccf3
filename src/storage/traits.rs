use crate::errors::NewsResult;

/// String key/value persistence, one serialized document per key
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> NewsResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> NewsResult<()>;
}
