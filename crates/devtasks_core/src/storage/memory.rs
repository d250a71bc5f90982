//! In-process key-value store.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;

/// `HashMap`-backed store with an optional total byte quota.
///
/// The quota counts key and value bytes of every entry, the way browser
/// local storage accounts its capacity.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Builds a store pre-populated with entries, bypassing any quota.
    pub fn seeded<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            quota_bytes: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_bytes_without(&self, skip_key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(key, _)| key.as_str() != skip_key)
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(limit) = self.quota_bytes {
            let attempted = self.used_bytes_without(key) + key.len() + value.len();
            if attempted > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    attempted_bytes: attempted,
                    limit_bytes: limit,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKvStore;
    use crate::storage::{KeyValueStore, StorageError};

    #[test]
    fn set_overwrites_and_remove_clears() {
        let mut store = MemoryKvStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_previous_value() {
        let mut store = MemoryKvStore::with_quota(8);
        store.set("k", "1234").unwrap();

        let err = store.set("k", "123456789").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded { limit_bytes: 8, .. }
        ));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn quota_counts_replaced_value_only_once() {
        let mut store = MemoryKvStore::with_quota(6);
        store.set("k", "12345").unwrap();
        store.set("k", "54321").unwrap();
        assert_eq!(store.len(), 1);
    }
}
