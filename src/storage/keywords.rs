use std::collections::BTreeMap;

use super::{load_or_default, persist, Backend, StorageError};

const STORE_KEY: &str = "keywords";

/// Keyword → auto-reply table, persisted as a flat JSON object.
#[derive(Clone)]
pub struct KeywordStore {
    backend: Backend,
}

impl KeywordStore {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Create or replace the reply for a keyword.
    pub fn put(&self, keyword: &str, reply: &str) -> Result<(), StorageError> {
        let mut keywords = self.list()?;
        keywords.insert(keyword.to_lowercase(), reply.to_string());
        persist(&self.backend, STORE_KEY, &keywords)
    }

    /// Remove a keyword. Returns `true` if it existed.
    pub fn remove(&self, keyword: &str) -> Result<bool, StorageError> {
        let mut keywords = self.list()?;
        if keywords.remove(&keyword.to_lowercase()).is_none() {
            return Ok(false);
        }
        persist(&self.backend, STORE_KEY, &keywords)?;
        Ok(true)
    }

    /// Snapshot of the reply table. Missing or corrupt storage yields an
    /// empty map.
    pub fn list(&self) -> Result<BTreeMap<String, String>, StorageError> {
        load_or_default(&self.backend, STORE_KEY)
    }
}
