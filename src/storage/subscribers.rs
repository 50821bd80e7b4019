use std::collections::BTreeSet;

use super::{load_or_default, persist, Backend, StorageError};

const STORE_KEY: &str = "users";

/// Set of user ids that have started the bot, persisted as a JSON array.
///
/// Registration is append-only: there is no unsubscribe path, matching the
/// broadcast semantics of the bot.
#[derive(Clone)]
pub struct SubscriberStore {
    backend: Backend,
}

impl SubscriberStore {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Add a subscriber id. Idempotent; returns `true` when the id was new.
    pub fn register(&self, id: i64) -> Result<bool, StorageError> {
        let mut ids = self.list()?;
        if !ids.insert(id) {
            return Ok(false);
        }
        persist(&self.backend, STORE_KEY, &ids)?;
        tracing::info!("Registered new subscriber {id}");
        Ok(true)
    }

    /// Snapshot of all known subscriber ids. Missing or corrupt storage
    /// yields an empty set.
    pub fn list(&self) -> Result<BTreeSet<i64>, StorageError> {
        load_or_default(&self.backend, STORE_KEY)
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        Ok(self.list()?.len())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryBackend;

    #[test]
    fn register_is_idempotent() {
        let store = SubscriberStore::new(Arc::new(MemoryBackend::new()));

        assert!(store.register(42).unwrap());
        assert!(!store.register(42).unwrap());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn corrupt_document_reads_as_empty() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed("users", "{not json");
        let store = SubscriberStore::new(backend);

        assert!(store.list().unwrap().is_empty());
    }
}
