use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{load_or_default, persist, Backend, StorageError};

const STORE_KEY: &str = "chats";

/// Category of a saved destination chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

impl std::fmt::Display for ChatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ChatKind::Private => "private",
            ChatKind::Group => "group",
            ChatKind::Supergroup => "supergroup",
            ChatKind::Channel => "channel",
        };
        f.write_str(label)
    }
}

/// Metadata kept for a saved destination chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub title: String,
    pub kind: ChatKind,
}

/// Named destination chats, persisted as `{id: {title, kind}}`.
///
/// Entries are created explicitly by the operator with `/add_chat` inside
/// the target chat and are never deleted automatically.
#[derive(Clone)]
pub struct ChatStore {
    backend: Backend,
}

impl ChatStore {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Upsert a destination chat by id.
    pub fn register(&self, id: &str, title: &str, kind: ChatKind) -> Result<(), StorageError> {
        let mut chats = self.list()?;
        chats.insert(
            id.to_string(),
            ChatEntry {
                title: title.to_string(),
                kind,
            },
        );
        persist(&self.backend, STORE_KEY, &chats)?;
        tracing::info!("Saved destination chat {id} ('{title}', {kind})");
        Ok(())
    }

    /// Snapshot of all saved chats. Missing or corrupt storage yields an
    /// empty map.
    pub fn list(&self) -> Result<BTreeMap<String, ChatEntry>, StorageError> {
        load_or_default(&self.backend, STORE_KEY)
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        Ok(self.list()?.len())
    }
}
