//! Sled-backed chat history, one append-only log per user.
//!
//! Keys are `len(user_id) user_id sequence`: the user id's byte length as a big-endian `u32`, the
//! id bytes, then Sled's monotonic id in big-endian bytes. The length prefix keeps one user's key
//! range from containing another's, and a prefix scan returns exchanges in recording order.

use serde::{Deserialize, Serialize};
use sled::{Db, Tree};
use std::path::Path;
use uuid::Uuid;

const TREE_NAME: &str = "chat_history";

/// Exchanges kept per user; older ones are dropped on append.
pub const MAX_ENTRIES_PER_USER: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history store error: {0}")]
    Sled(#[from] sled::Error),
    #[error("history record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// One chatbot exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub user_id: String,
    pub query: String,
    pub reply: String,
    pub timestamp: String,
}

pub struct HistoryStore {
    db: Db,
    tree: Tree,
    max_per_user: usize,
}

impl HistoryStore {
    /// Opens or creates the history DB at the given path.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, HistoryError> {
        let db = sled::open(path)?;
        let tree = db.open_tree(TREE_NAME)?;
        Ok(Self {
            db,
            tree,
            max_per_user: MAX_ENTRIES_PER_USER,
        })
    }

    /// Overrides how many exchanges are kept per user (at least one).
    pub fn with_max_per_user(mut self, max: usize) -> Self {
        self.max_per_user = max.max(1);
        self
    }

    fn user_prefix(user_id: &str) -> Vec<u8> {
        let id = user_id.as_bytes();
        let mut prefix = Vec::with_capacity(4 + id.len() + 8);
        prefix.extend_from_slice(&(id.len() as u32).to_be_bytes());
        prefix.extend_from_slice(id);
        prefix
    }

    /// Records an exchange and returns the stored entry.
    pub fn append(&self, user_id: &str, query: &str, reply: &str) -> Result<HistoryEntry, HistoryError> {
        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            query: query.to_string(),
            reply: reply.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let mut key = Self::user_prefix(user_id);
        key.extend_from_slice(&self.db.generate_id()?.to_be_bytes());
        self.tree.insert(key, serde_json::to_vec(&entry)?)?;
        self.trim(user_id)?;
        Ok(entry)
    }

    /// Drops the user's oldest exchanges beyond `max_per_user`.
    fn trim(&self, user_id: &str) -> Result<(), HistoryError> {
        let keys = self
            .tree
            .scan_prefix(Self::user_prefix(user_id))
            .keys()
            .collect::<Result<Vec<_>, sled::Error>>()?;
        if keys.len() <= self.max_per_user {
            return Ok(());
        }
        let excess = keys.len() - self.max_per_user;
        let mut batch = sled::Batch::default();
        for key in keys.into_iter().take(excess) {
            batch.remove(key);
        }
        self.tree.apply_batch(batch)?;
        tracing::debug!(target: "fir::history", user_id, removed = excess, "trimmed chat history");
        Ok(())
    }

    /// The latest `limit` exchanges for `user_id`, oldest first.
    pub fn recent(&self, user_id: &str, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = self
            .tree
            .scan_prefix(Self::user_prefix(user_id))
            .values()
            .rev()
            .take(limit)
            .map(|v| -> Result<HistoryEntry, HistoryError> { Ok(serde_json::from_slice(&v?)?) })
            .collect::<Result<Vec<_>, HistoryError>>()?;
        entries.reverse();
        Ok(entries)
    }

    /// Deletes every exchange for `user_id`; returns how many were removed.
    pub fn clear(&self, user_id: &str) -> Result<usize, HistoryError> {
        let keys = self
            .tree
            .scan_prefix(Self::user_prefix(user_id))
            .keys()
            .collect::<Result<Vec<_>, sled::Error>>()?;
        let mut batch = sled::Batch::default();
        for key in &keys {
            batch.remove(key.clone());
        }
        self.tree.apply_batch(batch)?;
        Ok(keys.len())
    }
}
