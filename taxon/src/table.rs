//! # Message Table
//!
//! The shared `code -> message` map behind a variant. Instances never copy
//! their message out of it: every `message()` call reads the table, so an
//! edit made after construction shows up on errors that already exist.

use indexmap::IndexMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Late-bound message lookup shared by a variant and all of its instances.
#[derive(Debug, Default)]
pub struct MessageTable {
    entries: RwLock<IndexMap<String, String>>,
}

impl MessageTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(code, message)` pairs. A repeated code keeps
    /// its first position and its last message.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(code, message)| (code.into(), message.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Current message for `code`
    pub fn get(&self, code: &str) -> Option<String> {
        self.read().get(code).cloned()
    }

    /// Replace (or add) the message for `code`, returning the previous one
    pub fn set(&self, code: impl Into<String>, message: impl Into<String>) -> Option<String> {
        self.write().insert(code.into(), message.into())
    }

    /// Drop the message for `code`
    pub fn remove(&self, code: &str) -> Option<String> {
        self.write().shift_remove(code)
    }

    /// Whether the table currently has a message for `code`
    pub fn contains(&self, code: &str) -> bool {
        self.read().contains_key(code)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of the codes, in insertion order
    pub fn codes(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    // The table only ever holds owned strings, so a panic in another
    // holder cannot leave it half-written.
    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, String>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, String>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
