//! Key Index
//!
//! In-memory map from key to the offset of that key's newest record.
//!
//! ## Semantics
//! - Last write wins: inserting an existing key replaces its offset
//! - The replaced offset is handed back so callers can report it
//! - Nothing is ever removed; superseded records stay on disk

use std::collections::HashMap;

/// Key → record offset map
#[derive(Debug, Default)]
pub struct KeyIndex {
    offsets: HashMap<String, u64>,
}

impl KeyIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `key` at `offset`, returning the offset it replaced
    pub fn insert(&mut self, key: impl Into<String>, offset: u64) -> Option<u64> {
        self.offsets.insert(key.into(), offset)
    }

    /// Offset of the newest record for `key`
    pub fn get(&self, key: &str) -> Option<u64> {
        self.offsets.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.offsets.contains_key(key)
    }

    /// All indexed keys, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.offsets.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut index = KeyIndex::new();
        assert!(index.is_empty());

        assert_eq!(index.insert("a", 0), None);
        assert_eq!(index.insert("b", 1024), None);

        assert_eq!(index.get("a"), Some(0));
        assert_eq!(index.get("b"), Some(1024));
        assert_eq!(index.get("c"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_last_write_wins() {
        let mut index = KeyIndex::new();
        index.insert("k", 0);

        let previous = index.insert("k", 2048);

        assert_eq!(previous, Some(0));
        assert_eq!(index.get("k"), Some(2048));
        assert_eq!(index.keys(), vec!["k".to_string()]);
    }

    #[test]
    fn test_contains() {
        let mut index = KeyIndex::new();
        index.insert("present", 512);

        assert!(index.contains("present"));
        assert!(!index.contains("absent"));
    }
}
