//! In-memory memoization of successful reviews.
//!
//! Keys are SHA-256 digests of the reviewed text. The cache has no size bound
//! and no eviction; it lives as long as its owner.

use sha2::{Digest, Sha256};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct ReviewCache {
    entries: HashMap<String, String>,
}

impl ReviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hex encoded SHA-256 of `text`.
    pub fn key_for(text: &str) -> String {
        format!("{:x}", Sha256::digest(text.as_bytes()))
    }

    pub fn get(&self, text: &str) -> Option<&str> {
        self.entries.get(&Self::key_for(text)).map(String::as_str)
    }

    pub fn insert(&mut self, text: &str, review: impl Into<String>) {
        self.entries.insert(Self::key_for(text), review.into());
    }

    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(&Self::key_for(text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_stable_sha256_hex() {
        assert_eq!(
            ReviewCache::key_for(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(ReviewCache::key_for("abc"), ReviewCache::key_for("abc"));
        assert_ne!(ReviewCache::key_for("abc"), ReviewCache::key_for("abd"));
    }

    #[test]
    fn test_insert_then_get() {
        let mut cache = ReviewCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get("fn main() {}"), None);

        cache.insert("fn main() {}", "Looks fine.");
        assert_eq!(cache.get("fn main() {}"), Some("Looks fine."));
        assert!(cache.contains("fn main() {}"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_overwrites_same_text() {
        let mut cache = ReviewCache::new();
        cache.insert("x", "first");
        cache.insert("x", "second");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("x"), Some("second"));
    }
}
