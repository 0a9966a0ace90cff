//! Caller-owned store of original slide content.
//!
//! Switching a slide between templates must always re-extract from the
//! content the author wrote, not from whatever the previous template left
//! behind. The store remembers that original per slide id until the author
//! edits the content.

use std::collections::HashMap;

/// Original content keyed by slide id.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    originals: HashMap<String, String>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `content` for `id` unless something is already stored.
    ///
    /// Returns `true` when the content was inserted.
    pub fn preserve(&mut self, id: &str, content: &str) -> bool {
        if self.originals.contains_key(id) {
            return false;
        }
        self.originals.insert(id.to_string(), content.to_string());
        true
    }

    /// The preserved original for `id`, if any.
    pub fn restore(&self, id: &str) -> Option<&str> {
        self.originals.get(id).map(String::as_str)
    }

    /// Forget the original for `id`, returning it.
    pub fn clear(&mut self, id: &str) -> Option<String> {
        self.originals.remove(id)
    }

    pub fn clear_all(&mut self) {
        self.originals.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.originals.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserve_is_insert_once() {
        let mut store = ContentStore::new();
        assert!(store.preserve("s1", "original"));
        assert!(!store.preserve("s1", "changed"));
        assert_eq!(store.restore("s1"), Some("original"));
    }

    #[test]
    fn test_clear() {
        let mut store = ContentStore::new();
        store.preserve("s1", "a");
        store.preserve("s2", "b");

        assert_eq!(store.clear("s1"), Some("a".to_string()));
        assert!(!store.contains("s1"));
        assert_eq!(store.len(), 1);

        store.clear_all();
        assert!(store.is_empty());
        assert_eq!(store.restore("s2"), None);
    }
}
