//! Display-name cache
//!
//! Maps entity ids (recipes, users) to resolved display names. The cache is
//! an ordinary value owned by whoever resolves the names and is passed into
//! the functions that need labels.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct DisplayNameCache {
    names: HashMap<String, String>,
}

impl DisplayNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Remember a name; empty names are ignored. Returns the previous name.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) -> Option<String> {
        let name = name.into();
        if name.trim().is_empty() {
            return None;
        }
        self.names.insert(id.into(), name)
    }

    /// The cached name, or the id itself when nothing is cached
    pub fn label_for(&self, id: &str) -> String {
        self.get(id).unwrap_or(id).to_string()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_to_id() {
        let mut cache = DisplayNameCache::new();
        assert_eq!(cache.label_for("r1"), "r1");

        cache.insert("r1", "Protein Pancakes");
        assert_eq!(cache.label_for("r1"), "Protein Pancakes");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_blank_names_are_not_cached() {
        let mut cache = DisplayNameCache::new();
        assert_eq!(cache.insert("r1", "   "), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_resets_cache() {
        let mut cache = DisplayNameCache::new();
        cache.insert("a", "Alice");
        assert_eq!(cache.insert("a", "Alicia"), Some("Alice".to_string()));
        cache.clear();
        assert!(cache.get("a").is_none());
    }
}
