//! Toggle-set selections (dietary preferences, goals).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A set of selected options where selecting twice deselects.
///
/// Order is irrelevant and duplicates cannot occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Ord"
))]
pub struct ToggleSet<T> {
    items: BTreeSet<T>,
}

impl<T: Ord> Default for ToggleSet<T> {
    fn default() -> Self {
        Self {
            items: BTreeSet::new(),
        }
    }
}

impl<T: Ord> ToggleSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the selection of `item`. Returns whether it is now selected.
    pub fn toggle(&mut self, item: T) -> bool {
        if self.items.remove(&item) {
            false
        } else {
            self.items.insert(item);
            true
        }
    }

    /// Select `item`. Selecting an already-selected item is a no-op.
    pub fn insert(&mut self, item: T) -> bool {
        self.items.insert(item)
    }

    pub fn remove(&mut self, item: &T) -> bool {
        self.items.remove(item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Ord> FromIterator<T> for ToggleSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_original() {
        let mut set: ToggleSet<&str> = ["vegan"].into_iter().collect();
        let original = set.clone();

        assert!(set.toggle("vegetarian"));
        assert!(!set.toggle("vegetarian"));
        assert_eq!(set, original);

        assert!(!set.toggle("vegan"));
        assert!(set.toggle("vegan"));
        assert_eq!(set, original);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = ToggleSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);

        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert!(set.is_empty());
    }

    #[test]
    fn test_serializes_as_list() {
        let set: ToggleSet<&str> = ["b", "a"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["a","b"]"#);
    }
}
