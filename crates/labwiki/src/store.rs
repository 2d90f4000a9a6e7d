//! Position-ordered storage of rendered fragments.
//!
//! Every piece of document content — merged annotation blocks and rendered
//! artifacts alike — lands here under a single keyspace of source-line
//! positions. The store is add-only: a position, once occupied, is never
//! overwritten, and the final document reads the fragments back in
//! ascending position order regardless of insertion order.

use std::collections::BTreeMap;

use crate::error::{LogError, LogResult};

/// A 1-based line number identifying where a fragment occurred: the last
/// line of an annotation run, or the call site of an artifact registration.
pub type Position = u32;

/// The ordered-by-position registry of rendered fragments.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    fragments: BTreeMap<Position, String>,
}

impl ContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            fragments: BTreeMap::new(),
        }
    }

    /// Insert a rendered fragment at the given position.
    ///
    /// Fails with [`LogError::DuplicatePosition`] if the position is already
    /// occupied; the existing fragment is left intact.
    pub fn insert(&mut self, position: Position, fragment: impl Into<String>) -> LogResult<&str> {
        use std::collections::btree_map::Entry;

        match self.fragments.entry(position) {
            Entry::Occupied(_) => Err(LogError::DuplicatePosition(position)),
            Entry::Vacant(slot) => Ok(slot.insert(fragment.into()).as_str()),
        }
    }

    /// Whether a fragment exists at the given position.
    pub fn contains(&self, position: Position) -> bool {
        self.fragments.contains_key(&position)
    }

    /// Look up the fragment at a position.
    pub fn get(&self, position: Position) -> Option<&str> {
        self.fragments.get(&position).map(String::as_str)
    }

    /// Number of stored fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the store holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Iterate fragments in ascending position order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = (Position, &str)> {
        self.fragments.iter().map(|(pos, text)| (*pos, text.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogError;
    use proptest::prelude::*;

    #[test]
    fn test_insert_and_get() {
        let mut store = ContentStore::new();
        store.insert(10, "first").unwrap();
        store.insert(20, "second").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(10), Some("first"));
        assert_eq!(store.get(20), Some("second"));
    }

    #[test]
    fn test_duplicate_position_fails_either_order() {
        let mut store = ContentStore::new();
        store.insert(7, "kept").unwrap();

        let err = store.insert(7, "rejected").unwrap_err();
        assert!(matches!(err, LogError::DuplicatePosition(7)));
        // The original fragment survives the failed insert.
        assert_eq!(store.get(7), Some("kept"));

        let mut store = ContentStore::new();
        store.insert(7, "rejected-target").unwrap();
        assert!(store.insert(7, "kept").is_err());
    }

    #[test]
    fn test_out_of_order_insertion_reads_back_sorted() {
        let mut store = ContentStore::new();
        store.insert(30, "c").unwrap();
        store.insert(10, "a").unwrap();
        store.insert(20, "b").unwrap();

        let ordered: Vec<_> = store.iter_ordered().collect();
        assert_eq!(ordered, vec![(10, "a"), (20, "b"), (30, "c")]);
    }

    #[test]
    fn test_empty_store() {
        let store = ContentStore::new();
        assert!(store.is_empty());
        assert_eq!(store.iter_ordered().count(), 0);
    }

    proptest! {
        /// Read-back order is ascending by position for any insertion order.
        #[test]
        fn prop_order_independent_of_insertion(mut positions in proptest::collection::vec(0u32..10_000, 1..64)) {
            positions.sort_unstable();
            positions.dedup();
            let sorted = positions.clone();

            // Insert in a shuffled order derived from the sorted list.
            let mut shuffled = positions;
            shuffled.reverse();
            if shuffled.len() > 2 {
                let mid = shuffled.len() / 2;
                shuffled.swap(0, mid);
            }

            let mut store = ContentStore::new();
            for pos in &shuffled {
                store.insert(*pos, format!("fragment {pos}")).unwrap();
            }

            let read_back: Vec<Position> = store.iter_ordered().map(|(p, _)| p).collect();
            prop_assert_eq!(read_back, sorted);
        }
    }
}
