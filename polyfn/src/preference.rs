//! Preference edges between dispatch keys.
//!
//! A preference is a directed winner/loser pair consulted only when two
//! candidates are not ordered by is-a. Lookup is direct: no transitive
//! closure, no cycle detection.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::key::Key;

#[derive(Debug, Default, Clone)]
pub struct PreferenceGraph {
    edges: FxHashMap<Key, FxHashSet<Key>>,
}

impl PreferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `winner` beats `loser` when the two are otherwise
    /// tied.
    pub fn insert(&mut self, winner: Key, loser: Key) {
        self.edges.entry(winner).or_default().insert(loser);
    }

    /// Direct edge lookup.
    pub fn prefers(&self, winner: &Key, loser: &Key) -> bool {
        self.edges
            .get(winner)
            .is_some_and(|losers| losers.contains(loser))
    }

    pub fn len(&self) -> usize {
        self.edges.values().map(|losers| losers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
