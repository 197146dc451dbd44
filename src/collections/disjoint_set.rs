//! Disjoint Set (Union-Find) over dense element ids.
//!
//! # Performance
//!
//! - Uses `Cell<usize>` for parent pointers so `find` can compress paths
//!   through a shared reference.
//! - Path compression and union-by-rank give nearly constant time operations.

use std::cell::Cell;

/// A Disjoint Set (Union-Find) data structure.
#[derive(Debug, Clone, Default)]
pub struct DisjointSet {
    /// Parent pointers.
    parent: Vec<Cell<usize>>,
    /// Rank (depth upper bound) for union-by-rank.
    rank: Vec<u8>,
    /// Number of disjoint sets.
    sets: usize,
}

impl DisjointSet {
    /// Creates a new empty disjoint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new disjoint set with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
            sets: 0,
        }
    }

    /// Creates a new set containing a single element and returns its id.
    pub fn make_set(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(Cell::new(id));
        self.rank.push(0);
        self.sets += 1;
        id
    }

    /// Finds the representative of the set containing `id`, with path compression.
    ///
    /// # Panics
    /// Panics if `id` was never returned by `make_set`.
    pub fn find(&self, id: usize) -> usize {
        // 1. Find root
        let mut root = id;
        loop {
            let parent = self.parent[root].get();
            if parent == root {
                break;
            }
            root = parent;
        }

        // 2. Compress path
        let mut curr = id;
        while curr != root {
            let parent = self.parent[curr].get();
            self.parent[curr].set(root);
            curr = parent;
        }

        root
    }

    /// Unites the sets containing `id1` and `id2`.
    ///
    /// Returns the representative of the united set, or `None` if both were
    /// already in the same set.
    pub fn union(&mut self, id1: usize, id2: usize) -> Option<usize> {
        let root1 = self.find(id1);
        let root2 = self.find(id2);

        if root1 == root2 {
            return None;
        }
        self.sets -= 1;

        let rank1 = self.rank[root1];
        let rank2 = self.rank[root2];

        if rank1 < rank2 {
            self.parent[root1].set(root2);
            Some(root2)
        } else if rank1 > rank2 {
            self.parent[root2].set(root1);
            Some(root1)
        } else {
            self.parent[root2].set(root1);
            self.rank[root1] += 1;
            Some(root1)
        }
    }

    /// Returns `true` if both elements are in the same set.
    pub fn same_set(&self, id1: usize, id2: usize) -> bool {
        self.find(id1) == self.find(id2)
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_set() {
        let mut ds = DisjointSet::new();

        let a = ds.make_set();
        let b = ds.make_set();
        let c = ds.make_set();
        assert_eq!(ds.set_count(), 3);

        assert_eq!(ds.find(a), a);
        assert_eq!(ds.find(b), b);

        assert!(ds.union(a, b).is_some());
        assert_eq!(ds.find(a), ds.find(b));
        assert_ne!(ds.find(a), ds.find(c));

        assert!(ds.union(b, c).is_some());
        assert_eq!(ds.find(a), ds.find(c));
        assert_eq!(ds.set_count(), 1);

        // Already united
        assert!(ds.union(a, c).is_none());
        assert_eq!(ds.set_count(), 1);
    }

    #[test]
    fn union_returns_new_root() {
        let mut ds = DisjointSet::with_capacity(4);
        for _ in 0..4 {
            ds.make_set();
        }
        let root = ds.union(2, 3).unwrap();
        assert_eq!(ds.find(2), root);
        assert_eq!(ds.find(3), root);
        assert!(ds.same_set(3, 2));
        assert!(!ds.same_set(0, 2));
    }
}
