//! `PriorityQueue` — a binary min-heap keyed by (priority, tie-break).
//!
//! Priorities are resolved once, when a packet enters:
//! 1. an explicit priority passed to `enter_with`
//! 2. the injected [`Lookup`] function
//! 3. a memoized uniform draw, if caching is enabled (one per distinct packet)
//!
//! If none of these applies the packet is rejected with
//! [`CarveError::MissingPriority`].
//!
//! Ties among equal priorities are broken by insertion sequence:
//! ascending for [`TieBreak::Stable`], descending for [`TieBreak::Antistable`],
//! and by a random draw (then sequence) for [`TieBreak::Unstable`]. Given a
//! fixed seed, the resulting order is fully reproducible.

use super::{Discipline, Packet};
use crate::error::{CarveError, Result};
use crate::rng::Entropy;
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Priority source consulted when a packet enters without an explicit priority.
pub type Lookup<T> = Box<dyn Fn(&T) -> Option<f64>>;

/// Ordering policy among equal priorities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TieBreak {
    /// Insertion order.
    #[default]
    Stable,
    /// Reverse insertion order.
    Antistable,
    /// Random permutation, reproducible for a fixed seed.
    Unstable,
}

impl FromStr for TieBreak {
    type Err = CarveError;

    /// Only the first letter is significant: `s`, `a` or `u`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('s') => Ok(TieBreak::Stable),
            Some('a') => Ok(TieBreak::Antistable),
            Some('u') => Ok(TieBreak::Unstable),
            _ => Err(CarveError::UnknownTieBreak(s.to_owned())),
        }
    }
}

impl TryFrom<String> for TieBreak {
    type Error = CarveError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy)]
struct Key {
    priority: f64,
    draw: f64,
    order: i64,
}

impl Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.draw.total_cmp(&other.draw))
            .then(self.order.cmp(&other.order))
    }
}

#[derive(Debug)]
struct Slot<T> {
    key: Key,
    item: T,
}

/// A min-heap priority queue with configurable tie-breaking.
///
/// ### Performance Characteristics
/// | Operation | Complexity |
/// |-----------|------------|
/// | `push` | \(O(\log n)\) plus one lookup |
/// | `pop` | \(O(\log n)\) |
/// | `peek` | \(O(1)\) |
pub struct PriorityQueue<T> {
    data: Vec<Slot<T>>,
    tiebreak: TieBreak,
    sequence: i64,
    entropy: Entropy,
    lookup: Option<Lookup<T>>,
    cache: Option<HashMap<T, f64>>,
}

impl<T: Packet> PriorityQueue<T> {
    /// Creates an empty heap with no lookup and caching disabled.
    pub fn new(tiebreak: TieBreak, entropy: Entropy) -> Self {
        Self {
            data: Vec::new(),
            tiebreak,
            sequence: 0,
            entropy,
            lookup: None,
            cache: None,
        }
    }

    /// Attaches a priority lookup.
    pub fn with_lookup(mut self, lookup: Lookup<T>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Enables or disables memoized random priorities.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(HashMap::new);
        self
    }

    /// Tie-break mode.
    pub fn tiebreak(&self) -> TieBreak {
        self.tiebreak
    }

    /// The priority `item` would be given right now, consulting (and filling) the cache.
    pub fn resolve(&mut self, item: &T, explicit: Option<f64>) -> Result<f64> {
        if let Some(priority) = explicit {
            return Ok(priority);
        }
        if let Some(priority) = self.lookup.as_ref().and_then(|lookup| lookup(item)) {
            return Ok(priority);
        }
        match self.cache.as_mut() {
            Some(cache) => {
                let entropy = &self.entropy;
                Ok(*cache.entry(item.clone()).or_insert_with(|| entropy.uniform()))
            }
            None => Err(CarveError::MissingPriority(format!("{item:?}"))),
        }
    }

    fn next_key(&mut self, priority: f64) -> Key {
        let seq = self.sequence;
        self.sequence += 1;
        match self.tiebreak {
            TieBreak::Stable => Key {
                priority,
                draw: 0.0,
                order: seq,
            },
            TieBreak::Antistable => Key {
                priority,
                draw: 0.0,
                order: -seq,
            },
            TieBreak::Unstable => Key {
                priority,
                draw: self.entropy.uniform(),
                order: seq,
            },
        }
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > 0 {
            let parent = (node - 1) / 2;
            if self.less(node, parent) {
                self.data.swap(parent, node);
                node = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * node + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smaller = left;
            if right < len && self.less(right, left) {
                smaller = right;
            }

            if self.less(smaller, node) {
                self.data.swap(node, smaller);
                node = smaller;
            } else {
                break;
            }
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.data[a].key.cmp(&self.data[b].key) == Ordering::Less
    }
}

impl<T: Packet> Discipline<T> for PriorityQueue<T> {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn push(&mut self, item: T, priority: Option<f64>) -> Result<()> {
        let priority = self.resolve(&item, priority)?;
        let key = self.next_key(priority);
        self.data.push(Slot { key, item });
        self.sift_up(self.data.len() - 1);
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let slot = self.data.pop()?;
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some(slot.item)
    }

    fn peek(&mut self) -> Option<&T> {
        self.data.first().map(|slot| &slot.item)
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.data.len())
            .field("tiebreak", &self.tiebreak)
            .field("lookup", &self.lookup.is_some())
            .field("cached", &self.cache.as_ref().map(HashMap::len))
            .finish()
    }
}
