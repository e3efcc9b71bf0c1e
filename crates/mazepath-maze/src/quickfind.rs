//! Quick-find union-find.
//!
//! Every element stores its set id directly, so [`QuickFind::find`] is a
//! single lookup while [`QuickFind::union`] rewrites every member of the
//! absorbed set. A maze over `n` cells performs `n - 1` unions, so the O(n)
//! merge cost is paid a bounded number of times.

use std::collections::HashMap;
use std::hash::Hash;

/// Disjoint sets over a fixed universe of `T`.
#[derive(Debug, Clone)]
pub struct QuickFind<T> {
    /// Set id per element, indexed by the element's position in `index`.
    set_ids: Vec<usize>,
    index: HashMap<T, usize>,
    set_count: usize,
}

impl<T: Eq + Hash + Clone> QuickFind<T> {
    /// Start with every item in its own singleton set.
    ///
    /// Repeated items are folded into one element.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut index = HashMap::new();
        for item in items {
            let next = index.len();
            index.entry(item).or_insert(next);
        }
        let n = index.len();
        Self {
            set_ids: (0..n).collect(),
            index,
            set_count: n,
        }
    }

    /// Number of disjoint sets.
    #[inline]
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    /// Number of elements in the universe.
    #[inline]
    pub fn len(&self) -> usize {
        self.set_ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set_ids.is_empty()
    }

    /// Whether `item` belongs to the universe.
    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    /// Set id of `item`, or `None` if it is not in the universe.
    #[inline]
    pub fn find(&self, item: &T) -> Option<usize> {
        self.index.get(item).map(|&i| self.set_ids[i])
    }

    /// Whether `p` and `q` are in the same set. False if either is unknown.
    pub fn are_connected(&self, p: &T, q: &T) -> bool {
        match (self.find(p), self.find(q)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Merge the set of `q` into the set of `p`.
    ///
    /// Returns `false` without effect if they are already connected or
    /// either is not in the universe.
    pub fn union(&mut self, p: &T, q: &T) -> bool {
        let (Some(p_id), Some(q_id)) = (self.find(p), self.find(q)) else {
            return false;
        };
        if p_id == q_id {
            return false;
        }
        for id in self.set_ids.iter_mut() {
            if *id == q_id {
                *id = p_id;
            }
        }
        self.set_count -= 1;
        true
    }
}
