//! Array-backed binary min-heap.
//!
//! Unlike `std::collections::BinaryHeap` this queue only needs
//! [`PartialOrd`], exposes a linear membership test, and pins down its
//! tie-breaking: when sifting down past two equal children that are both
//! smaller than the current node, the left child is chosen. An element that
//! merely ties with a child stays put.
//!
//! There is no decrease-key. The same item may be queued several times under
//! different priorities and callers must skip stale entries when popping.

/// A min-heap over `T`, ordered by `PartialOrd`.
///
/// An element "compares less" only when `partial_cmp` returns
/// `Some(Less)`, so incomparable values (NaN keys) never move.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    tree: Vec<T>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self { tree: Vec::new() }
    }
}

impl<T: PartialOrd> MinHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self { tree: Vec::new() }
    }

    /// Create an empty heap with room for `cap` elements.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            tree: Vec::with_capacity(cap),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Current capacity of the backing array.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }

    /// Remove every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The smallest element, if any.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Insert `value` and restore the heap order. Amortized O(log n).
    pub fn insert(&mut self, value: T) {
        if self.tree.len() == self.tree.capacity() {
            // Grow by doubling.
            let extra = self.tree.capacity().max(1);
            self.tree.reserve_exact(extra);
        }
        self.tree.push(value);
        self.sift_up(self.tree.len() - 1);
    }

    /// Remove and return the smallest element.
    ///
    /// # Panics
    ///
    /// Panics if the heap is empty. Use [`try_pop`](Self::try_pop) when
    /// emptiness is not already ruled out.
    pub fn pop(&mut self) -> T {
        assert!(!self.tree.is_empty(), "pop called on an empty MinHeap");
        self.pop_root()
    }

    /// Remove and return the smallest element, or `None` if empty.
    pub fn try_pop(&mut self) -> Option<T> {
        if self.tree.is_empty() {
            None
        } else {
            Some(self.pop_root())
        }
    }

    /// Linear scan for an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.tree.iter().any(|x| x == value)
    }

    /// Linear scan with a caller-defined equality.
    pub fn contains_by(&self, mut eq: impl FnMut(&T) -> bool) -> bool {
        self.tree.iter().any(|x| eq(x))
    }

    /// Elements in backing-array order (heap order, not sorted).
    pub fn as_slice(&self) -> &[T] {
        &self.tree
    }

    fn pop_root(&mut self) -> T {
        // Moves the last element into the root slot.
        let root = self.tree.swap_remove(0);
        self.sift_down(0);
        root
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.tree[a].partial_cmp(&self.tree[b]) == Some(std::cmp::Ordering::Less)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.tree.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.tree.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            if left >= len {
                return;
            }
            let left_less = self.less(left, i);
            let right_less = right < len && self.less(right, i);
            let child = match (left_less, right_less) {
                (true, true) => {
                    if self.less(right, left) {
                        right
                    } else {
                        left
                    }
                }
                (true, false) => left,
                (false, true) => right,
                (false, false) => return,
            };
            self.tree.swap(i, child);
            i = child;
        }
    }
}
