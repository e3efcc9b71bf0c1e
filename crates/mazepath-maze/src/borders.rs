//! Wall state between neighbouring maze cells.

use mazepath_core::{Point, Range};

/// One of the two borders a cell owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Shared with the cell at `x + 1`.
    Right,
    /// Shared with the cell at `y + 1`.
    Bottom,
}

/// Open/closed state of every cell's right and bottom border.
///
/// The border between `a` and its left or upper neighbour is owned by that
/// neighbour, so each shared wall is stored exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Borders {
    bounds: Range,
    right: Vec<bool>,
    bottom: Vec<bool>,
}

impl Borders {
    /// All borders closed.
    pub fn new(bounds: Range) -> Self {
        let n = bounds.len();
        Self {
            bounds,
            right: vec![false; n],
            bottom: vec![false; n],
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Whether the `side` border of `p` is open. Out of bounds is closed.
    pub fn is_open(&self, p: Point, side: Side) -> bool {
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        match side {
            Side::Right => self.right[i],
            Side::Bottom => self.bottom[i],
        }
    }

    /// Whether `a` and `b` are cardinal neighbours with an open wall between
    /// them.
    pub fn is_open_between(&self, a: Point, b: Point) -> bool {
        self.owner(a, b)
            .is_some_and(|(p, side)| self.is_open(p, side))
    }

    /// Open the border shared by cardinal neighbours `a` and `b`.
    ///
    /// Returns `false` if they are not in-bounds cardinal neighbours.
    pub fn open_between(&mut self, a: Point, b: Point) -> bool {
        let Some((p, side)) = self.owner(a, b) else {
            return false;
        };
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        match side {
            Side::Right => self.right[i] = true,
            Side::Bottom => self.bottom[i] = true,
        }
        true
    }

    /// Number of open borders.
    pub fn open_count(&self) -> usize {
        self.right.iter().chain(&self.bottom).filter(|&&o| o).count()
    }

    /// Close every border.
    pub fn close_all(&mut self) {
        self.right.fill(false);
        self.bottom.fill(false);
    }

    /// The cell and side holding the wall between `a` and `b`.
    fn owner(&self, a: Point, b: Point) -> Option<(Point, Side)> {
        if !a.is_cardinal_neighbor(b) || !self.bounds.contains(a) || !self.bounds.contains(b) {
            return None;
        }
        let first = a.min(b);
        let side = if a.y == b.y { Side::Right } else { Side::Bottom };
        Some((first, side))
    }
}
