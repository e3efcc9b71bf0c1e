//! Distance estimates for A*.
//!
//! Each estimate takes the two points plus the cost of one orthogonal step
//! (`cardinal`) and one diagonal step (`ordinal`).

use std::fmt;
use std::str::FromStr;

use mazepath_core::Point;

/// Manhattan (L1) distance, scaled by `cardinal`.
///
/// Admissible only when movement is 4-directional.
#[inline]
pub fn manhattan(a: Point, b: Point, cardinal: f64, _ordinal: f64) -> f64 {
    let (dx, dy) = a.abs_delta(b);
    cardinal * (f64::from(dx) + f64::from(dy))
}

/// Diagonal distance.
///
/// With `ordinal == cardinal` this is Chebyshev distance; with
/// `ordinal == cardinal * √2` it is octile distance.
#[inline]
pub fn diagonal(a: Point, b: Point, cardinal: f64, ordinal: f64) -> f64 {
    let (dx, dy) = a.abs_delta(b);
    let straight = f64::from(dx) + f64::from(dy);
    cardinal * straight + (ordinal - 2.0 * cardinal) * f64::from(dx.min(dy))
}

/// Straight-line distance, scaled by `cardinal`.
#[inline]
pub fn euclidean(a: Point, b: Point, cardinal: f64, _ordinal: f64) -> f64 {
    let (dx, dy) = a.abs_delta(b);
    cardinal * f64::from(dx).hypot(f64::from(dy))
}

type Estimator = fn(Point, Point, f64, f64) -> f64;

/// Indexed by `HeuristicKind as usize`.
const ESTIMATORS: [Estimator; 3] = [manhattan, diagonal, euclidean];

/// The family of a [`Heuristic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeuristicKind {
    Manhattan = 0,
    Diagonal = 1,
    Euclidean = 2,
}

/// An A* distance estimate together with its diagonal step cost.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heuristic {
    pub kind: HeuristicKind,
    /// Cost of one diagonal step, as seen by the estimate.
    pub ordinal: f64,
}

impl Heuristic {
    pub const fn new(kind: HeuristicKind, ordinal: f64) -> Self {
        Self { kind, ordinal }
    }

    pub const fn manhattan() -> Self {
        Self::new(HeuristicKind::Manhattan, std::f64::consts::SQRT_2)
    }

    /// Diagonal estimate with √2 diagonals.
    pub const fn octile() -> Self {
        Self::new(HeuristicKind::Diagonal, std::f64::consts::SQRT_2)
    }

    /// Diagonal estimate where a diagonal step costs the same as an
    /// orthogonal one (for a unit cardinal cost).
    pub const fn chebyshev() -> Self {
        Self::new(HeuristicKind::Diagonal, 1.0)
    }

    pub const fn euclidean() -> Self {
        Self::new(HeuristicKind::Euclidean, std::f64::consts::SQRT_2)
    }

    /// Estimated cost from `from` to `to`.
    #[inline]
    pub fn estimate(&self, from: Point, to: Point, cardinal: f64) -> f64 {
        ESTIMATORS[self.kind as usize](from, to, cardinal, self.ordinal)
    }

    /// Display name, telling Chebyshev and octile apart by their constant.
    pub fn label(&self, cardinal: f64) -> &'static str {
        match self.kind {
            HeuristicKind::Manhattan => "Manhattan",
            HeuristicKind::Diagonal if self.ordinal == cardinal => "Chebyshev",
            HeuristicKind::Diagonal => "Octile",
            HeuristicKind::Euclidean => "Euclidean",
        }
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::manhattan()
    }
}

/// Error returned when parsing an unknown heuristic name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHeuristic(pub String);

impl fmt::Display for UnknownHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown heuristic {:?} (expected manhattan, octile, chebyshev or euclidean)",
            self.0
        )
    }
}

impl std::error::Error for UnknownHeuristic {}

impl FromStr for Heuristic {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Self::manhattan()),
            "octile" | "diagonal" => Ok(Self::octile()),
            "chebyshev" => Ok(Self::chebyshev()),
            "euclidean" => Ok(Self::euclidean()),
            _ => Err(UnknownHeuristic(s.to_string())),
        }
    }
}
