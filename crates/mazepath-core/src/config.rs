//! Grid dimensions and movement costs.

use std::fmt;

use crate::geom::Range;
use crate::terrain::TerrainCosts;

/// Which neighbours a grid cell is linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Moves {
    /// Up, down, left and right.
    Four,
    /// The four orthogonal neighbours plus the four diagonals.
    #[default]
    Eight,
}

/// Configuration for a grid graph and the searches and mazes built on it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
    /// Edge weight between orthogonal neighbours.
    pub cardinal: f64,
    /// Edge weight between diagonal neighbours.
    pub ordinal: f64,
    /// Extra cost for entering a sand cell.
    pub sand_weight: f64,
    /// Neighbourhood used when linking an open grid.
    pub moves: Moves,
    /// Rejected draws the maze generator tolerates before switching to its
    /// fallback. `None` means 64 per cell.
    pub max_attempts: Option<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 48,
            height: 48,
            cardinal: 1.0,
            ordinal: std::f64::consts::SQRT_2,
            sand_weight: 2.0,
            moves: Moves::Eight,
            max_attempts: None,
        }
    }
}

impl GridConfig {
    /// Default configuration for a `width × height` grid.
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check that the configuration describes a usable grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        for (name, value) in [("cardinal", self.cardinal), ("ordinal", self.ordinal)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidUnit { name, value });
            }
        }
        if !self.sand_weight.is_finite() || self.sand_weight < 0.0 {
            return Err(ConfigError::InvalidSandWeight(self.sand_weight));
        }
        Ok(())
    }

    /// The grid rectangle anchored at the origin.
    pub fn bounds(&self) -> Range {
        Range::grid(self.width, self.height)
    }

    /// Terrain cost table derived from [`sand_weight`](Self::sand_weight).
    pub fn costs(&self) -> TerrainCosts {
        TerrainCosts::new(self.sand_weight)
    }

    /// Effective cap on rejected maze draws.
    pub fn attempt_cap(&self) -> usize {
        self.max_attempts
            .unwrap_or_else(|| self.bounds().len().saturating_mul(64))
    }
}

/// Errors reported by [`GridConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Width or height is not positive.
    EmptyGrid { width: i32, height: i32 },
    /// A movement unit is zero, negative or not finite.
    InvalidUnit { name: &'static str, value: f64 },
    /// The sand penalty is negative or not finite.
    InvalidSandWeight(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid size must be positive, got {width}x{height}")
            }
            Self::InvalidUnit { name, value } => {
                write!(f, "{name} distance must be positive and finite, got {value}")
            }
            Self::InvalidSandWeight(w) => {
                write!(f, "sand weight must be non-negative and finite, got {w}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = GridConfig {
            moves: Moves::Four,
            max_attempts: Some(10),
            ..GridConfig::with_size(7, 5)
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: GridConfig = serde_json::from_str(r#"{"width": 10, "moves": "Four"}"#).unwrap();
        assert_eq!(cfg.width, 10);
        assert_eq!(cfg.height, 48);
        assert_eq!(cfg.moves, Moves::Four);
        assert_eq!(cfg.cardinal, 1.0);
    }
}
