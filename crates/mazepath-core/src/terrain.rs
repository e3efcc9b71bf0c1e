//! Cell terrain and the cost table the searches consult.

/// The terrain of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    /// Open floor. No extra cost.
    #[default]
    Space,
    /// Blocks movement. Edges into a wall are never relaxed.
    Wall,
    /// Walkable, but entering it costs an extra penalty.
    Sand,
}

impl Terrain {
    /// Whether a search may enter a cell of this terrain.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Additive cost penalties per terrain.
///
/// The penalty is added on top of an edge's weight when the edge enters a
/// cell of that terrain. Walls have no penalty: they are filtered out by
/// [`Terrain::is_passable`] before any cost is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainCosts {
    /// Penalty for entering a [`Terrain::Sand`] cell.
    pub sand: f64,
}

impl Default for TerrainCosts {
    fn default() -> Self {
        Self { sand: 2.0 }
    }
}

impl TerrainCosts {
    /// Cost table with the given sand penalty.
    pub const fn new(sand: f64) -> Self {
        Self { sand }
    }

    /// Penalty for entering a cell of terrain `t`.
    #[inline]
    pub fn modifier(&self, t: Terrain) -> f64 {
        match t {
            Terrain::Space | Terrain::Wall => 0.0,
            Terrain::Sand => self.sand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_walls_are_impassable() {
        assert!(Terrain::Space.is_passable());
        assert!(Terrain::Sand.is_passable());
        assert!(!Terrain::Wall.is_passable());
    }

    #[test]
    fn modifiers() {
        let costs = TerrainCosts::new(5.0);
        assert_eq!(costs.modifier(Terrain::Space), 0.0);
        assert_eq!(costs.modifier(Terrain::Sand), 5.0);
        assert_eq!(TerrainCosts::default().modifier(Terrain::Sand), 2.0);
    }
}
