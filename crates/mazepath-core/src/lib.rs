//! **mazepath-core**: shared types for the mazepath engine.
//!
//! This crate provides the small vocabulary used by the pathfinding and maze
//! crates: integer grid geometry, cell terrain with its cost table, and the
//! [`GridConfig`] that sizes a grid and its movement costs.

pub mod config;
pub mod geom;
pub mod terrain;

pub use config::{ConfigError, GridConfig, Moves};
pub use geom::{Point, Range};
pub use terrain::{Terrain, TerrainCosts};
