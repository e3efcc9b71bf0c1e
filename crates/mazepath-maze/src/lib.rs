//! Maze generation for mazepath grids: a quick-find connectivity tracker,
//! per-cell border state, and a random spanning-tree generator.

mod borders;
mod maze;
mod quickfind;

pub use borders::{Borders, Side};
pub use maze::{Maze, MazeError, MazeGen, MazeStats, PASSAGE_WEIGHT, reset_maze};
pub use quickfind::QuickFind;
