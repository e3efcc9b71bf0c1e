//! Random spanning-tree mazes over a grid graph.
//!
//! [`MazeGen::generate`] links an edge-less grid into a perfect maze: every
//! cell reachable from every other along exactly one route. Cells are joined
//! by drawing a random cell and a random orthogonal neighbour and keeping the
//! pair only when it merges two disconnected regions. If too many draws are
//! rejected, the remaining walls are shuffled and merged in order instead.

use std::fmt;

use log::{debug, warn};
use mazepath_core::{ConfigError, GridConfig, Point};
use mazepath_paths::{Graph, GraphError, VertexId};
use rand::seq::SliceRandom;
use rand::{Rng, RngExt};

use crate::borders::Borders;
use crate::quickfind::QuickFind;

/// Weight of each corridor edge.
pub const PASSAGE_WEIGHT: f64 = 1.0;

/// Rejected draws allowed per cell when no cap is given.
const DEFAULT_ATTEMPTS_PER_CELL: usize = 64;

/// Counters from one [`MazeGen::generate`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeStats {
    /// Undirected connections made.
    pub connections: usize,
    /// Random draws discarded because both cells were already connected.
    pub rejected: usize,
    /// Whether the shuffled-walls pass had to finish the maze.
    pub fallback: bool,
}

/// Errors from building or generating a maze.
#[derive(Debug, Clone, PartialEq)]
pub enum MazeError {
    /// The grid configuration is unusable.
    Config(ConfigError),
    /// A graph mutation failed while carving.
    Graph(GraphError),
    /// The graph already has edges.
    NotEmpty { edges: usize },
    /// The tracker does not hold exactly the graph's vertices.
    TrackerMismatch { vertices: usize, tracked: usize },
    /// A vertex lies outside the border grid.
    BordersMismatch { pos: Point },
    /// Some cells have no orthogonal path to the rest of the grid.
    Disconnected { sets: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid maze config: {e}"),
            Self::Graph(e) => write!(f, "graph error while carving maze: {e}"),
            Self::NotEmpty { edges } => {
                write!(f, "maze graph must start without edges, found {edges}")
            }
            Self::TrackerMismatch { vertices, tracked } => write!(
                f,
                "connectivity tracker covers {tracked} items but the graph has {vertices} vertices"
            ),
            Self::BordersMismatch { pos } => {
                write!(f, "vertex at {pos} lies outside the maze borders")
            }
            Self::Disconnected { sets } => {
                write!(f, "grid cannot be spanned, {sets} regions remain")
            }
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Graph(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for MazeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GraphError> for MazeError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

/// The state a maze run works on.
#[derive(Debug, Clone)]
pub struct Maze {
    pub graph: Graph,
    pub borders: Borders,
    pub tracker: QuickFind<VertexId>,
}

/// A fresh edge-less grid with every border closed and every cell in its own
/// region.
pub fn reset_maze(config: &GridConfig) -> Result<Maze, MazeError> {
    config.validate()?;
    let graph = Graph::grid(config.width, config.height, config.costs());
    let borders = Borders::new(config.bounds());
    let tracker = QuickFind::new(graph.vertices().map(|(id, _)| id));
    Ok(Maze {
        graph,
        borders,
        tracker,
    })
}

/// Maze generator owning its random source.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    /// Rejected draws tolerated before the shuffled-walls pass takes over.
    /// `None` allows 64 per cell.
    pub max_attempts: Option<usize>,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            max_attempts: None,
        }
    }

    /// Use the attempt cap from `config`.
    pub fn with_config(rng: R, config: &GridConfig) -> Self {
        Self {
            rng,
            max_attempts: Some(config.attempt_cap()),
        }
    }

    /// Generate into the state returned by [`reset_maze`].
    pub fn generate_maze(&mut self, maze: &mut Maze) -> Result<MazeStats, MazeError> {
        self.generate(&mut maze.graph, &mut maze.tracker, &mut maze.borders)
    }

    /// Carve a spanning tree into `graph`.
    ///
    /// `graph` must have no edges, `tracker` must hold exactly its vertices
    /// and every vertex must lie inside `borders`. Each connection adds both
    /// directed edges with weight 1 and opens the shared border in `borders`.
    ///
    /// On error nothing is left half-carved: the graph has no edges, every
    /// border is closed and the tracker holds singleton sets again.
    pub fn generate(
        &mut self,
        graph: &mut Graph,
        tracker: &mut QuickFind<VertexId>,
        borders: &mut Borders,
    ) -> Result<MazeStats, MazeError> {
        let edges = graph.edge_count();
        if edges > 0 {
            return Err(MazeError::NotEmpty { edges });
        }
        let ids: Vec<VertexId> = graph.vertices().map(|(id, _)| id).collect();
        if tracker.len() != ids.len() || !ids.iter().all(|id| tracker.contains(id)) {
            return Err(MazeError::TrackerMismatch {
                vertices: ids.len(),
                tracked: tracker.len(),
            });
        }
        let bounds = borders.bounds();
        if let Some((_, v)) = graph.vertices().find(|(_, v)| !bounds.contains(v.pos())) {
            return Err(MazeError::BordersMismatch { pos: v.pos() });
        }

        let result = self.carve(graph, tracker, borders, &ids);
        if result.is_err() {
            graph.clear_edges();
            borders.close_all();
            *tracker = QuickFind::new(ids.iter().copied());
        }
        result
    }

    fn carve(
        &mut self,
        graph: &mut Graph,
        tracker: &mut QuickFind<VertexId>,
        borders: &mut Borders,
        ids: &[VertexId],
    ) -> Result<MazeStats, MazeError> {
        let cap = self
            .max_attempts
            .unwrap_or_else(|| ids.len().saturating_mul(DEFAULT_ATTEMPTS_PER_CELL));
        let mut stats = MazeStats::default();

        let mut neighbours = Vec::with_capacity(4);
        while tracker.set_count() > 1 && stats.rejected < cap {
            let p = ids[self.rng.random_range(0..ids.len())];
            neighbours.clear();
            neighbours.extend(orthogonal_neighbours(graph, p));
            if neighbours.is_empty() {
                stats.rejected += 1;
                continue;
            }
            let q = neighbours[self.rng.random_range(0..neighbours.len())];
            if tracker.union(&p, &q) {
                connect(graph, borders, p, q)?;
                stats.connections += 1;
            } else {
                stats.rejected += 1;
            }
        }

        if tracker.set_count() > 1 {
            warn!(
                "maze: {} rejected draws with {} regions left, finishing with shuffled walls",
                stats.rejected,
                tracker.set_count()
            );
            stats.fallback = true;
            let mut walls = Vec::new();
            for &p in ids {
                for q in orthogonal_neighbours(graph, p) {
                    if p < q && !tracker.are_connected(&p, &q) {
                        walls.push((p, q));
                    }
                }
            }
            walls.shuffle(&mut self.rng);
            for (p, q) in walls {
                if tracker.union(&p, &q) {
                    connect(graph, borders, p, q)?;
                    stats.connections += 1;
                }
            }
        }

        let sets = tracker.set_count();
        if sets > 1 {
            return Err(MazeError::Disconnected { sets });
        }
        debug!(
            "maze: {} connections over {} cells, {} rejected, fallback {}",
            stats.connections,
            ids.len(),
            stats.rejected,
            stats.fallback
        );
        Ok(stats)
    }
}

/// Existing vertices above, left of, below and right of `id`.
fn orthogonal_neighbours(graph: &Graph, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
    let pos = graph.vertex(id).map(|v| v.pos());
    Point::CARDINALS
        .into_iter()
        .filter_map(move |d| pos?.checked_add(d).and_then(|p| graph.vertex_at(p)))
}

fn connect(
    graph: &mut Graph,
    borders: &mut Borders,
    p: VertexId,
    q: VertexId,
) -> Result<(), MazeError> {
    graph.add_edge(p, q, PASSAGE_WEIGHT)?;
    graph.add_edge(q, p, PASSAGE_WEIGHT)?;
    let positions = graph.positions(&[p, q]);
    if let [a, b] = positions[..] {
        if !borders.open_between(a, b) {
            return Err(MazeError::BordersMismatch { pos: b });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazepath_core::Range;
    use mazepath_paths::{Pathfinder, Vertex};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(seed: u64) -> MazeGen<StdRng> {
        MazeGen::new(StdRng::seed_from_u64(seed))
    }

    /// Every undirected edge must merge two regions, and one region remains.
    fn assert_spanning_tree(graph: &Graph) {
        let mut check = QuickFind::new(graph.vertices().map(|(id, _)| id));
        for (from, e) in graph.edges() {
            assert!(graph.get_edge(e.target(), from).is_some(), "one-way edge");
            assert_eq!(e.weight(), 1.0);
            if from < e.target() {
                assert!(check.union(&from, &e.target()), "cycle through {from}");
            }
        }
        assert_eq!(check.set_count(), 1);
    }

    fn assert_perfect(maze: &Maze, stats: MazeStats) {
        let n = maze.graph.len();
        assert_eq!(stats.connections, n - 1);
        assert_eq!(maze.graph.edge_count(), 2 * (n - 1));
        assert_eq!(maze.borders.open_count(), n - 1);
        assert_eq!(maze.tracker.set_count(), 1);
        assert_spanning_tree(&maze.graph);
        for (id, v) in maze.graph.vertices() {
            for e in v.edges() {
                let target = maze.graph.vertex(e.target()).unwrap().pos();
                assert!(v.pos().is_cardinal_neighbor(target), "{id} links diagonally");
                assert!(maze.borders.is_open_between(v.pos(), target));
            }
        }
    }

    #[test]
    fn generates_perfect_mazes() {
        for (seed, (w, h)) in [(1, (8, 8)), (2, (13, 5)), (3, (1, 9)), (4, (20, 17))] {
            let mut maze = reset_maze(&GridConfig::with_size(w, h)).unwrap();
            let stats = seeded(seed).generate_maze(&mut maze).unwrap();
            assert!(!stats.fallback);
            assert_perfect(&maze, stats);
        }
    }

    #[test]
    fn forced_fallback_still_spans() {
        let mut maze = reset_maze(&GridConfig::with_size(10, 7)).unwrap();
        let mut mg = seeded(7);
        mg.max_attempts = Some(0);
        let stats = mg.generate_maze(&mut maze).unwrap();
        assert!(stats.fallback);
        assert_eq!(stats.rejected, 0);
        assert_perfect(&maze, stats);
    }

    #[test]
    fn small_cap_mixes_both_phases() {
        let cfg = GridConfig {
            max_attempts: Some(5),
            ..GridConfig::with_size(12, 12)
        };
        let mut maze = reset_maze(&cfg).unwrap();
        let stats = MazeGen::with_config(StdRng::seed_from_u64(11), &cfg)
            .generate_maze(&mut maze)
            .unwrap();
        assert!(stats.rejected <= 5);
        assert_perfect(&maze, stats);
    }

    #[test]
    fn every_cell_reachable() {
        let mut maze = reset_maze(&GridConfig::with_size(9, 6)).unwrap();
        seeded(42).generate_maze(&mut maze).unwrap();
        let start = maze.graph.vertex_at(Point::new(0, 0));
        let mut pf = Pathfinder::new();
        for (id, _) in maze.graph.vertices() {
            let r = pf.dijkstra(&maze.graph, start, Some(id));
            assert!(r.is_found(), "{id} unreachable");
        }
    }

    #[test]
    fn single_cell_needs_nothing() {
        let mut maze = reset_maze(&GridConfig::with_size(1, 1)).unwrap();
        let stats = seeded(0).generate_maze(&mut maze).unwrap();
        assert_eq!(stats, MazeStats::default());
        assert_eq!(maze.graph.edge_count(), 0);
    }

    #[test]
    fn same_seed_same_maze() {
        let run = |seed| {
            let mut maze = reset_maze(&GridConfig::with_size(6, 6)).unwrap();
            seeded(seed).generate_maze(&mut maze).unwrap();
            maze.graph
                .edges()
                .map(|(a, e)| (a, e.target()))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn rejects_graph_with_edges() {
        let mut maze = reset_maze(&GridConfig::with_size(3, 3)).unwrap();
        seeded(1).generate_maze(&mut maze).unwrap();
        let err = seeded(2).generate_maze(&mut maze).unwrap_err();
        assert_eq!(err, MazeError::NotEmpty { edges: 16 });
    }

    #[test]
    fn rejects_foreign_tracker() {
        let mut maze = reset_maze(&GridConfig::with_size(3, 3)).unwrap();
        let other = reset_maze(&GridConfig::with_size(2, 2)).unwrap();
        maze.tracker = other.tracker;
        let err = seeded(3).generate_maze(&mut maze).unwrap_err();
        assert_eq!(
            err,
            MazeError::TrackerMismatch {
                vertices: 9,
                tracked: 4
            }
        );
    }

    #[test]
    fn rejects_borders_smaller_than_graph() {
        let mut maze = reset_maze(&GridConfig::with_size(3, 3)).unwrap();
        maze.borders = Borders::new(Range::grid(1, 1));
        let err = seeded(4).generate_maze(&mut maze).unwrap_err();
        assert_eq!(
            err,
            MazeError::BordersMismatch {
                pos: Point::new(1, 0)
            }
        );
        assert_eq!(maze.graph.edge_count(), 0);
        assert_eq!(maze.tracker.set_count(), 9);
    }

    #[test]
    fn cells_at_coordinate_limits() {
        let mut graph = Graph::default();
        for x in [i32::MAX - 1, i32::MAX] {
            graph
                .add_vertex(Vertex::new(Point::new(x, 0), Default::default()))
                .unwrap();
        }
        let mut tracker = QuickFind::new(graph.vertices().map(|(id, _)| id));
        let mut borders = Borders::new(Range::new(i32::MAX - 1, 0, i32::MAX, 1));
        // The half-open border range cannot reach x = i32::MAX.
        let err = seeded(6)
            .generate(&mut graph, &mut tracker, &mut borders)
            .unwrap_err();
        assert_eq!(
            err,
            MazeError::BordersMismatch {
                pos: Point::new(i32::MAX, 0)
            }
        );

        let mut graph = Graph::default();
        for x in [i32::MAX - 2, i32::MAX - 1] {
            graph
                .add_vertex(Vertex::new(Point::new(x, i32::MIN), Default::default()))
                .unwrap();
        }
        let mut tracker = QuickFind::new(graph.vertices().map(|(id, _)| id));
        let mut borders = Borders::new(Range::new(i32::MAX - 2, i32::MIN, i32::MAX, i32::MIN + 1));
        let stats = seeded(6)
            .generate(&mut graph, &mut tracker, &mut borders)
            .unwrap();
        assert_eq!(stats.connections, 1);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(borders.open_count(), 1);
    }

    #[test]
    fn split_grid_is_disconnected() {
        let mut graph = Graph::grid(3, 1, Default::default());
        let middle = graph.vertex_at(Point::new(1, 0)).unwrap();
        graph.remove_vertex(middle).unwrap();
        let mut tracker = QuickFind::new(graph.vertices().map(|(id, _)| id));
        let mut borders = Borders::new(Range::grid(3, 1));
        let mut mg = seeded(5);
        mg.max_attempts = Some(10);
        let err = mg
            .generate(&mut graph, &mut tracker, &mut borders)
            .unwrap_err();
        assert_eq!(err, MazeError::Disconnected { sets: 2 });
        assert_eq!(borders.open_count(), 0);
    }

    #[test]
    fn failed_run_is_rolled_back() {
        // Two 2x2 blocks joined only through the removed column.
        let mut graph = Graph::grid(5, 2, Default::default());
        for y in 0..2 {
            let id = graph.vertex_at(Point::new(2, y)).unwrap();
            graph.remove_vertex(id).unwrap();
        }
        let mut tracker = QuickFind::new(graph.vertices().map(|(id, _)| id));
        let mut borders = Borders::new(Range::grid(5, 2));
        let err = seeded(9)
            .generate(&mut graph, &mut tracker, &mut borders)
            .unwrap_err();
        assert_eq!(err, MazeError::Disconnected { sets: 2 });
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(borders.open_count(), 0);
        assert_eq!(tracker.set_count(), 8);

        // The same state is still usable once the gap is filled.
        for y in 0..2 {
            graph
                .add_vertex(Vertex::new(Point::new(2, y), Default::default()))
                .unwrap();
        }
        let mut tracker = QuickFind::new(graph.vertices().map(|(id, _)| id));
        let stats = seeded(9)
            .generate(&mut graph, &mut tracker, &mut borders)
            .unwrap();
        assert_eq!(stats.connections, 9);
        assert_eq!(borders.open_count(), 9);
    }

    #[test]
    fn bad_config() {
        let err = reset_maze(&GridConfig::with_size(0, 4)).unwrap_err();
        assert!(matches!(err, MazeError::Config(ConfigError::EmptyGrid { .. })));
        assert!(err.to_string().contains("0x4"));
    }
}
