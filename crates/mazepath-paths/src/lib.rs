//! Weighted grid graph and shortest-path search.
//!
//! - [`Graph`]: an arena of grid-cell vertices, each owning its directed,
//!   weighted outgoing edges, plus a terrain cost table.
//! - [`MinHeap`]: the binary min-heap used as the open queue.
//! - [`Pathfinder`]: uniform-cost search ([`Pathfinder::dijkstra`]) and
//!   heuristic-guided search ([`Pathfinder::astar`]).
//! - [`Heuristic`]: Manhattan, diagonal (octile / Chebyshev) and Euclidean
//!   estimates for A*.
//!
//! Search scratch state lives in the [`Pathfinder`], not in the graph, so
//! repeated queries reuse their buffers and a shared `&Graph` can be searched
//! by more than one pathfinder.
//!
//! ```
//! use mazepath_core::{Moves, Point, TerrainCosts};
//! use mazepath_paths::{Graph, Heuristic, Pathfinder};
//!
//! let mut g = Graph::grid(3, 3, TerrainCosts::default());
//! g.connect_grid(Moves::Four, 1.0, 1.0);
//! let start = g.vertex_at(Point::new(0, 0));
//! let end = g.vertex_at(Point::new(2, 2));
//!
//! let mut pf = Pathfinder::new();
//! let r = pf.astar(&g, start, end, 1.0, Heuristic::manhattan());
//! assert_eq!(r.cost(), Some(4.0));
//! assert_eq!(r.path.len(), 5);
//! ```

mod astar;
mod dijkstra;
mod distance;
mod graph;
mod heap;
mod pathfinder;

pub use distance::{Heuristic, HeuristicKind, UnknownHeuristic, diagonal, euclidean, manhattan};
pub use graph::{Edge, Graph, GraphError, Vertex, VertexId};
pub use heap::MinHeap;
pub use pathfinder::{Pathfinder, SearchResult, SearchStatus};
