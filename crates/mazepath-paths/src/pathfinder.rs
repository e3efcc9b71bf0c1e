use log::trace;
use mazepath_core::Point;

use crate::graph::{Graph, VertexId};
use crate::heap::MinHeap;

/// Outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// The end was reached at the given total cost.
    Found { cost: f64 },
    /// The end cannot be reached from the start.
    Unreachable,
    /// Start or end was not given, or is not a vertex of the graph.
    Unset,
}

/// Path and exploration order produced by one search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Vertices from start to end inclusive. Holds only the start when the
    /// end is unreachable, and is empty when the search was [`SearchStatus::Unset`].
    pub path: Vec<VertexId>,
    /// Vertices in the order they were finalized.
    pub visited: Vec<VertexId>,
    pub status: SearchStatus,
}

impl SearchResult {
    fn unset() -> Self {
        Self {
            path: Vec::new(),
            visited: Vec::new(),
            status: SearchStatus::Unset,
        }
    }

    /// Total path cost, if the end was reached.
    pub fn cost(&self) -> Option<f64> {
        match self.status {
            SearchStatus::Found { cost } => Some(cost),
            _ => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self.status, SearchStatus::Found { .. })
    }

    /// Grid positions along the path.
    pub fn path_points(&self, graph: &Graph) -> Vec<Point> {
        graph.positions(&self.path)
    }

    /// Grid positions in visitation order.
    pub fn visited_points(&self, graph: &Graph) -> Vec<Point> {
        graph.positions(&self.visited)
    }
}

// ---------------------------------------------------------------------------
// Per-search scratch state
// ---------------------------------------------------------------------------

/// Scratch record for one vertex, reset at the start of every search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Node {
    /// Best known cost from the start.
    pub(crate) dist: f64,
    /// `dist` plus the heuristic estimate; the queue key.
    pub(crate) fdist: f64,
    pub(crate) parent: Option<usize>,
    pub(crate) visited: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            dist: f64::INFINITY,
            fdist: f64::INFINITY,
            parent: None,
            visited: false,
        }
    }
}

/// Queue entry: a vertex index with the key it was queued under.
///
/// Ordered by key, then by index. Equality covers both fields, so a vertex
/// queued under an older key does not count as queued under its new one.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub(crate) struct QueueEntry {
    pub(crate) key: f64,
    pub(crate) idx: usize,
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Runs shortest-path searches over a [`Graph`].
///
/// `Pathfinder` owns the per-vertex scratch table and the open queue, so
/// repeated searches reuse their allocations. The graph itself is only read:
/// several pathfinders can search the same graph independently.
#[derive(Debug, Default)]
pub struct Pathfinder {
    pub(crate) nodes: Vec<Node>,
    pub(crate) open: MinHeap<QueueEntry>,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every scratch record and size the table for `graph`.
    fn reset(&mut self, graph: &Graph) {
        self.nodes.clear();
        self.nodes.resize(graph.slot_count(), Node::default());
        self.open.clear();
    }

    /// Label-correcting best-first search keyed by `dist + estimate(target)`.
    ///
    /// Shared by [`dijkstra`](Self::dijkstra) (zero estimate) and
    /// [`astar`](Self::astar).
    pub(crate) fn search(
        &mut self,
        graph: &Graph,
        start: Option<VertexId>,
        end: Option<VertexId>,
        estimate: impl Fn(Point) -> f64,
    ) -> SearchResult {
        let (Some(start), Some(end)) = (start, end) else {
            return SearchResult::unset();
        };
        let Some(start_vertex) = graph.vertex(start) else {
            return SearchResult::unset();
        };
        if !graph.contains(end) {
            return SearchResult::unset();
        }

        self.reset(graph);
        let costs = graph.costs();
        let (si, ei) = (start.index(), end.index());

        let key = estimate(start_vertex.pos());
        self.nodes[si].dist = 0.0;
        self.nodes[si].fdist = key;
        self.open.insert(QueueEntry { key, idx: si });

        let mut visited = Vec::new();

        while !self.nodes[ei].visited {
            let Some(entry) = self.open.try_pop() else {
                break;
            };
            let ci = entry.idx;
            let current = self.nodes[ci];
            // Skip stale keys and already-finalized vertices.
            if current.visited || entry.key > current.fdist {
                continue;
            }
            self.nodes[ci].visited = true;
            visited.push(VertexId(ci));

            let Some(vertex) = graph.vertex(VertexId(ci)) else {
                continue;
            };
            trace!("expand {} at {} (dist {})", ci, vertex.pos(), current.dist);

            for edge in vertex.edges() {
                let Some(target) = graph.vertex(edge.target()) else {
                    continue;
                };
                if !target.terrain().is_passable() {
                    continue;
                }
                let tentative = current.dist + edge.weight() + costs.modifier(target.terrain());
                let ti = edge.target().index();
                let n = &mut self.nodes[ti];
                if tentative < n.dist {
                    n.dist = tentative;
                    n.fdist = tentative + estimate(target.pos());
                    n.parent = Some(ci);
                    n.visited = false;
                }
                if !n.visited {
                    let entry = QueueEntry {
                        key: n.fdist,
                        idx: ti,
                    };
                    if !self.open.contains(&entry) {
                        self.open.insert(entry);
                    }
                }
            }
        }

        let (path, status) = self.trace_path(si, ei);
        SearchResult {
            path,
            visited,
            status,
        }
    }

    /// Follow predecessor links back from `ei` to `si`.
    ///
    /// A broken chain yields the single-vertex path `[start]` together with
    /// [`SearchStatus::Unreachable`].
    fn trace_path(&self, si: usize, ei: usize) -> (Vec<VertexId>, SearchStatus) {
        let mut path = vec![VertexId(ei)];
        let mut ci = ei;
        while ci != si {
            // A chain longer than the table means a predecessor cycle.
            let next = match self.nodes[ci].parent {
                Some(p) if path.len() <= self.nodes.len() => p,
                _ => return (vec![VertexId(si)], SearchStatus::Unreachable),
            };
            path.push(VertexId(next));
            ci = next;
        }
        path.reverse();
        let cost = self.nodes[ei].dist;
        (path, SearchStatus::Found { cost })
    }

    /// Best known cost from the last search's start to `id`.
    ///
    /// Returns `f64::INFINITY` for vertices the last search never reached.
    pub fn dist(&self, id: VertexId) -> f64 {
        self.nodes
            .get(id.index())
            .map_or(f64::INFINITY, |n| n.dist)
    }
}
