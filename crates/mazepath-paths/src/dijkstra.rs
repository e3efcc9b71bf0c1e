use log::debug;

use crate::graph::{Graph, VertexId};
use crate::pathfinder::{Pathfinder, SearchResult};

impl Pathfinder {
    /// Uniform-cost shortest path from `start` to `end`.
    ///
    /// Edges into impassable terrain are ignored; every other edge costs its
    /// weight plus the terrain penalty of the cell it enters. The search stops
    /// as soon as `end` is finalized.
    pub fn dijkstra(
        &mut self,
        graph: &Graph,
        start: Option<VertexId>,
        end: Option<VertexId>,
    ) -> SearchResult {
        debug!("dijkstra: {start:?} -> {end:?}");
        let result = self.search(graph, start, end, |_| 0.0);
        debug!(
            "dijkstra: {:?}, {} visited, path of {}",
            result.status,
            result.visited.len(),
            result.path.len()
        );
        result
    }
}
