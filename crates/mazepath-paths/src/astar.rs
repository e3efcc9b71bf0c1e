use log::debug;

use crate::distance::Heuristic;
use crate::graph::{Graph, VertexId};
use crate::pathfinder::{Pathfinder, SearchResult};

impl Pathfinder {
    /// Compute the shortest path from `start` to `end` using A*.
    ///
    /// The queue is keyed by cost so far plus `heuristic`'s estimate to
    /// `end`, computed with `cardinal` as the orthogonal step cost and the
    /// heuristic's own ordinal constant. The result is optimal only when the
    /// estimate never overestimates; that is not checked.
    pub fn astar(
        &mut self,
        graph: &Graph,
        start: Option<VertexId>,
        end: Option<VertexId>,
        cardinal: f64,
        heuristic: Heuristic,
    ) -> SearchResult {
        debug!(
            "astar ({}): {start:?} -> {end:?}",
            heuristic.label(cardinal)
        );
        let Some(goal) = end.and_then(|id| graph.vertex(id)).map(|v| v.pos()) else {
            return self.search(graph, start, None, |_| 0.0);
        };
        let result = self.search(graph, start, end, |p| {
            heuristic.estimate(p, goal, cardinal)
        });
        debug!(
            "astar: {:?}, {} visited, path of {}",
            result.status,
            result.visited.len(),
            result.path.len()
        );
        result
    }
}
