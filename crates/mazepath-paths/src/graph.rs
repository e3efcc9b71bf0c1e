//! Weighted directed graph over grid cells.
//!
//! Vertices live in an arena and are addressed by [`VertexId`]. Each vertex
//! owns its outgoing [`Edge`]s; an edge only names its target. Removing a
//! vertex leaves an empty slot behind, so ids handed out earlier never alias
//! a different vertex.

use std::collections::HashMap;
use std::fmt;

use mazepath_core::{Moves, Point, Range, Terrain, TerrainCosts};

/// Handle to a vertex of a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    /// Position of the vertex in the graph's arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A directed, weighted connection to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    target: VertexId,
    weight: f64,
}

impl Edge {
    /// The vertex this edge leads to.
    #[inline]
    pub fn target(&self) -> VertexId {
        self.target
    }

    /// Baseline distance, before any terrain penalty.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// One grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pos: Point,
    terrain: Terrain,
    edges: Vec<Edge>,
}

impl Vertex {
    /// A fresh vertex with no edges.
    pub fn new(pos: Point, terrain: Terrain) -> Self {
        Self {
            pos,
            terrain,
            edges: Vec::new(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Outgoing edges, in insertion order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Errors reported by graph mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A vertex already occupies this position.
    DuplicateVertex(Point),
    /// Only vertices without edges may be inserted.
    VertexHasEdges(Point),
    /// The id does not name a vertex of this graph.
    NotMember(VertexId),
    /// No vertex sits at this position.
    NoVertexAt(Point),
    /// The edge already exists.
    DuplicateEdge(VertexId, VertexId),
    /// The edge does not exist.
    MissingEdge(VertexId, VertexId),
    /// Edge weights must be finite and non-negative.
    InvalidWeight(VertexId, VertexId, f64),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateVertex(p) => write!(f, "a vertex already exists at {p}"),
            Self::VertexHasEdges(p) => {
                write!(f, "vertex at {p} already has outgoing edges")
            }
            Self::NotMember(id) => write!(f, "vertex {id} is not in the graph"),
            Self::NoVertexAt(p) => write!(f, "no vertex at {p}"),
            Self::DuplicateEdge(a, b) => write!(f, "edge {a} -> {b} already exists"),
            Self::MissingEdge(a, b) => write!(f, "edge {a} -> {b} does not exist"),
            Self::InvalidWeight(a, b, w) => {
                write!(f, "edge {a} -> {b} has invalid weight {w}")
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// A directed graph of grid cells with terrain-dependent costs.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    slots: Vec<Option<Vertex>>,
    by_pos: HashMap<Point, VertexId>,
    costs: TerrainCosts,
}

impl Graph {
    /// An empty graph using the given terrain costs.
    pub fn new(costs: TerrainCosts) -> Self {
        Self {
            slots: Vec::new(),
            by_pos: HashMap::new(),
            costs,
        }
    }

    /// One [`Terrain::Space`] vertex per cell of a `width × height` grid, in
    /// row-major order, with no edges.
    pub fn grid(width: i32, height: i32, costs: TerrainCosts) -> Self {
        let bounds = Range::grid(width, height);
        let mut g = Self::new(costs);
        g.slots.reserve(bounds.len());
        g.by_pos.reserve(bounds.len());
        for p in bounds {
            let id = VertexId(g.slots.len());
            g.slots.push(Some(Vertex::new(p, Terrain::Space)));
            g.by_pos.insert(p, id);
        }
        g
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Insert a freshly constructed vertex.
    pub fn add_vertex(&mut self, v: Vertex) -> Result<VertexId, GraphError> {
        if !v.edges.is_empty() {
            return Err(GraphError::VertexHasEdges(v.pos));
        }
        if self.by_pos.contains_key(&v.pos) {
            return Err(GraphError::DuplicateVertex(v.pos));
        }
        let id = VertexId(self.slots.len());
        self.by_pos.insert(v.pos, id);
        self.slots.push(Some(v));
        Ok(id)
    }

    /// Remove a vertex and every edge elsewhere in the graph that targets it.
    ///
    /// The removed vertex is returned with its own outgoing edges intact.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex, GraphError> {
        let v = self
            .slots
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(GraphError::NotMember(id))?;
        self.by_pos.remove(&v.pos);
        for other in self.slots.iter_mut().flatten() {
            other.edges.retain(|e| e.target != id);
        }
        Ok(v)
    }

    /// Add the directed edge `a -> b`.
    ///
    /// `weight` must be finite and non-negative.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, weight: f64) -> Result<(), GraphError> {
        if !self.contains(b) {
            return Err(GraphError::NotMember(b));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight(a, b, weight));
        }
        let src = self.vertex_mut(a)?;
        if src.edges.iter().any(|e| e.target == b) {
            return Err(GraphError::DuplicateEdge(a, b));
        }
        src.edges.push(Edge { target: b, weight });
        Ok(())
    }

    /// Remove the directed edge `a -> b`, returning it.
    pub fn remove_edge(&mut self, a: VertexId, b: VertexId) -> Result<Edge, GraphError> {
        let src = self
            .slots
            .get_mut(a.0)
            .and_then(Option::as_mut)
            .ok_or(GraphError::MissingEdge(a, b))?;
        let i = src
            .edges
            .iter()
            .position(|e| e.target == b)
            .ok_or(GraphError::MissingEdge(a, b))?;
        Ok(src.edges.remove(i))
    }

    /// Change the terrain of the cell at `p`.
    ///
    /// Searches read terrain when relaxing edges, so the edit is picked up by
    /// the next search without touching any edge.
    pub fn set_terrain(&mut self, p: Point, terrain: Terrain) -> Result<Terrain, GraphError> {
        let id = self.vertex_at(p).ok_or(GraphError::NoVertexAt(p))?;
        let v = self.vertex_mut(id)?;
        Ok(std::mem::replace(&mut v.terrain, terrain))
    }

    /// Link every vertex to its existing grid neighbours in both directions.
    ///
    /// Orthogonal neighbours get weight `cardinal`; with [`Moves::Eight`]
    /// diagonal neighbours get weight `ordinal`. Edges that already exist are
    /// left alone. Returns the number of edges added.
    pub fn connect_grid(&mut self, moves: Moves, cardinal: f64, ordinal: f64) -> usize {
        let mut links = Vec::new();
        for (id, v) in self.vertices() {
            let mut push = |d: Point, w: f64| {
                if let Some(n) = v.pos.checked_add(d).and_then(|p| self.vertex_at(p)) {
                    links.push((id, n, w));
                }
            };
            for d in Point::CARDINALS {
                push(d, cardinal);
            }
            if moves == Moves::Eight {
                for d in Point::DIAGONALS {
                    push(d, ordinal);
                }
            }
        }
        let mut added = 0;
        for (a, b, w) in links {
            if self.add_edge(a, b, w).is_ok() {
                added += 1;
            }
        }
        added
    }

    /// Drop every edge, keeping the vertices.
    pub fn clear_edges(&mut self) {
        for v in self.slots.iter_mut().flatten() {
            v.edges.clear();
        }
    }

    /// Replace the terrain cost table.
    pub fn set_costs(&mut self, costs: TerrainCosts) {
        self.costs = costs;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Find the edge `a -> b` by scanning `a`'s edge list.
    pub fn get_edge(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        if !self.contains(b) {
            return None;
        }
        self.vertex(a)?.edges.iter().find(|e| e.target == b)
    }

    #[inline]
    pub fn contains(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// The vertex at grid position `p`, if any.
    #[inline]
    pub fn vertex_at(&self, p: Point) -> Option<VertexId> {
        self.by_pos.get(&p).copied()
    }

    /// Every vertex, ordered by id.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (VertexId(i), v)))
    }

    /// Every edge, paired with its source, grouped by source id.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, &Edge)> + '_ {
        self.vertices()
            .flat_map(|(id, v)| v.edges.iter().map(move |e| (id, e)))
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.by_pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pos.is_empty()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.slots.iter().flatten().map(|v| v.edges.len()).sum()
    }

    #[inline]
    pub fn costs(&self) -> TerrainCosts {
        self.costs
    }

    /// Map vertex ids to their grid positions, skipping stale ids.
    pub fn positions(&self, ids: &[VertexId]) -> Vec<Point> {
        ids.iter()
            .filter_map(|&id| self.vertex(id).map(Vertex::pos))
            .collect()
    }

    /// Size of the id space, including slots of removed vertices.
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex, GraphError> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(GraphError::NotMember(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_vertices() -> (Graph, VertexId, VertexId) {
        let mut g = Graph::default();
        let a = g.add_vertex(Vertex::new(Point::new(0, 0), Terrain::Space)).unwrap();
        let b = g.add_vertex(Vertex::new(Point::new(1, 0), Terrain::Space)).unwrap();
        (g, a, b)
    }

    #[test]
    fn add_vertex_rejects_duplicate_position() {
        let (mut g, _, _) = two_vertices();
        let err = g
            .add_vertex(Vertex::new(Point::new(1, 0), Terrain::Sand))
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateVertex(Point::new(1, 0)));
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn add_edge_and_get_edge() {
        let (mut g, a, b) = two_vertices();
        assert!(g.add_edge(a, b, 2.5).is_ok());
        assert_eq!(g.get_edge(a, b).map(Edge::weight), Some(2.5));
        // Edges are one-way.
        assert!(g.get_edge(b, a).is_none());
        assert_eq!(g.add_edge(a, b, 1.0), Err(GraphError::DuplicateEdge(a, b)));
        assert!(g.add_edge(b, a, 1.0).is_ok());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn add_edge_requires_members() {
        let (mut g, a, _) = two_vertices();
        let ghost = VertexId(42);
        assert_eq!(g.add_edge(a, ghost, 1.0), Err(GraphError::NotMember(ghost)));
        assert_eq!(g.add_edge(ghost, a, 1.0), Err(GraphError::NotMember(ghost)));
        assert!(g.get_edge(a, ghost).is_none());
    }

    #[test]
    fn add_edge_rejects_bad_weights() {
        let (mut g, a, b) = two_vertices();
        assert_eq!(g.add_edge(a, b, -1.0), Err(GraphError::InvalidWeight(a, b, -1.0)));
        assert_eq!(
            g.add_edge(a, b, f64::INFINITY),
            Err(GraphError::InvalidWeight(a, b, f64::INFINITY))
        );
        assert!(matches!(
            g.add_edge(a, b, f64::NAN),
            Err(GraphError::InvalidWeight(_, _, w)) if w.is_nan()
        ));
        assert_eq!(g.edge_count(), 0);
        assert!(g.add_edge(a, b, 0.0).is_ok());
    }

    #[test]
    fn connect_grid_at_extreme_coordinates() {
        let mut g = Graph::default();
        let far = g
            .add_vertex(Vertex::new(Point::new(i32::MAX, i32::MIN), Terrain::Space))
            .unwrap();
        let left = g
            .add_vertex(Vertex::new(Point::new(i32::MAX - 1, i32::MIN), Terrain::Space))
            .unwrap();
        assert_eq!(g.connect_grid(Moves::Eight, 1.0, 1.5), 2);
        assert!(g.get_edge(far, left).is_some());
        assert!(g.get_edge(left, far).is_some());
    }

    #[test]
    fn remove_edge() {
        let (mut g, a, b) = two_vertices();
        assert_eq!(g.remove_edge(a, b), Err(GraphError::MissingEdge(a, b)));
        g.add_edge(a, b, 1.0).unwrap();
        let e = g.remove_edge(a, b).unwrap();
        assert_eq!(e.target(), b);
        assert!(g.get_edge(a, b).is_none());
    }

    #[test]
    fn remove_vertex_strips_incoming_edges() {
        let mut g = Graph::grid(3, 1, TerrainCosts::default());
        let ids: Vec<_> = g.vertices().map(|(id, _)| id).collect();
        let (a, b, c) = (ids[0], ids[1], ids[2]);
        g.add_edge(a, b, 1.0).unwrap();
        g.add_edge(c, b, 1.0).unwrap();
        g.add_edge(b, a, 1.0).unwrap();

        let removed = g.remove_vertex(b).unwrap();
        assert_eq!(removed.pos(), Point::new(1, 0));
        assert_eq!(g.len(), 2);
        assert_eq!(g.edge_count(), 0);
        assert!(g.vertex_at(Point::new(1, 0)).is_none());
        assert_eq!(g.remove_vertex(b).unwrap_err(), GraphError::NotMember(b));

        // The returned vertex still carries its edge, so it cannot go back in.
        assert_eq!(
            g.add_vertex(removed).unwrap_err(),
            GraphError::VertexHasEdges(Point::new(1, 0))
        );
        // A fresh vertex at the same place can, under a new id.
        let b2 = g.add_vertex(Vertex::new(Point::new(1, 0), Terrain::Space)).unwrap();
        assert_ne!(b2, b);
        assert!(!g.contains(b));
    }

    #[test]
    fn grid_layout() {
        let g = Graph::grid(4, 3, TerrainCosts::default());
        assert_eq!(g.len(), 12);
        assert_eq!(g.edge_count(), 0);
        let id = g.vertex_at(Point::new(2, 1)).unwrap();
        assert_eq!(id.index(), 6);
        assert_eq!(g.vertex(id).unwrap().pos(), Point::new(2, 1));
        assert!(g.vertex_at(Point::new(4, 0)).is_none());
    }

    #[test]
    fn connect_grid_four_and_eight() {
        let mut g = Graph::grid(3, 3, TerrainCosts::default());
        // 12 undirected orthogonal links.
        assert_eq!(g.connect_grid(Moves::Four, 1.0, 1.5), 24);
        // Second call adds nothing new for the orthogonal links but the
        // 8 undirected diagonal links are new.
        assert_eq!(g.connect_grid(Moves::Eight, 1.0, 1.5), 16);
        let a = g.vertex_at(Point::new(0, 0)).unwrap();
        let d = g.vertex_at(Point::new(1, 1)).unwrap();
        assert_eq!(g.get_edge(a, d).map(Edge::weight), Some(1.5));
        assert_eq!(g.vertex(d).unwrap().edges().len(), 8);
    }

    #[test]
    fn set_terrain_in_place() {
        let mut g = Graph::grid(2, 2, TerrainCosts::default());
        let p = Point::new(1, 1);
        assert_eq!(g.set_terrain(p, Terrain::Wall), Ok(Terrain::Space));
        let id = g.vertex_at(p).unwrap();
        assert_eq!(g.vertex(id).unwrap().terrain(), Terrain::Wall);
        assert_eq!(
            g.set_terrain(Point::new(5, 5), Terrain::Sand),
            Err(GraphError::NoVertexAt(Point::new(5, 5)))
        );
    }

    #[test]
    fn edges_view_is_flattened() {
        let mut g = Graph::grid(2, 1, TerrainCosts::default());
        g.connect_grid(Moves::Four, 1.0, 1.0);
        let edges: Vec<_> = g.edges().map(|(src, e)| (src.index(), e.target().index())).collect();
        assert_eq!(edges, vec![(0, 1), (1, 0)]);
        g.clear_edges();
        assert_eq!(g.edges().count(), 0);
        assert_eq!(g.len(), 2);
    }
}
