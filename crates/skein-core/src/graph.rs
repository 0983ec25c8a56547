//! Undirected simple graph over ordered vertices.
//!
//! Vertices live in an ordered set. Edges are unordered pairs stored in
//! canonical orientation (lesser endpoint first) in a second ordered set, so
//! `(a, b)` and `(b, a)` are the same edge. An edge may only be inserted
//! between vertices that are already present.
//!
//! # Example
//!
//! ```rust
//! use skein_core::Graph;
//!
//! let mut g = Graph::new();
//! g.insert_vertex("a");
//! g.insert_vertex("b");
//!
//! let (edge, inserted) = g.insert_edge("b", "a").unwrap();
//! assert!(inserted);
//! assert_eq!((*edge.src(), *edge.dst()), ("a", "b"));
//!
//! let (_, inserted) = g.insert_edge("a", "b").unwrap();
//! assert!(!inserted);
//! assert_eq!(g.edge_count(), 1);
//! ```

use crate::render::Render;
use crate::{Error, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;
use std::ops::{Bound, RangeBounds};

/// An unordered vertex pair in canonical orientation: `src() <= dst()`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge<V> {
    src: V,
    dst: V,
}

impl<V: Ord> Edge<V> {
    /// Build the canonical edge between `a` and `b`, in either order.
    pub fn new(a: V, b: V) -> Self {
        if a <= b {
            Self { src: a, dst: b }
        } else {
            Self { src: b, dst: a }
        }
    }
}

impl<V> Edge<V> {
    /// The lesser endpoint.
    pub fn src(&self) -> &V {
        &self.src
    }

    /// The greater (or equal) endpoint.
    pub fn dst(&self) -> &V {
        &self.dst
    }

    /// Split into `(src, dst)`.
    pub fn into_pair(self) -> (V, V) {
        (self.src, self.dst)
    }
}

impl<V: PartialEq> Edge<V> {
    /// Whether `v` is one of the endpoints.
    pub fn is_incident(&self, v: &V) -> bool {
        self.src == *v || self.dst == *v
    }

    /// The endpoint opposite `v`, if `v` is an endpoint.
    pub fn other(&self, v: &V) -> Option<&V> {
        if self.src == *v {
            Some(&self.dst)
        } else if self.dst == *v {
            Some(&self.src)
        } else {
            None
        }
    }

    /// Whether both endpoints are the same vertex.
    pub fn is_loop(&self) -> bool {
        self.src == self.dst
    }
}

impl<V: Ord> From<(V, V)> for Edge<V> {
    fn from((a, b): (V, V)) -> Self {
        Self::new(a, b)
    }
}

impl<V: Render> Render for Edge<V> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.src.render(f)?;
        f.write_str(" -- ")?;
        self.dst.render(f)
    }
}

/// Statistics about a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of canonical edges.
    pub edge_count: usize,
    /// Average number of edge endpoints per vertex.
    pub avg_degree: f64,
}

impl GraphStats {
    pub(crate) fn new(vertex_count: usize, edge_count: usize) -> Self {
        let avg_degree = if vertex_count > 0 {
            2.0 * edge_count as f64 / vertex_count as f64
        } else {
            0.0
        };
        Self {
            vertex_count,
            edge_count,
            avg_degree,
        }
    }
}

/// The smallest canonical edge whose first endpoint is `v`.
///
/// Every edge with `src == v` has `dst >= v`, so `(v, v)` bounds them below.
pub(crate) fn first_edge_from<V: Clone>(v: &V) -> Edge<V> {
    Edge {
        src: v.clone(),
        dst: v.clone(),
    }
}

pub(crate) fn missing_endpoint<V: fmt::Debug>(endpoint: &V) -> Error {
    Error::ReferentialIntegrity {
        endpoint: format!("{endpoint:?}"),
    }
}

/// An undirected simple graph.
///
/// Copying a graph with `clone` duplicates both collections. Vertex handles
/// are expected to be cheap to clone (interned identities, small keys).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<V> {
    vertices: BTreeSet<V>,
    edges: BTreeSet<Edge<V>>,
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self {
            vertices: BTreeSet::new(),
            edges: BTreeSet::new(),
        }
    }
}

impl<V> Graph<V> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no vertices (and therefore no edges).
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.iter()
    }

    /// Iterate over canonical edges in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<V>> {
        self.edges.iter()
    }

    /// Remove every vertex. Edges cannot outlive their endpoints, so this
    /// clears the edges as well.
    pub fn clear_vertices(&mut self) {
        self.vertices.clear();
        self.clear_edges();
    }

    /// Remove every edge, keeping the vertices.
    pub fn clear_edges(&mut self) {
        self.edges.clear();
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.clear_vertices();
        self.clear_edges();
    }

    /// Compute statistics about the graph.
    pub fn stats(&self) -> GraphStats {
        GraphStats::new(self.vertex_count(), self.edge_count())
    }
}

impl<V: Ord + Clone + fmt::Debug> Graph<V> {
    /// Insert a vertex. Returns the stored handle and whether it was new.
    pub fn insert_vertex(&mut self, vertex: V) -> (V, bool) {
        if let Some(stored) = self.vertices.get(&vertex) {
            return (stored.clone(), false);
        }
        self.vertices.insert(vertex.clone());
        (vertex, true)
    }

    /// Insert the edge between `src` and `dst`, in either order.
    ///
    /// Fails with [`Error::ReferentialIntegrity`] if an endpoint is not a
    /// vertex; nothing is stored in that case.
    pub fn insert_edge(&mut self, src: V, dst: V) -> Result<(Edge<V>, bool)> {
        if src <= dst {
            self.insert_pair((src, dst))
        } else {
            self.insert_pair((dst, src))
        }
    }

    /// Insert an edge given as a pair. Orientation is re-derived from the
    /// endpoints, whatever order the pair arrives in.
    ///
    /// The returned edge is the stored one, built from the stored vertex
    /// handles rather than the caller's.
    pub fn insert_pair(&mut self, pair: (V, V)) -> Result<(Edge<V>, bool)> {
        let edge = Edge::from(pair);
        if let Some(stored) = self.edges.get(&edge) {
            return Ok((stored.clone(), false));
        }
        let src = self
            .vertices
            .get(&edge.src)
            .ok_or_else(|| missing_endpoint(&edge.src))?;
        let dst = self
            .vertices
            .get(&edge.dst)
            .ok_or_else(|| missing_endpoint(&edge.dst))?;
        let edge = Edge {
            src: src.clone(),
            dst: dst.clone(),
        };
        self.edges.insert(edge.clone());
        Ok((edge, true))
    }

    /// Remove a vertex and every edge incident to it.
    ///
    /// Returns the number of vertices removed (0 or 1).
    pub fn remove_vertex(&mut self, vertex: &V) -> usize {
        if !self.vertices.remove(vertex) {
            return 0;
        }
        self.remove_incident_edges(vertex);
        1
    }

    /// Remove the edge between `src` and `dst`, in either order.
    ///
    /// Returns the number of edges removed (0 or 1).
    pub fn remove_edge(&mut self, src: &V, dst: &V) -> usize {
        let edge = Edge::new(src.clone(), dst.clone());
        usize::from(self.edges.remove(&edge))
    }

    /// Drop every edge that has `vertex` as an endpoint.
    pub fn remove_incident_edges(&mut self, vertex: &V) {
        self.edges.retain(|edge| !edge.is_incident(vertex));
    }

    /// Whether `vertex` is in the graph.
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    /// Whether the edge between `a` and `b` is in the graph.
    pub fn contains_edge(&self, a: &V, b: &V) -> bool {
        self.edges.contains(&Edge::new(a.clone(), b.clone()))
    }

    /// Look up the stored vertex equal to `vertex`.
    pub fn find_vertex(&self, vertex: &V) -> Option<&V> {
        self.vertices.get(vertex)
    }

    /// Look up the stored edge between `a` and `b`.
    pub fn find_edge(&self, a: &V, b: &V) -> Option<&Edge<V>> {
        self.edges.get(&Edge::new(a.clone(), b.clone()))
    }

    /// Vertices within `range`, ascending.
    pub fn vertex_range<R: RangeBounds<V>>(&self, range: R) -> impl Iterator<Item = &V> {
        self.vertices.range(range)
    }

    /// Vertices not less than `vertex`, ascending.
    pub fn vertex_lower_bound(&self, vertex: &V) -> impl Iterator<Item = &V> {
        self.vertices
            .range((Bound::Included(vertex), Bound::Unbounded))
    }

    /// Vertices strictly greater than `vertex`, ascending.
    pub fn vertex_upper_bound(&self, vertex: &V) -> impl Iterator<Item = &V> {
        self.vertices
            .range((Bound::Excluded(vertex), Bound::Unbounded))
    }

    /// Edges within `range`, ascending.
    pub fn edge_range<R: RangeBounds<Edge<V>>>(&self, range: R) -> impl Iterator<Item = &Edge<V>> {
        self.edges.range(range)
    }

    /// Edges not less than `edge`, ascending.
    pub fn edge_lower_bound(&self, edge: &Edge<V>) -> impl Iterator<Item = &Edge<V>> {
        self.edges.range((Bound::Included(edge), Bound::Unbounded))
    }

    /// Edges strictly greater than `edge`, ascending.
    pub fn edge_upper_bound(&self, edge: &Edge<V>) -> impl Iterator<Item = &Edge<V>> {
        self.edges.range((Bound::Excluded(edge), Bound::Unbounded))
    }

    /// Edges whose canonical first endpoint is `vertex`. O(log E + d).
    pub fn edges_from<'a>(&'a self, vertex: &'a V) -> impl Iterator<Item = &'a Edge<V>> + 'a {
        self.edges
            .range(first_edge_from(vertex)..)
            .take_while(move |edge| edge.src == *vertex)
    }

    /// Every edge with `vertex` as an endpoint. O(E).
    pub fn incident_edges<'a>(&'a self, vertex: &'a V) -> impl Iterator<Item = &'a Edge<V>> + 'a {
        self.edges.iter().filter(move |edge| edge.is_incident(vertex))
    }

    /// Vertices adjacent to `vertex`. O(E).
    pub fn neighbors<'a>(&'a self, vertex: &'a V) -> impl Iterator<Item = &'a V> + 'a {
        self.edges.iter().filter_map(move |edge| edge.other(vertex))
    }

    /// Number of edges incident to `vertex`. A self-loop counts once. O(E).
    pub fn degree(&self, vertex: &V) -> usize {
        self.incident_edges(vertex).count()
    }

    /// Export to a petgraph undirected graph for algorithms.
    pub fn to_petgraph(&self) -> UnGraph<V, ()> {
        let mut graph = UnGraph::with_capacity(self.vertices.len(), self.edges.len());
        let index: BTreeMap<&V, NodeIndex> = self
            .vertices
            .iter()
            .map(|v| (v, graph.add_node(v.clone())))
            .collect();
        for edge in &self.edges {
            if let (Some(&a), Some(&b)) = (index.get(&edge.src), index.get(&edge.dst)) {
                graph.add_edge(a, b, ());
            }
        }
        graph
    }
}

impl<V: Render + PartialEq> Graph<V> {
    /// Write the human-readable dump.
    ///
    /// One line per vertex in ascending order; beneath it, one indented line
    /// per edge for which it is the lesser endpoint, naming the other end.
    pub fn write_dump<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{self}")
    }
}

impl<V: Render + PartialEq> fmt::Display for Graph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut edges = self.edges.iter().peekable();
        for vertex in &self.vertices {
            writeln!(f, "{}", vertex.rendered())?;
            while let Some(edge) = edges.next_if(|edge| edge.src == *vertex) {
                writeln!(f, "  {}", edge.dst.rendered())?;
            }
        }
        Ok(())
    }
}
