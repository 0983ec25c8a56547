//! Graph variant whose vertices and edges carry labels.
//!
//! [`LabeledGraph`] keeps the same canonical-edge and referential-integrity
//! rules as [`Graph`](crate::Graph), but stores its vertices and edges as
//! ordered maps to a payload. Labels are first-write-wins: inserting a key
//! that already exists leaves its label untouched.
//!
//! # Example
//!
//! ```rust
//! use skein_core::LabeledGraph;
//!
//! let mut g: LabeledGraph<u32, &str> = LabeledGraph::new();
//! g.insert_vertex(1, "one");
//! g.insert_vertex(2, "two");
//! assert_eq!(g.insert_vertex(1, "uno"), (&"one", false));
//!
//! // Without an explicit label the edge takes its destination's label.
//! let (label, inserted) = g.insert_edge(1, 2).unwrap();
//! assert_eq!((*label, inserted), ("two", true));
//! assert_eq!(g.to_string(), "one\n  two\ntwo\n");
//! ```

use crate::graph::{first_edge_from, missing_endpoint, Edge, GraphStats};
use crate::render::Render;
use crate::Result;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::ops::{Bound, RangeBounds};

/// An undirected simple graph with a label of type `L` on every vertex and
/// a label of type `E` on every edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledGraph<V, L, E = L> {
    vertices: BTreeMap<V, L>,
    edges: BTreeMap<Edge<V>, E>,
}

impl<V, L, E> Default for LabeledGraph<V, L, E> {
    fn default() -> Self {
        Self {
            vertices: BTreeMap::new(),
            edges: BTreeMap::new(),
        }
    }
}

impl<V, L, E> LabeledGraph<V, L, E> {
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

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices and their labels, ascending by vertex.
    pub fn vertices(&self) -> impl Iterator<Item = (&V, &L)> {
        self.vertices.iter()
    }

    /// Canonical edges and their labels, ascending by edge.
    pub fn edges(&self) -> impl Iterator<Item = (&Edge<V>, &E)> {
        self.edges.iter()
    }

    /// Remove every vertex and, with them, every edge.
    pub fn clear_vertices(&mut self) {
        self.vertices.clear();
        self.clear_edges();
    }

    /// Remove every edge.
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

impl<V: Ord + Clone + fmt::Debug, L, E> LabeledGraph<V, L, E> {
    /// Insert a vertex with `label`.
    ///
    /// If the vertex already exists its stored label wins and `label` is
    /// dropped. Returns the stored label and whether the vertex was new.
    pub fn insert_vertex(&mut self, vertex: V, label: L) -> (&L, bool) {
        match self.vertices.entry(vertex) {
            Entry::Occupied(entry) => (&*entry.into_mut(), false),
            Entry::Vacant(entry) => (&*entry.insert(label), true),
        }
    }

    /// Insert the edge between `src` and `dst` carrying `label`.
    ///
    /// Both endpoints must already be vertices. An existing edge keeps its
    /// label. Returns the stored label and whether the edge was new.
    pub fn insert_labeled_edge(&mut self, src: V, dst: V, label: E) -> Result<(&E, bool)> {
        let edge = self.stored_edge(&Edge::new(src, dst))?;
        Ok(match self.edges.entry(edge) {
            Entry::Occupied(entry) => (&*entry.into_mut(), false),
            Entry::Vacant(entry) => (&*entry.insert(label), true),
        })
    }

    /// Rebuild `edge` from the stored vertex keys.
    fn stored_edge(&self, edge: &Edge<V>) -> Result<Edge<V>> {
        let (src, _) = self
            .vertices
            .get_key_value(edge.src())
            .ok_or_else(|| missing_endpoint(edge.src()))?;
        let (dst, _) = self
            .vertices
            .get_key_value(edge.dst())
            .ok_or_else(|| missing_endpoint(edge.dst()))?;
        Ok(Edge::new(src.clone(), dst.clone()))
    }

    /// Remove a vertex and every incident edge. Returns 0 or 1.
    pub fn remove_vertex(&mut self, vertex: &V) -> usize {
        if self.vertices.remove(vertex).is_none() {
            return 0;
        }
        self.remove_incident_edges(vertex);
        1
    }

    /// Remove the edge between `src` and `dst`, in either order. Returns 0 or 1.
    pub fn remove_edge(&mut self, src: &V, dst: &V) -> usize {
        let edge = Edge::new(src.clone(), dst.clone());
        usize::from(self.edges.remove(&edge).is_some())
    }

    /// Drop every edge that has `vertex` as an endpoint.
    pub fn remove_incident_edges(&mut self, vertex: &V) {
        self.edges.retain(|edge, _| !edge.is_incident(vertex));
    }

    /// Whether `vertex` is in the graph.
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains_key(vertex)
    }

    /// Whether the edge between `a` and `b` is in the graph.
    pub fn contains_edge(&self, a: &V, b: &V) -> bool {
        self.edges.contains_key(&Edge::new(a.clone(), b.clone()))
    }

    /// Label stored for `vertex`.
    pub fn vertex_label(&self, vertex: &V) -> Option<&L> {
        self.vertices.get(vertex)
    }

    /// Label stored for the edge between `a` and `b`.
    pub fn edge_label(&self, a: &V, b: &V) -> Option<&E> {
        self.edges.get(&Edge::new(a.clone(), b.clone()))
    }

    /// Vertices within `range`, ascending.
    pub fn vertex_range<R: RangeBounds<V>>(&self, range: R) -> impl Iterator<Item = (&V, &L)> {
        self.vertices.range(range)
    }

    /// Vertices not less than `vertex`.
    pub fn vertex_lower_bound(&self, vertex: &V) -> impl Iterator<Item = (&V, &L)> {
        self.vertices
            .range((Bound::Included(vertex), Bound::Unbounded))
    }

    /// Vertices strictly greater than `vertex`.
    pub fn vertex_upper_bound(&self, vertex: &V) -> impl Iterator<Item = (&V, &L)> {
        self.vertices
            .range((Bound::Excluded(vertex), Bound::Unbounded))
    }

    /// Edges within `range`, ascending.
    pub fn edge_range<R: RangeBounds<Edge<V>>>(
        &self,
        range: R,
    ) -> impl Iterator<Item = (&Edge<V>, &E)> {
        self.edges.range(range)
    }

    /// Edges not less than `edge`.
    pub fn edge_lower_bound(&self, edge: &Edge<V>) -> impl Iterator<Item = (&Edge<V>, &E)> {
        self.edges.range((Bound::Included(edge), Bound::Unbounded))
    }

    /// Edges strictly greater than `edge`.
    pub fn edge_upper_bound(&self, edge: &Edge<V>) -> impl Iterator<Item = (&Edge<V>, &E)> {
        self.edges.range((Bound::Excluded(edge), Bound::Unbounded))
    }

    /// Edges whose canonical first endpoint is `vertex`.
    pub fn edges_from<'a>(
        &'a self,
        vertex: &'a V,
    ) -> impl Iterator<Item = (&'a Edge<V>, &'a E)> + 'a {
        self.edges
            .range(first_edge_from(vertex)..)
            .take_while(move |(edge, _)| edge.src() == vertex)
    }

    /// Every edge with `vertex` as an endpoint. O(E).
    pub fn incident_edges<'a>(
        &'a self,
        vertex: &'a V,
    ) -> impl Iterator<Item = (&'a Edge<V>, &'a E)> + 'a {
        self.edges
            .iter()
            .filter(move |(edge, _)| edge.is_incident(vertex))
    }

    /// Vertices adjacent to `vertex`. O(E).
    pub fn neighbors<'a>(&'a self, vertex: &'a V) -> impl Iterator<Item = &'a V> + 'a {
        self.edges.keys().filter_map(move |edge| edge.other(vertex))
    }

    /// Number of edges incident to `vertex`. O(E).
    pub fn degree(&self, vertex: &V) -> usize {
        self.incident_edges(vertex).count()
    }

    /// Export to a petgraph undirected graph with the labels as weights.
    pub fn to_petgraph(&self) -> UnGraph<L, E>
    where
        L: Clone,
        E: Clone,
    {
        let mut graph = UnGraph::with_capacity(self.vertices.len(), self.edges.len());
        let index: BTreeMap<&V, NodeIndex> = self
            .vertices
            .iter()
            .map(|(v, label)| (v, graph.add_node(label.clone())))
            .collect();
        for (edge, label) in &self.edges {
            if let (Some(&a), Some(&b)) = (index.get(edge.src()), index.get(edge.dst())) {
                graph.add_edge(a, b, label.clone());
            }
        }
        graph
    }
}

impl<V: Ord + Clone + fmt::Debug, L: Clone> LabeledGraph<V, L, L> {
    /// Insert the edge between `src` and `dst`, labeling it with the
    /// current label of `dst`.
    pub fn insert_edge(&mut self, src: V, dst: V) -> Result<(&L, bool)> {
        let label = match self.vertices.get(&dst) {
            Some(label) => label.clone(),
            None => return Err(missing_endpoint(&dst)),
        };
        self.insert_labeled_edge(src, dst, label)
    }
}

impl<V: PartialEq, L: Render, E: Render> LabeledGraph<V, L, E> {
    /// Write the human-readable dump, printing labels in place of vertices.
    pub fn write_dump<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{self}")
    }
}

impl<V: PartialEq, L: Render, E: Render> fmt::Display for LabeledGraph<V, L, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut edges = self.edges.iter().peekable();
        for (vertex, label) in &self.vertices {
            writeln!(f, "{}", label.rendered())?;
            while let Some((_, edge_label)) = edges.next_if(|(edge, _)| edge.src() == vertex) {
                writeln!(f, "  {}", edge_label.rendered())?;
            }
        }
        Ok(())
    }
}
