//! Graph data model
//!
//! A [`Graph`] is a plain value: a node count plus a set of undirected edges.
//! Nodes carry no attributes; a node is identified by its index in
//! `0..node_count`. [`Positions`] maps node ids to points in 3D space and is
//! produced by the layout stage.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Node identifier (index into `0..node_count`)
pub type NodeId = usize;

/// A point in 3D space
pub type Point3 = [f64; 3];

/// An undirected edge between two distinct nodes.
///
/// Endpoints are stored normalized (`low < high`), so `Edge::new(3, 1)` and
/// `Edge::new(1, 3)` are the same edge. Serializes as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "[NodeId; 2]", try_from = "[NodeId; 2]")]
pub struct Edge {
    low: NodeId,
    high: NodeId,
}

impl Edge {
    /// Create an edge between `a` and `b`.
    ///
    /// Returns `None` for a self-loop.
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Both endpoints, smaller id first
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }

    /// Whether `node` is one of the endpoints
    pub fn touches(&self, node: NodeId) -> bool {
        self.low == node || self.high == node
    }
}

impl From<Edge> for [NodeId; 2] {
    fn from(edge: Edge) -> Self {
        [edge.low, edge.high]
    }
}

impl TryFrom<[NodeId; 2]> for Edge {
    type Error = String;

    fn try_from([a, b]: [NodeId; 2]) -> std::result::Result<Self, Self::Error> {
        Edge::new(a, b).ok_or_else(|| format!("self-loop on node {}", a))
    }
}

/// Undirected simple graph
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "GraphRepr")]
pub struct Graph {
    node_count: usize,
    edges: BTreeSet<Edge>,
}

/// Unvalidated wire form of a [`Graph`]
#[derive(Deserialize)]
struct GraphRepr {
    node_count: usize,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl TryFrom<GraphRepr> for Graph {
    type Error = Error;

    fn try_from(repr: GraphRepr) -> Result<Self> {
        let mut graph = Graph::new(repr.node_count);
        for edge in repr.edges {
            graph.add_edge(edge.low, edge.high)?;
        }
        Ok(graph)
    }
}

impl Graph {
    /// Create a graph with `node_count` isolated nodes
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: BTreeSet::new(),
        }
    }

    /// Create the complete graph on `node_count` nodes
    pub fn complete(node_count: usize) -> Self {
        let edges = (0..node_count)
            .flat_map(|a| ((a + 1)..node_count).map(move |b| Edge { low: a, high: b }))
            .collect();
        Self { node_count, edges }
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node ids in ascending order
    pub fn nodes(&self) -> Range<NodeId> {
        0..self.node_count
    }

    /// Edges in ascending `(low, high)` order
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// Whether `node` exists in this graph
    pub fn contains_node(&self, node: NodeId) -> bool {
        node < self.node_count
    }

    /// Whether an edge between `a` and `b` exists
    pub fn contains_edge(&self, a: NodeId, b: NodeId) -> bool {
        Edge::new(a, b).is_some_and(|edge| self.edges.contains(&edge))
    }

    /// Add an undirected edge between `a` and `b`.
    ///
    /// Returns `Ok(true)` if the edge was inserted and `Ok(false)` if it was
    /// already present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a self-loop or an endpoint that
    /// is not a node of this graph.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        for node in [a, b] {
            if !self.contains_node(node) {
                return Err(Error::invalid(
                    "edge",
                    format!(
                        "node {} is out of range for a graph with {} nodes",
                        node, self.node_count
                    ),
                ));
            }
        }
        let edge =
            Edge::new(a, b).ok_or_else(|| Error::invalid("edge", format!("self-loop on node {}", a)))?;
        Ok(self.edges.insert(edge))
    }

    /// Number of edges incident to `node`
    pub fn degree(&self, node: NodeId) -> usize {
        self.edges.iter().filter(|e| e.touches(node)).count()
    }

    /// Neighbor sets for every node, indexed by node id
    pub fn adjacency(&self) -> Vec<BTreeSet<NodeId>> {
        let mut adjacency = vec![BTreeSet::new(); self.node_count];
        for edge in &self.edges {
            adjacency[edge.low].insert(edge.high);
            adjacency[edge.high].insert(edge.low);
        }
        adjacency
    }
}

/// Mapping from node id to a 3D position
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Positions {
    points: BTreeMap<NodeId, Point3>,
}

impl Positions {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the position of `node`, returning the previous one if any
    pub fn insert(&mut self, node: NodeId, point: Point3) -> Option<Point3> {
        self.points.insert(node, point)
    }

    /// Position of `node`
    pub fn get(&self, node: NodeId) -> Option<Point3> {
        self.points.get(&node).copied()
    }

    /// Number of positioned nodes
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no node has a position
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Positions in ascending node order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point3)> + '_ {
        self.points.iter().map(|(&node, &point)| (node, point))
    }

    /// Position of `node`, or [`Error::IncompleteLayout`] if it has none
    pub fn require(&self, node: NodeId) -> Result<Point3> {
        self.get(node).ok_or(Error::IncompleteLayout { node })
    }

    /// Check that every node of `graph` has a position
    pub fn covers(&self, graph: &Graph) -> Result<()> {
        graph.nodes().try_for_each(|node| self.require(node).map(|_| ()))
    }

    /// Whether every coordinate is finite
    pub fn all_finite(&self) -> bool {
        self.points
            .values()
            .all(|p| p.iter().all(|c| c.is_finite()))
    }
}

impl FromIterator<(NodeId, Point3)> for Positions {
    fn from_iter<I: IntoIterator<Item = (NodeId, Point3)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_normalizes_endpoints() {
        let edge = Edge::new(5, 2).unwrap();
        assert_eq!(edge.endpoints(), (2, 5));
        assert_eq!(edge, Edge::new(2, 5).unwrap());
    }

    #[test]
    fn edge_rejects_self_loop() {
        assert!(Edge::new(3, 3).is_none());
    }

    #[test]
    fn add_edge_deduplicates_reversed_pairs() {
        let mut graph = Graph::new(3);
        assert!(graph.add_edge(0, 1).unwrap());
        assert!(!graph.add_edge(1, 0).unwrap());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn add_edge_rejects_missing_node() {
        let mut graph = Graph::new(2);
        let err = graph.add_edge(0, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "edge", .. }));
    }

    #[test]
    fn add_edge_rejects_self_loop() {
        let mut graph = Graph::new(2);
        assert!(graph.add_edge(1, 1).is_err());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn complete_graph_has_all_pairs() {
        let graph = Graph::complete(4);
        assert_eq!(graph.edge_count(), 6);
        for a in graph.nodes() {
            assert_eq!(graph.degree(a), 3);
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        let mut graph = Graph::new(4);
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(2, 1).unwrap();

        let adjacency = graph.adjacency();
        assert!(adjacency[0].contains(&1));
        assert!(adjacency[1].contains(&0));
        assert!(adjacency[1].contains(&2));
        assert!(adjacency[3].is_empty());
    }

    #[test]
    fn graph_serializes_edges_as_pairs() {
        let mut graph = Graph::new(3);
        graph.add_edge(2, 0).unwrap();

        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(json, r#"{"node_count":3,"edges":[[0,2]]}"#);

        let restored: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, graph);
    }

    #[test]
    fn graph_deserialization_validates_edges() {
        let result: std::result::Result<Graph, _> =
            serde_json::from_str(r#"{"node_count":2,"edges":[[0,5]]}"#);
        assert!(result.is_err());

        let self_loop: std::result::Result<Graph, _> =
            serde_json::from_str(r#"{"node_count":2,"edges":[[1,1]]}"#);
        assert!(self_loop.is_err());
    }

    #[test]
    fn positions_report_first_missing_node() {
        let graph = Graph::new(3);
        let positions: Positions = [(0, [0.0; 3]), (2, [1.0; 3])].into_iter().collect();

        assert_eq!(
            positions.covers(&graph),
            Err(Error::IncompleteLayout { node: 1 })
        );
    }

    #[test]
    fn positions_detect_non_finite_coordinates() {
        let mut positions = Positions::new();
        positions.insert(0, [0.0, 1.0, 2.0]);
        assert!(positions.all_finite());

        positions.insert(1, [f64::NAN, 0.0, 0.0]);
        assert!(!positions.all_finite());
    }
}
