//! Structural metrics of a graph
//!
//! All functions here are pure and recompute from the graph each call.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeId};

/// Summary topology of a generated structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean number of edges per node
    pub average_degree: f64,
    /// Fraction of possible edges present, in `[0, 1]`
    pub density: f64,
    /// Mean local clustering coefficient, in `[0, 1]`
    pub average_clustering: f64,
}

impl Metrics {
    /// Labelled rows in display order
    pub fn rows(&self) -> [(&'static str, f64); 3] {
        [
            ("Average Degree", self.average_degree),
            ("Graph Density", self.density),
            ("Average Clustering", self.average_clustering),
        ]
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.rows() {
            writeln!(f, "{:<20}{:.3}", label, value)?;
        }
        Ok(())
    }
}

/// Compute every metric for `graph`
pub fn compute_metrics(graph: &Graph) -> Metrics {
    Metrics {
        average_degree: average_degree(graph),
        density: density(graph),
        average_clustering: average_clustering(graph),
    }
}

/// Degree of every node, indexed by node id
pub fn degree_sequence(graph: &Graph) -> Vec<usize> {
    let mut degrees = vec![0; graph.node_count()];
    for edge in graph.edges() {
        let (a, b) = edge.endpoints();
        degrees[a] += 1;
        degrees[b] += 1;
    }
    degrees
}

/// Sum of degrees divided by node count; 0 for an empty graph
pub fn average_degree(graph: &Graph) -> f64 {
    if graph.node_count() == 0 {
        return 0.0;
    }
    let total: usize = degree_sequence(graph).iter().sum();
    total as f64 / graph.node_count() as f64
}

/// `2m / (n (n - 1))`; 0 when there are fewer than two nodes
pub fn density(graph: &Graph) -> f64 {
    let n = graph.node_count();
    if n < 2 {
        return 0.0;
    }
    let possible = n as f64 * (n as f64 - 1.0);
    2.0 * graph.edge_count() as f64 / possible
}

/// Fraction of `node`'s neighbor pairs that are adjacent.
///
/// Nodes with fewer than two neighbors (or outside the graph) score 0.
pub fn local_clustering(graph: &Graph, node: NodeId) -> f64 {
    if !graph.contains_node(node) {
        return 0.0;
    }
    clustering_from_adjacency(&graph.adjacency(), node)
}

/// Mean of [`local_clustering`] over all nodes; 0 for an empty graph
pub fn average_clustering(graph: &Graph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }
    let adjacency = graph.adjacency();
    let total: f64 = (0..n)
        .map(|node| clustering_from_adjacency(&adjacency, node))
        .sum();
    total / n as f64
}

fn clustering_from_adjacency(adjacency: &[BTreeSet<NodeId>], node: NodeId) -> f64 {
    let neighbors: Vec<NodeId> = adjacency[node].iter().copied().collect();
    let k = neighbors.len();
    if k < 2 {
        return 0.0;
    }

    let mut links = 0usize;
    for (i, &a) in neighbors.iter().enumerate() {
        for &b in &neighbors[i + 1..] {
            if adjacency[a].contains(&b) {
                links += 1;
            }
        }
    }

    let possible = k * (k - 1) / 2;
    links as f64 / possible as f64
}
