//! Random geometric graph generation
//!
//! Nodes are scattered uniformly in the unit square (or cube) and every pair
//! closer than the connectivity radius is joined by an edge.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, Point3};

/// Dimension of the space nodes are scattered in before connecting them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementDimension {
    /// Unit square; the third coordinate of every placement point is 0
    #[default]
    Planar,
    /// Unit cube
    Spatial,
}

impl PlacementDimension {
    /// Number of sampled axes
    pub fn axes(self) -> usize {
        match self {
            PlacementDimension::Planar => 2,
            PlacementDimension::Spatial => 3,
        }
    }

    /// Length of the unit hypercube diagonal.
    ///
    /// Any radius at or above this connects every pair of nodes.
    pub fn diagonal(self) -> f64 {
        (self.axes() as f64).sqrt()
    }
}

/// Options for controlling graph generation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Placement space for the distance test (default: planar)
    pub dimension: PlacementDimension,
}

/// Builds random geometric graphs
#[derive(Debug, Clone, Default)]
pub struct RandomGraphGenerator {
    config: GeneratorConfig,
}

impl RandomGraphGenerator {
    /// Create a generator with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator with custom options
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Placement dimension used by this generator
    pub fn dimension(&self) -> PlacementDimension {
        self.config.dimension
    }

    /// Generate a graph with `node_count` nodes, joining pairs whose placement
    /// points lie within `radius` of each other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `node_count` is zero or `radius`
    /// is negative or not finite.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        node_count: usize,
        radius: f64,
        rng: &mut R,
    ) -> Result<Graph> {
        self.generate_with_placement(node_count, radius, rng)
            .map(|(graph, _)| graph)
    }

    /// Like [`generate`](Self::generate), but also returns the sampled
    /// placement point of every node, indexed by node id.
    pub fn generate_with_placement<R: Rng + ?Sized>(
        &self,
        node_count: usize,
        radius: f64,
        rng: &mut R,
    ) -> Result<(Graph, Vec<Point3>)> {
        validate(node_count, radius)?;

        let axes = self.dimension().axes();
        let placement: Vec<Point3> = (0..node_count)
            .map(|_| {
                let mut point = [0.0; 3];
                for coord in point.iter_mut().take(axes) {
                    *coord = rng.r#gen::<f64>();
                }
                point
            })
            .collect();

        let mut graph = Graph::new(node_count);
        for a in 0..node_count {
            for b in (a + 1)..node_count {
                if distance(placement[a], placement[b]) <= radius {
                    graph.add_edge(a, b)?;
                }
            }
        }

        debug!(
            node_count,
            radius,
            dimension = axes,
            edge_count = graph.edge_count(),
            "generated random geometric graph"
        );

        Ok((graph, placement))
    }
}

fn validate(node_count: usize, radius: f64) -> Result<()> {
    if node_count == 0 {
        return Err(Error::invalid("node_count", "must be at least 1"));
    }
    if !radius.is_finite() {
        return Err(Error::invalid(
            "connectivity",
            format!("must be finite, got {}", radius),
        ));
    }
    if radius < 0.0 {
        return Err(Error::invalid(
            "connectivity",
            format!("must not be negative, got {}", radius),
        ));
    }
    Ok(())
}

fn distance(a: Point3, b: Point3) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
