//! 3D force-directed layout
//!
//! Fruchterman-Reingold style simulation: every pair of nodes repels with
//! strength `k² / d`, every edge pulls its endpoints together with strength
//! `d² / k`, and each node moves along its net force by at most the current
//! temperature. The temperature cools linearly over the iteration budget.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, Point3, Positions};

// =============================================================================
// Default Constants
// =============================================================================

/// Default maximum number of simulation ticks
pub const DEFAULT_ITERATIONS: usize = 50;

/// Default convergence threshold (mean per-node step length)
pub const DEFAULT_THRESHOLD: f64 = 1e-4;

/// Default minimum distance for force calculations (avoids singularity)
pub const DEFAULT_MIN_DISTANCE: f64 = 0.01;

/// Default half-width of the box the final layout is scaled into
pub const DEFAULT_SCALE: f64 = 1.0;

/// Fraction of the initial extent used as the starting temperature
const INITIAL_TEMPERATURE_FRACTION: f64 = 0.1;

/// Configuration for the force simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum number of ticks
    pub iterations: usize,
    /// Stop once the mean per-node step falls below this
    pub threshold: f64,
    /// Optimal edge length `k`; defaults to `1 / sqrt(node_count)`
    pub optimal_distance: Option<f64>,
    /// Largest absolute coordinate after rescaling
    pub scale: f64,
    /// Distances are clamped to at least this value
    pub min_distance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
            optimal_distance: None,
            scale: DEFAULT_SCALE,
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }
}

impl LayoutConfig {
    /// Check that every numeric setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the first bad setting.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            return Err(Error::invalid(
                "layout.threshold",
                format!("must be finite and non-negative, got {}", self.threshold),
            ));
        }
        if let Some(k) = self.optimal_distance {
            if !(k.is_finite() && k > 0.0) {
                return Err(Error::invalid(
                    "layout.optimal_distance",
                    format!("must be finite and positive, got {}", k),
                ));
            }
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::invalid(
                "layout.scale",
                format!("must be finite and positive, got {}", self.scale),
            ));
        }
        if !(self.min_distance.is_finite() && self.min_distance > 0.0) {
            return Err(Error::invalid(
                "layout.min_distance",
                format!("must be finite and positive, got {}", self.min_distance),
            ));
        }
        Ok(())
    }
}

/// Computes 3D positions for every node of a graph
#[derive(Debug, Clone, Default)]
pub struct SpringLayout {
    config: LayoutConfig,
}

impl SpringLayout {
    /// Create a layout engine with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layout engine with custom settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `config` fails
    /// [`LayoutConfig::validate`].
    pub fn with_config(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Settings used by this engine
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `graph`, drawing initial positions from `rng`.
    ///
    /// The result is centered on the origin and scaled so the largest
    /// absolute coordinate equals [`LayoutConfig::scale`]. A single node is
    /// placed at the origin.
    pub fn layout<R: Rng + ?Sized>(&self, graph: &Graph, rng: &mut R) -> Positions {
        match graph.node_count() {
            0 => Positions::new(),
            1 => [(0, [0.0; 3])].into_iter().collect(),
            _ => {
                let mut sim = Simulation::new(graph, &self.config, rng);
                sim.run_to_convergence();
                debug!(
                    node_count = graph.node_count(),
                    ticks = sim.ticks,
                    last_step = sim.last_step,
                    "spring layout finished"
                );
                sim.into_positions(self.config.scale)
            }
        }
    }
}

/// Mutable state of one layout run
struct Simulation<'a> {
    positions: Vec<Point3>,
    adjacency: Vec<BTreeSet<NodeId>>,
    config: &'a LayoutConfig,
    /// Optimal distance
    k: f64,
    /// Maximum step length for the next tick
    temperature: f64,
    /// Temperature lost per tick
    cooling: f64,
    ticks: usize,
    /// Mean per-node step length of the last tick
    last_step: f64,
}

impl<'a> Simulation<'a> {
    fn new<R: Rng + ?Sized>(graph: &Graph, config: &'a LayoutConfig, rng: &mut R) -> Self {
        let n = graph.node_count();
        let positions: Vec<Point3> = (0..n)
            .map(|_| [rng.r#gen(), rng.r#gen(), rng.r#gen()])
            .collect();

        let k = config
            .optimal_distance
            .unwrap_or_else(|| (1.0 / n as f64).sqrt());
        let temperature = widest_extent(&positions) * INITIAL_TEMPERATURE_FRACTION;
        let cooling = temperature / (config.iterations as f64 + 1.0);

        Self {
            positions,
            adjacency: graph.adjacency(),
            config,
            k,
            temperature,
            cooling,
            ticks: 0,
            last_step: f64::INFINITY,
        }
    }

    /// Check if the simulation should keep stepping
    fn is_running(&self) -> bool {
        self.ticks < self.config.iterations && self.last_step >= self.config.threshold
    }

    /// Run one simulation tick
    fn tick(&mut self) {
        let n = self.positions.len();
        let k_squared = self.k * self.k;
        let mut displacement = vec![[0.0_f64; 3]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = sub(self.positions[i], self.positions[j]);
                let dist = norm(delta).max(self.config.min_distance);

                // Repulsion k²/d for every pair, attraction d²/k along edges
                let mut factor = k_squared / (dist * dist);
                if self.adjacency[i].contains(&j) {
                    factor -= dist / self.k;
                }

                for axis in 0..3 {
                    displacement[i][axis] += delta[axis] * factor;
                    displacement[j][axis] -= delta[axis] * factor;
                }
            }
        }

        let mut step_norm_squared = 0.0;
        for (position, disp) in self.positions.iter_mut().zip(&displacement) {
            let length = norm(*disp).max(self.config.min_distance);
            let ratio = self.temperature / length;
            for axis in 0..3 {
                let step = disp[axis] * ratio;
                position[axis] += step;
                step_norm_squared += step * step;
            }
        }

        self.temperature -= self.cooling;
        self.ticks += 1;
        self.last_step = step_norm_squared.sqrt() / n as f64;

        trace!(
            tick = self.ticks,
            temperature = self.temperature,
            step = self.last_step,
            "layout tick"
        );
    }

    fn run_to_convergence(&mut self) {
        while self.is_running() {
            self.tick();
        }
    }

    /// Center on the origin and scale into `[-scale, scale]`
    fn into_positions(mut self, scale: f64) -> Positions {
        let n = self.positions.len() as f64;
        let mut mean = [0.0; 3];
        for position in &self.positions {
            for axis in 0..3 {
                mean[axis] += position[axis] / n;
            }
        }

        let mut limit: f64 = 0.0;
        for position in &mut self.positions {
            for axis in 0..3 {
                position[axis] -= mean[axis];
                limit = limit.max(position[axis].abs());
            }
        }

        if limit > 0.0 {
            let ratio = scale / limit;
            for position in &mut self.positions {
                for coord in position.iter_mut() {
                    *coord *= ratio;
                }
            }
        }

        self.positions.into_iter().enumerate().collect()
    }
}

/// Largest per-axis spread of a point set
fn widest_extent(points: &[Point3]) -> f64 {
    (0..3)
        .map(|axis| {
            let (lo, hi) = points.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), p| (lo.min(p[axis]), hi.max(p[axis])),
            );
            hi - lo
        })
        .fold(0.0, f64::max)
}

fn sub(a: Point3, b: Point3) -> Point3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn norm(v: Point3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
