//! Generation pipeline
//!
//! Runs generator, layout, metrics and scene builder in order and returns
//! everything a renderer needs for one design. Each call draws from a fresh
//! random source, so a [`Pipeline`] holds no mutable state and can be shared
//! between threads.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::generator::{GeneratorConfig, RandomGraphGenerator};
use crate::graph::{Graph, Positions};
use crate::layout::{LayoutConfig, SpringLayout};
use crate::metrics::{Metrics, compute_metrics};
use crate::properties::{DesignType, PhaseType, StructureProperties};
use crate::scene::{Scene, SceneBuilder};

/// Settings that shape every run of a [`Pipeline`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    /// Seed for reproducible output; OS entropy when `None`
    pub seed: Option<u64>,
    pub generator: GeneratorConfig,
    pub layout: LayoutConfig,
}

/// Everything produced for one generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub graph: Graph,
    pub positions: Positions,
    pub metrics: Metrics,
    pub scene: Scene,
}

/// Parameters plus display-only metadata for one design
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignRequest {
    pub node_count: usize,
    pub connectivity: f64,
    pub phase_type: PhaseType,
    pub symmetry: bool,
    pub design_type: DesignType,
}

impl DesignRequest {
    /// Request with default metadata
    pub fn new(node_count: usize, connectivity: f64) -> Self {
        Self {
            node_count,
            connectivity,
            phase_type: PhaseType::default(),
            symmetry: true,
            design_type: DesignType::default(),
        }
    }
}

/// A generated design with its properties table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Design {
    pub properties: StructureProperties,
    #[serde(flatten)]
    pub output: PipelineOutput,
}

/// Check the external parameters of a run.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `node_count` is zero or
/// `connectivity` is not a finite value in `[0, 1]`.
pub fn validate_parameters(node_count: usize, connectivity: f64) -> Result<()> {
    if node_count == 0 {
        return Err(Error::invalid("node_count", "must be at least 1"));
    }
    if !connectivity.is_finite() {
        return Err(Error::invalid(
            "connectivity",
            format!("must be finite, got {}", connectivity),
        ));
    }
    if !(0.0..=1.0).contains(&connectivity) {
        return Err(Error::invalid(
            "connectivity",
            format!("must be within [0, 1], got {}", connectivity),
        ));
    }
    Ok(())
}

/// Generator → layout → metrics → scene
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    seed: Option<u64>,
    generator: RandomGraphGenerator,
    layout: SpringLayout,
    scene: SceneBuilder,
}

impl Pipeline {
    /// Create a pipeline with default settings and an unseeded random source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the layout settings are unusable.
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            seed: config.seed,
            generator: RandomGraphGenerator::with_config(config.generator),
            layout: SpringLayout::with_config(config.layout)?,
            scene: SceneBuilder::new(),
        })
    }

    /// Use `builder` for the scene stage
    pub fn with_scene_builder(mut self, builder: SceneBuilder) -> Self {
        self.scene = builder;
        self
    }

    /// Generate, lay out, measure and render one structure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for bad inputs; nothing is
    /// produced in that case.
    pub fn run(&self, node_count: usize, connectivity: f64) -> Result<PipelineOutput> {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        self.run_with_rng(node_count, connectivity, &mut rng)
    }

    /// Like [`run`](Self::run), drawing randomness from `rng`
    #[instrument(name = "pipeline.run", skip(self, rng))]
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        node_count: usize,
        connectivity: f64,
        rng: &mut R,
    ) -> Result<PipelineOutput> {
        validate_parameters(node_count, connectivity)?;

        let graph = self.generator.generate(node_count, connectivity, rng)?;
        let positions = self.layout.layout(&graph, rng);
        let metrics = compute_metrics(&graph);
        let scene = self.scene.build(&graph, &positions)?;

        debug!(
            edge_count = graph.edge_count(),
            average_degree = metrics.average_degree,
            density = metrics.density,
            average_clustering = metrics.average_clustering,
            "pipeline finished"
        );

        Ok(PipelineOutput {
            graph,
            positions,
            metrics,
            scene,
        })
    }

    /// Run the pipeline and attach the request's metadata
    pub fn run_design(&self, request: &DesignRequest) -> Result<Design> {
        let output = self.run(request.node_count, request.connectivity)?;
        Ok(Design {
            properties: StructureProperties {
                connectivity: request.connectivity,
                symmetry: request.symmetry,
                phase_type: request.phase_type,
                design_type: request.design_type,
            },
            output,
        })
    }
}
