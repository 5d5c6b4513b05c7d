//! poregraph - random porous metamaterial unit cells as 3D graphs.
//!
//! A unit cell is modelled as a random geometric graph: nodes are scattered
//! in the unit square (or cube) and joined when they lie within the
//! connectivity radius. The crate lays the graph out in 3D with a
//! force-directed simulation, derives topology metrics and builds a scene of
//! line and marker primitives for rendering.
//!
//! ```
//! use poregraph::{Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::with_config(PipelineConfig {
//!     seed: Some(7),
//!     ..PipelineConfig::default()
//! })?;
//! let output = pipeline.run(15, 0.5)?;
//!
//! assert_eq!(output.graph.node_count(), 15);
//! assert_eq!(output.scene.edge_lines.len(), output.graph.edge_count());
//! # Ok::<(), poregraph::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod properties;
pub mod scene;

pub use config::DesignConfig;
pub use error::{Error, Result};
pub use generator::{GeneratorConfig, PlacementDimension, RandomGraphGenerator};
pub use graph::{Edge, Graph, NodeId, Point3, Positions};
pub use layout::{LayoutConfig, SpringLayout};
pub use metrics::{Metrics, compute_metrics};
pub use pipeline::{Design, DesignRequest, Pipeline, PipelineConfig, PipelineOutput};
pub use properties::{DesignType, PhaseType, StructureProperties};
pub use scene::{Scene, SceneBuilder, build_scene};
