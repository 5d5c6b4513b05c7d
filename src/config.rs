//! Design configuration
//!
//! Settings are layered: built-in defaults, then an optional YAML or JSON
//! file, then command-line overrides applied by the binary. Every field is
//! optional in the file.
//!
//! ```yaml
//! node_count: 24
//! connectivity: 0.35
//! seed: 7
//! phase_type: dual
//! layout:
//!   iterations: 100
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::generator::GeneratorConfig;
use crate::layout::LayoutConfig;
use crate::pipeline::{DesignRequest, PipelineConfig, validate_parameters};
use crate::properties::{DesignType, PhaseType};

/// Default number of nodes
pub const DEFAULT_NODE_COUNT: usize = 15;

/// Default connectivity radius
pub const DEFAULT_CONNECTIVITY: f64 = 0.5;

/// Complete set of inputs for one design run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignConfig {
    pub node_count: usize,
    pub connectivity: f64,
    /// Seed for reproducible runs; fresh entropy when absent
    pub seed: Option<u64>,
    pub phase_type: PhaseType,
    pub symmetry: bool,
    pub design_type: DesignType,
    pub generator: GeneratorConfig,
    pub layout: LayoutConfig,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            connectivity: DEFAULT_CONNECTIVITY,
            seed: None,
            phase_type: PhaseType::default(),
            symmetry: true,
            design_type: DesignType::default(),
            generator: GeneratorConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl DesignConfig {
    /// Load a configuration file, choosing the format from its extension
    /// (`.yaml`, `.yml` or `.json`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read, has an unknown
    /// extension or does not parse.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                Error::Config(format!(
                    "could not determine file format from path: {}",
                    path.display()
                ))
            })?;

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;

        match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "json" => Self::from_json_str(&content),
            other => Err(Error::Config(format!("unsupported format: {}", other))),
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(format!("YAML parse error: {}", e)))
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Config(format!("JSON parse error: {}", e)))
    }

    /// Check node count, connectivity and layout settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the first bad setting.
    pub fn validate(&self) -> Result<()> {
        validate_parameters(self.node_count, self.connectivity)?;
        self.layout.validate()
    }

    /// Settings for building a [`Pipeline`](crate::Pipeline)
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            seed: self.seed,
            generator: self.generator.clone(),
            layout: self.layout.clone(),
        }
    }

    /// Parameters and metadata for one run
    pub fn request(&self) -> DesignRequest {
        DesignRequest {
            node_count: self.node_count,
            connectivity: self.connectivity,
            phase_type: self.phase_type,
            symmetry: self.symmetry,
            design_type: self.design_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::PlacementDimension;
    use std::io::Write;

    #[test]
    fn defaults_match_design_sliders() {
        let config = DesignConfig::default();
        assert_eq!(config.node_count, 15);
        assert_eq!(config.connectivity, 0.5);
        assert!(config.symmetry);
        assert_eq!(config.phase_type, PhaseType::Solid);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = DesignConfig::from_yaml_str(
            "node_count: 24\nseed: 7\nlayout:\n  iterations: 100\ngenerator:\n  dimension: spatial\n",
        )
        .unwrap();

        assert_eq!(config.node_count, 24);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.layout.iterations, 100);
        assert_eq!(config.layout.scale, 1.0);
        assert_eq!(config.generator.dimension, PlacementDimension::Spatial);
        assert_eq!(config.connectivity, 0.5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DesignConfig::from_yaml_str("nodes: 3\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn loads_json_file_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"connectivity": 0.25, "phase_type": "pore"}}"#).unwrap();

        let config = DesignConfig::from_path(file.path()).unwrap();
        assert_eq!(config.connectivity, 0.25);
        assert_eq!(config.phase_type, PhaseType::Pore);
    }

    #[test]
    fn loads_yaml_file_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "symmetry: false").unwrap();

        let config = DesignConfig::from_path(file.path()).unwrap();
        assert!(!config.symmetry);
    }

    #[test]
    fn unsupported_extension_is_config_error() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = DesignConfig::from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported format"));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = DesignConfig::from_path(Path::new("does/not/exist.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn validate_rejects_out_of_range_connectivity() {
        let config = DesignConfig {
            connectivity: 1.5,
            ..DesignConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
