//! Display-only design metadata
//!
//! Phase type, symmetry and design type are recorded alongside a generated
//! structure and shown in its properties table. None of them influence
//! generation, layout or metrics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which phase of the porous structure the design describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseType {
    #[default]
    Solid,
    Pore,
    Dual,
}

impl PhaseType {
    /// Label shown in the properties table
    pub fn label(&self) -> &'static str {
        match self {
            PhaseType::Solid => "Solid Phase",
            PhaseType::Pore => "Pore Phase",
            PhaseType::Dual => "Dual Phase",
        }
    }
}

impl fmt::Display for PhaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PhaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" | "solid phase" => Ok(PhaseType::Solid),
            "pore" | "pore phase" => Ok(PhaseType::Pore),
            "dual" | "dual phase" => Ok(PhaseType::Dual),
            other => Err(format!(
                "unknown phase type `{}`; expected solid, pore or dual",
                other
            )),
        }
    }
}

/// Kind of structure the user is designing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignType {
    #[default]
    Simple,
    Complex,
    Custom,
}

impl DesignType {
    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            DesignType::Simple => "Simple Graph",
            DesignType::Complex => "Complex Graph",
            DesignType::Custom => "Custom Design",
        }
    }
}

impl fmt::Display for DesignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DesignType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" | "simple graph" => Ok(DesignType::Simple),
            "complex" | "complex graph" => Ok(DesignType::Complex),
            "custom" | "custom design" => Ok(DesignType::Custom),
            other => Err(format!(
                "unknown design type `{}`; expected simple, complex or custom",
                other
            )),
        }
    }
}

/// One row of the structure properties table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

/// Metadata recorded with a generated structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureProperties {
    pub connectivity: f64,
    pub symmetry: bool,
    pub phase_type: PhaseType,
    pub design_type: DesignType,
}

impl StructureProperties {
    /// Rows of the properties table: connectivity, symmetry, phase type
    pub fn table(&self) -> Vec<Property> {
        vec![
            Property {
                name: "Connectivity".to_string(),
                value: self.connectivity.to_string(),
            },
            Property {
                name: "Symmetry".to_string(),
                value: self.symmetry.to_string(),
            },
            Property {
                name: "Phase Type".to_string(),
                value: self.phase_type.label().to_string(),
            },
        ]
    }
}

impl fmt::Display for StructureProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.table() {
            writeln!(f, "{:<20}{}", row.name, row.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_type_parses_short_and_long_names() {
        assert_eq!("dual".parse::<PhaseType>(), Ok(PhaseType::Dual));
        assert_eq!("Pore Phase".parse::<PhaseType>(), Ok(PhaseType::Pore));
        assert!("liquid".parse::<PhaseType>().is_err());
    }

    #[test]
    fn design_type_parses_short_and_long_names() {
        assert_eq!("complex".parse::<DesignType>(), Ok(DesignType::Complex));
        assert_eq!("Custom Design".parse::<DesignType>(), Ok(DesignType::Custom));
        assert!("random".parse::<DesignType>().is_err());
    }

    #[test]
    fn table_lists_connectivity_symmetry_phase() {
        let props = StructureProperties {
            connectivity: 0.5,
            symmetry: true,
            phase_type: PhaseType::Solid,
            design_type: DesignType::Simple,
        };

        let table = props.table();
        let names: Vec<&str> = table.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Connectivity", "Symmetry", "Phase Type"]);
        assert_eq!(table[0].value, "0.5");
        assert_eq!(table[1].value, "true");
        assert_eq!(table[2].value, "Solid Phase");
    }

    #[test]
    fn phase_type_serializes_snake_case() {
        let json = serde_json::to_string(&PhaseType::Dual).unwrap();
        assert_eq!(json, "\"dual\"");
    }
}
