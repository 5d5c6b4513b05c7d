//! Error type shared by every pipeline stage

use thiserror::Error;

/// Errors that can occur while generating, laying out or rendering a design
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A caller-supplied parameter is outside its valid domain
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter (e.g. "node_count")
        name: &'static str,
        /// Human-readable explanation
        reason: String,
    },

    /// A node has no position when building the scene
    #[error("layout is missing a position for node {node}")]
    IncompleteLayout {
        /// Id of the node without a position
        node: usize,
    },

    /// A configuration file could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message_names_parameter() {
        let err = Error::invalid("node_count", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid parameter `node_count`: must be at least 1"
        );
    }

    #[test]
    fn incomplete_layout_message_names_node() {
        let err = Error::IncompleteLayout { node: 7 };
        assert_eq!(err.to_string(), "layout is missing a position for node 7");
    }
}
