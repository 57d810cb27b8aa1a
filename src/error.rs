//! Error types for the frame solver

use thiserror::Error;

/// Main error type for structural analysis operations
#[derive(Error, Debug)]
pub enum FEAError {
    #[error("Node '{0}' not found in model")]
    UnknownNode(String),

    #[error("Member '{0}' not found in model")]
    UnknownElement(String),

    #[error("Duplicate id '{0}' already exists")]
    DuplicateId(String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Singular matrix - no usable pivot for unknown {column}")]
    Singular { column: usize },

    #[error("Structure is unstable: {0}")]
    UnstableStructure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model has {nodes} nodes, exceeding the limit of {limit}")]
    ModelTooLarge { nodes: usize, limit: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FEAError {
    /// Shorthand for a shape mismatch between two operands
    pub(crate) fn shape(
        op: &str,
        left: (usize, usize),
        right: (usize, usize),
    ) -> Self {
        Self::ShapeMismatch(format!(
            "{op}: {}x{} is incompatible with {}x{}",
            left.0, left.1, right.0, right.1
        ))
    }
}

/// Result type for structural analysis operations
pub type FEAResult<T> = Result<T, FEAError>;
