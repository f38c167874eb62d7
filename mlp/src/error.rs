use std::fmt;

/// Which caller-supplied vector failed a length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorKind {
    Input,
    ExpectedOutput,
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorKind::Input => f.write_str("input"),
            VectorKind::ExpectedOutput => f.write_str("expected output"),
        }
    }
}

/// The half of a training step in which a non-finite value showed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Forward,
    Backward,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Forward => f.write_str("forward pass"),
            Stage::Backward => f.write_str("backward pass"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid network configuration: {0}")]
    Configuration(String),

    #[error("{vector} vector has {actual} elements, but the layer has {expected} neurons")]
    DimensionMismatch {
        vector: VectorKind,
        expected: usize,
        actual: usize,
    },

    #[error("non-finite value in layer {layer} during the {stage}")]
    NumericInstability { layer: usize, stage: Stage },
}

pub type Result<T> = std::result::Result<T, Error>;
