use derive_more::{Display, Error};

use crate::types::Value;

pub type Result<T> = core::result::Result<T, DualContourError>;

/// Configuration errors, reported before any field evaluation happens.
///
/// Degenerate geometry and singular QEF systems are not errors: the affected
/// sample or vertex is dropped and extraction carries on.
#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum DualContourError {
    #[display("invalid bounds on axis {axis}: min {min} must be finite and below max {max}")]
    InvalidBounds { axis: usize, min: Value, max: Value },
    #[display("grid resolution must be at least 1")]
    ZeroResolution,
    #[display("adaptive max depth must be at least 1")]
    ZeroDepth,
    #[display("regularization must be finite and positive, got {_0}")]
    InvalidRegularization(#[error(not(source))] Value),
    #[display("intersection epsilon must be finite and non-negative, got {_0}")]
    InvalidIntersectionEpsilon(#[error(not(source))] Value),
    #[display("gradient step must be finite and positive, got {_0}")]
    InvalidGradientStep(#[error(not(source))] Value),
}
