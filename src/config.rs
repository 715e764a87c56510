use crate::{
    error::{DualContourError, Result},
    types::Value,
};

/// How the bounding region is partitioned into cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subdivision {
    /// A fixed lattice with `resolution` equal cells along every axis.
    /// Every cell is visited.
    Uniform { resolution: usize },
    /// Recursive `2^D`-way splitting from a single root cell, driven by a
    /// corner-sign test, down to at most `max_depth` levels.
    Adaptive { max_depth: u32 },
}

/// How the per-cell QEF system is anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QefMethod {
    /// Solve `(Σ nnᵀ + εI) v = Σ (n·p) n` directly.
    ///
    /// Directions the normals leave unconstrained are resolved towards the
    /// origin.
    #[default]
    NormalEquations,
    /// Solve the same regularized system for the offset from the centroid of
    /// the cell's intersection points, so unconstrained directions stay at the
    /// centroid.
    MassPoint,
}

/// Runtime configuration for [`SurfaceExtractor`](crate::extractor::SurfaceExtractor).
///
/// ```rust
/// use dual_contour::config::{ExtractorConfig, Subdivision};
///
/// let config = ExtractorConfig::adaptive(4).with_regularization(1e-6);
/// assert_eq!(config.subdivision, Subdivision::Adaptive { max_depth: 4 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtractorConfig {
    pub subdivision: Subdivision,
    /// Multiple of the identity added to the QEF matrix. Default: `1e-8`.
    pub regularization: Value,
    /// Added to the radicand of closed-form edge roots to tolerate tangency.
    /// Default: `1e-8`.
    pub intersection_epsilon: Value,
    /// Step of the central differences used when a field has no analytic
    /// gradient. Default: `1e-5`.
    pub gradient_step: Value,
    pub qef_method: QefMethod,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            subdivision: Subdivision::Uniform { resolution: 16 },
            regularization: 1e-8,
            intersection_epsilon: 1e-8,
            gradient_step: 1e-5,
            qef_method: QefMethod::NormalEquations,
        }
    }
}

impl ExtractorConfig {
    /// Uniform lattice with `resolution` cells per axis.
    pub fn uniform(resolution: usize) -> Self {
        Self {
            subdivision: Subdivision::Uniform { resolution },
            ..Default::default()
        }
    }

    /// Adaptive subdivision down to `max_depth`.
    pub fn adaptive(max_depth: u32) -> Self {
        Self {
            subdivision: Subdivision::Adaptive { max_depth },
            ..Default::default()
        }
    }

    pub fn with_regularization(mut self, regularization: Value) -> Self {
        self.regularization = regularization;
        self
    }

    pub fn with_intersection_epsilon(mut self, epsilon: Value) -> Self {
        self.intersection_epsilon = epsilon;
        self
    }

    pub fn with_gradient_step(mut self, step: Value) -> Self {
        self.gradient_step = step;
        self
    }

    pub fn with_qef_method(mut self, method: QefMethod) -> Self {
        self.qef_method = method;
        self
    }

    /// Checks every parameter; the first invalid one is reported.
    pub fn validate(&self) -> Result<()> {
        match self.subdivision {
            Subdivision::Uniform { resolution: 0 } => return Err(DualContourError::ZeroResolution),
            Subdivision::Adaptive { max_depth: 0 } => return Err(DualContourError::ZeroDepth),
            _ => {}
        }
        if !(self.regularization.is_finite() && self.regularization > 0.0) {
            return Err(DualContourError::InvalidRegularization(self.regularization));
        }
        if !(self.intersection_epsilon.is_finite() && self.intersection_epsilon >= 0.0) {
            return Err(DualContourError::InvalidIntersectionEpsilon(
                self.intersection_epsilon,
            ));
        }
        if !(self.gradient_step.is_finite() && self.gradient_step > 0.0) {
            return Err(DualContourError::InvalidGradientStep(self.gradient_step));
        }
        Ok(())
    }
}
