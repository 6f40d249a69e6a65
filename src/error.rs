//! Error type shared by the step and meshing engines.

use thiserror::Error;

/// Errors raised by parameter validation. All are detected before any
/// field mutation happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LeniaError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("dimension mismatch: kernel has size {expected}, field has size {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("face {face} has {vertices} vertices, at least 3 are required")]
    DegenerateFace { face: usize, vertices: usize },
}

pub type Result<T> = std::result::Result<T, LeniaError>;

impl LeniaError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        LeniaError::InvalidParameter(msg.into())
    }
}
