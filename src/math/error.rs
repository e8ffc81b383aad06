//! Error types for the math core

use thiserror::Error;

/// Errors raised where a transform cannot be computed from its inputs
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    /// Inversion of a matrix whose determinant is exactly zero
    #[error("Matrix is singular (determinant {determinant}) and cannot be inverted")]
    SingularMatrix { determinant: f32 },

    /// A zero-length vector was given where a unit direction is required
    #[error("Degenerate direction: {0}")]
    DegenerateDirection(&'static str),
}

pub type Result<T> = std::result::Result<T, MathError>;
