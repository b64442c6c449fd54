/// Errors raised by the numeric core
use thiserror::Error;

/// Lengths below this magnitude are treated as zero.
pub const EPSILON: f32 = 1e-6;

/// Determinants below this magnitude are treated as zero.
///
/// A 4x4 determinant scales with the fourth power of a uniform scale, so it
/// needs a much smaller floor than a length does.
pub const DETERMINANT_EPSILON: f32 = 1e-20;

/// Degenerate input to a numeric operation.
///
/// Both variants are local to the frame that produced them: scene parameters
/// are never derived from a failed result, so the next frame starts clean.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    #[error("cannot normalize a vector of length {length}")]
    DegenerateVector { length: f32 },
    #[error("matrix is singular (determinant {determinant})")]
    SingularMatrix { determinant: f32 },
}

pub type MathResult<T> = Result<T, MathError>;
