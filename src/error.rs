use thiserror::Error;

/// Everything that can go wrong while building or applying a perspective map.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    /// The linear system has no unique solution (collinear or coincident
    /// corners, or a matrix that cannot be inverted).
    #[error("matrix is singular")]
    SingularMatrix,

    /// A mapping was requested before any successful recalculation.
    #[error("coordinate mapper has no valid transform")]
    MapperNotReady,

    /// The point lands on the line at infinity under the current transform.
    #[error("point projects to infinity (w = {w})")]
    DegenerateProjection { w: f64 },

    #[error("linear system shape mismatch: expected {expected} entries, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("need at least 4 points to build a quad, got {got}")]
    InsufficientPoints { got: usize },

    #[error("invalid mapper config: {0}")]
    InvalidConfig(String),
}
