use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    /// Provider and scorer disagree on vector length. Indicates a wiring bug.
    #[error("dimension mismatch: left has {left} components, right has {right}")]
    DimensionMismatch { left: usize, right: usize },
}
