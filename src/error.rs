use thiserror::Error;

/// Errors reported by a [`Jordan`](crate::network::Jordan) network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The layer shape passed at construction is unusable.
    #[error("invalid network shape: {0}")]
    Configuration(String),

    /// A caller-supplied vector disagrees with the configured shape.
    #[error("expected a vector of length {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// `backward` was called without a preceding `forward` pass, so there
    /// are no activations to propagate the error through.
    #[error("backward called without a preceding forward pass")]
    NoForwardPass,
}
