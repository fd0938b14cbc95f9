//! Error types for DNA stretching simulations.

use thiserror::Error;

/// Unified error type for simulation setup and execution.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Chain must contain at least one segment
    #[error("chain length must be at least 1 segment, got {0}")]
    EmptyChain(usize),

    /// Block size outside [1, chain length]
    #[error("block size {block_size} is invalid for a chain of {chain_length} segments")]
    InvalidBlockSize {
        block_size: usize,
        chain_length: usize,
    },

    /// Temperature must be strictly positive
    #[error("temperature must be positive, got {0} K")]
    NonPositiveTemperature(f64),

    /// Convergence tolerance must be strictly positive
    #[error("convergence tolerance must be positive, got {0}")]
    NonPositiveTolerance(f64),

    /// Bounded run exhausted its iteration budget before the window settled
    #[error("no convergence after {0} Monte Carlo steps")]
    NotConverged(u64),

    /// I/O errors while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration deserialization errors
    #[error("configuration error: {0}")]
    Config(#[from] serde_yaml::Error),
}

/// Errors from the numerical optimization utilities.
#[derive(Error, Debug)]
pub enum OptimizeError {
    /// Newton iteration exhausted its budget
    #[error("Newton search did not converge within {0} iterations")]
    NoConvergence(usize),

    /// Second derivative or Hessian is singular at the current iterate
    #[error("curvature is singular at the current point, cannot take a Newton step")]
    SingularCurvature,
}

/// Errors from the worm-like-chain calibration fit.
#[derive(Error, Debug)]
pub enum FitError {
    /// Need at least as many data points as free parameters
    #[error("need at least {needed} data points for the fit, got {got}")]
    TooFewPoints { needed: usize, got: usize },

    /// Normal equations became singular
    #[error("normal equations are singular, fit cannot proceed")]
    SingularNormalEquations,

    /// Gauss-Newton exhausted its iteration budget
    #[error("fit did not converge within {0} iterations")]
    NoConvergence(usize),
}
