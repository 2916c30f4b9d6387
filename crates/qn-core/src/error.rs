//! Error types for qpnest

use thiserror::Error;

/// qpnest error type
#[derive(Error, Debug)]
pub enum Error {
    /// The ensemble names a parameterization outside the supported set
    #[error("Unsupported distribution type: {0}")]
    UnsupportedDistType(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
