//! Error types for the head movement media control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The perspective pose solve did not converge
    #[error("pose solve failed: {0}")]
    PoseSolveFailed(String),

    /// The upstream landmark provider found no face
    #[error("no face detected")]
    NoFaceDetected,

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// `X11` connection or protocol error
    #[error("X11 error: {0}")]
    X11(String),

    /// Media command dispatch failed
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// Landmark trace parsing or replay error
    #[error("trace error: {0}")]
    Trace(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
