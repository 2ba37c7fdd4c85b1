//! Error types for the Cubetex engine
//!
//! This module defines the error types used throughout the engine,
//! including device access, texture allocation and upload validation.

use std::fmt;

/// Result type for Cubetex engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Cubetex engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, WebGL, etc.)
    BackendError(String),

    /// Invalid resource (texture, image, handle, etc.)
    InvalidResource(String),

    /// The device could not allocate a native object
    AllocationFailed(String),

    /// Caller supplied inconsistent or incomplete input
    ContractViolation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::AllocationFailed(msg) => write!(f, "Allocation failed: {}", msg),
            Error::ContractViolation(msg) => write!(f, "Contract violation: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
