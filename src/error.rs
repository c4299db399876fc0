//! Error types for body dynamics.

use std::io;

use thiserror::Error;

/// A caller passed a value that would break the integrator's invariants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DynamicsError {
    /// Mass must be strictly positive and finite.
    #[error("invalid mass: {0} (must be positive and finite)")]
    InvalidMass(f64),

    /// Mass radius must be strictly positive and finite.
    #[error("invalid mass radius: {0} (must be positive and finite)")]
    InvalidMassRadius(f64),

    /// A configuration constant is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DynamicsError {
    /// Create an invalid config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Failure while saving or loading a body.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The stream ended before the field could be read.
    #[error("unexpected end of stream while reading {field}")]
    UnexpectedEof { field: &'static str },

    /// A boolean field held something other than 0 or 1.
    #[error("invalid boolean byte {value:#04x} for {field}")]
    InvalidBool { field: &'static str, value: u8 },

    /// A mass-like field was not strictly positive and finite.
    #[error("invalid {field}: {value}")]
    InvalidMass { field: &'static str, value: f64 },

    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}
