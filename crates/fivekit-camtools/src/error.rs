//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for generator parameter
//! validation and toolpath generation.

use fivekit_core::KinematicsError;
use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// A generated point could not be resolved into a motion record.
    #[error("Kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),

    /// I/O error while reading a parameter file.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Errors related to generator parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

impl ParameterError {
    /// Require `value` to be finite and strictly positive
    pub fn require_positive(name: &str, value: f64) -> ParameterResult<()> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::InvalidValue {
                name: name.to_string(),
                reason: format!("{value} is not a positive number"),
            })
        }
    }

    /// Require `value` to be finite
    pub fn require_finite(name: &str, value: f64) -> ParameterResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::InvalidValue {
                name: name.to_string(),
                reason: format!("{value} is not finite"),
            })
        }
    }

    /// Require `value` to lie in `min..=max`
    pub fn require_range(name: &str, value: f64, min: f64, max: f64) -> ParameterResult<()> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::OutOfRange {
                name: name.to_string(),
                value,
                min,
                max,
            })
        }
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
