//! Error handling for FiveKit
//!
//! Provides error types for the layers of the toolkit:
//! - Kinematics errors (malformed geometric input)
//! - G-Code errors (parsing and line processing)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Kinematics error type
///
/// Every variant signals malformed geometric input rather than a
/// transient failure, so none of them is worth retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Direction vector has zero magnitude and therefore no orientation
    #[error("Degenerate direction: vector has zero magnitude")]
    DegenerateDirection,

    /// Rotation axis has zero magnitude
    #[error("Degenerate rotation axis")]
    DegenerateRotationAxis,

    /// Arc start and end positions coincide
    #[error("Arc start and end points are identical")]
    IdenticalEndpoints,

    /// Arc plane normal is undefined (collinear center and endpoints)
    #[error("Degenerate arc plane: center and endpoints are collinear")]
    DegenerateArcPlane,

    /// Angular step is not strictly positive
    #[error("Invalid angular step {step}: must be > 0")]
    InvalidStep {
        /// The rejected step in radians.
        step: f64,
    },
}

/// G-Code error type
///
/// Represents errors related to G-Code parsing and line processing.
#[derive(Error, Debug, Clone)]
pub enum GcodeError {
    /// A word could not be split into a letter and a number
    #[error("Invalid word '{word}' at line {line_number}")]
    InvalidWord {
        /// The line number where the word was found.
        line_number: u32,
        /// The offending word.
        word: String,
    },

    /// Geometric failure while converting a line
    #[error("Kinematics error at line {line_number}: {source}")]
    Kinematics {
        /// The line number being converted.
        line_number: u32,
        /// The underlying kinematics failure.
        #[source]
        source: KinematicsError,
    },

    /// File does not have enough lines for the requested header and footer
    #[error("File has {lines} lines, needs more than {required} (header + footer)")]
    TooFewLines {
        /// Number of lines present.
        lines: usize,
        /// Header plus footer line count.
        required: usize,
    },

    /// Generic G-Code error
    #[error("G-Code error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for FiveKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Kinematics error
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),

    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a kinematics error, directly or wrapped in a G-Code error
    pub fn is_kinematics_error(&self) -> bool {
        matches!(
            self,
            Error::Kinematics(_) | Error::Gcode(GcodeError::Kinematics { .. })
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
