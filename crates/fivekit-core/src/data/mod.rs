//! Data models for oriented toolpath points and emitted motion
//!
//! This module provides:
//! - `Vector3` / `Point2` aliases over nalgebra
//! - Oriented points (position + tool direction)
//! - Rotary-axis angle pairs (tilt, azimuth)
//! - Arc winding selection
//! - Motion records handed to the G-code emitter
//! - Geometric tolerances

pub mod tolerance;

pub use tolerance::Tolerance;

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// A vector in 3D space.
///
/// Used both as a position and as a direction. No type distinguishes the
/// two roles, so the caller tracks which one a given value plays.
pub type Vector3 = nalgebra::Vector3<f64>;

/// A point in a 2D plane frame.
pub type Point2 = nalgebra::Point2<f64>;

/// One sample along a toolpath: where the tool is and where it points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedPoint {
    /// Tool tip position in the machine frame
    pub position: Vector3,
    /// Tool axis or surface normal (not necessarily normalized)
    pub direction: Vector3,
}

impl OrientedPoint {
    /// Create an oriented point from a position and a direction
    pub fn new(position: Vector3, direction: Vector3) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Create an oriented point from raw `X Y Z I J K` components
    pub fn from_components(x: f64, y: f64, z: f64, i: f64, j: f64, k: f64) -> Self {
        Self::new(Vector3::new(x, y, z), Vector3::new(i, j, k))
    }
}

impl fmt::Display for OrientedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X:{:.3} Y:{:.3} Z:{:.3} I:{:.3} J:{:.3} K:{:.3}",
            self.position.x,
            self.position.y,
            self.position.z,
            self.direction.x,
            self.direction.y,
            self.direction.z
        )
    }
}

/// The two rotary-axis commands reproducing a tool direction
///
/// Both angles are in radians. `tilt` lies in `[0, π]` and `azimuth`
/// in `(−π, π]` whenever the pair comes out of the orientation resolver.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotaryAngles {
    /// Angle between the tool axis and +Z
    pub tilt: f64,
    /// Angle of the tool axis projection in the XY plane, measured from +X
    pub azimuth: f64,
}

impl RotaryAngles {
    /// Create an angle pair (radians)
    pub fn new(tilt: f64, azimuth: f64) -> Self {
        Self { tilt, azimuth }
    }

    /// Whether both angles fall inside the resolver's output ranges
    pub fn in_canonical_range(&self) -> bool {
        (0.0..=PI).contains(&self.tilt) && self.azimuth > -PI && self.azimuth <= PI
    }
}

/// Rotational sense in which an arc is traversed from start to end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winding {
    /// Clockwise (angle decreases)
    Cw,
    /// Counter-clockwise (angle increases)
    Ccw,
}

impl Winding {
    /// The opposite rotational sense
    pub fn reversed(self) -> Self {
        match self {
            Self::Cw => Self::Ccw,
            Self::Ccw => Self::Cw,
        }
    }

    /// `+1.0` for counter-clockwise, `-1.0` for clockwise
    pub fn signum(self) -> f64 {
        match self {
            Self::Cw => -1.0,
            Self::Ccw => 1.0,
        }
    }
}

impl fmt::Display for Winding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cw => write!(f, "CW"),
            Self::Ccw => write!(f, "CCW"),
        }
    }
}

/// Motion command tag written in front of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionCommand {
    /// Rapid positioning (G00)
    Rapid,
    /// Linear feed move (G01)
    Linear,
}

impl MotionCommand {
    /// The G-code word for this command
    pub fn code(&self) -> &'static str {
        match self {
            Self::Rapid => "G00",
            Self::Linear => "G01",
        }
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The unit written to the outbound G-code stream
///
/// An oriented record carries rotary angles alongside the position; a
/// plain linear segment carries only the position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionRecord {
    /// Rapid or linear move
    pub command: MotionCommand,
    /// Position in the commanded frame
    pub position: Vector3,
    /// Rotary axes, absent for plain linear segments
    pub angles: Option<RotaryAngles>,
}

impl MotionRecord {
    /// Record for an oriented point
    pub fn oriented(command: MotionCommand, position: Vector3, angles: RotaryAngles) -> Self {
        Self {
            command,
            position,
            angles: Some(angles),
        }
    }

    /// Record for a plain linear segment
    pub fn linear(position: Vector3) -> Self {
        Self {
            command: MotionCommand::Linear,
            position,
            angles: None,
        }
    }

    /// Whether the record commands the rotary axes
    pub fn is_oriented(&self) -> bool {
        self.angles.is_some()
    }
}
