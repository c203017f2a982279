//! Tolerance constants for geometric comparisons.

use super::{Point2, Vector3};
use serde::{Deserialize, Serialize};

/// Linear and angular tolerances used by the kinematics kernel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 mm linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Create a tolerance pair
    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    /// Check if two positions are coincident within tolerance.
    pub fn points_equal(&self, a: &Vector3, b: &Vector3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if two planar points are coincident within tolerance.
    pub fn points2_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
