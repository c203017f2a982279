//! Rotation Builder
//!
//! Axis-angle rotations via Rodrigues' formula. Compound rotations are
//! ordinary matrix products of builder outputs (`a * b` applies `b` first);
//! each call site states the order it relies on.

use fivekit_core::{KinematicsError, Vector3};
use nalgebra::Matrix3;
use std::ops::Mul;

/// Vectors shorter than this have no usable direction.
pub(crate) const MIN_AXIS_NORM: f64 = 1e-12;

/// Normalize `v`, or `None` when it is too short or not finite.
pub(crate) fn normalized(v: &Vector3) -> Option<Vector3> {
    let norm = v.norm();
    if norm.is_finite() && norm > MIN_AXIS_NORM {
        Some(v / norm)
    } else {
        None
    }
}

/// An orthonormal 3×3 transform
///
/// Only [`build`] and products of its outputs create one, so every value
/// is a proper rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix(Matrix3<f64>);

impl RotationMatrix {
    /// The underlying matrix
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.0
    }

    /// Apply the rotation to a vector
    pub fn apply(&self, v: &Vector3) -> Vector3 {
        self.0 * v
    }

    /// The inverse rotation (the transpose, since the matrix is orthonormal)
    pub fn inverse(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Check `Rᵀ·R = I` and `det R = 1` within `eps`
    pub fn is_orthonormal(&self, eps: f64) -> bool {
        let gram = self.0.transpose() * self.0;
        (gram - Matrix3::identity()).amax() < eps && (self.0.determinant() - 1.0).abs() < eps
    }

    /// Element-wise comparison against the identity within `eps`
    pub fn is_identity(&self, eps: f64) -> bool {
        (self.0 - Matrix3::identity()).amax() < eps
    }
}

impl Mul for RotationMatrix {
    type Output = RotationMatrix;

    /// Matrix product; the right-hand rotation is applied first.
    fn mul(self, rhs: RotationMatrix) -> RotationMatrix {
        RotationMatrix(self.0 * rhs.0)
    }
}

/// Build the rotation of `angle` radians about `axis`.
///
/// `axis` does not need to be normalized, but it must have a usable
/// length; zero, tiny or non-finite axes fail with
/// [`KinematicsError::DegenerateRotationAxis`].
///
/// Computes `I + sin(angle)·K + (1 − cos(angle))·K²` where `K` is the
/// cross-product matrix of the unit axis. `angle = 0` yields the identity
/// exactly.
pub fn build(axis: &Vector3, angle: f64) -> Result<RotationMatrix, KinematicsError> {
    let unit = normalized(axis).ok_or(KinematicsError::DegenerateRotationAxis)?;
    let k = unit.cross_matrix();
    let (s, c) = angle.sin_cos();
    Ok(RotationMatrix(
        Matrix3::identity() + k * s + (k * k) * (1.0 - c),
    ))
}
