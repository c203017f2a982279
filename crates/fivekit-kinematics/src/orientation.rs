//! Orientation Resolver
//!
//! Turns a tool direction into the rotary angles of a tilt/azimuth head and
//! the rotation that maps the canonical tool axis `(0, 0, 1)` onto that
//! direction.

use crate::rotation::{build, normalized, RotationMatrix};
use fivekit_core::{
    KinematicsError, MotionCommand, MotionRecord, OrientedPoint, RotaryAngles, Vector3,
};
use std::f64::consts::PI;

/// Output of [`resolve`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOrientation {
    /// Rotary axis commands
    pub angles: RotaryAngles,
    /// Rotation with `rotation · (0,0,1) = direction / |direction|`
    pub rotation: RotationMatrix,
}

/// Resolve a direction into rotary angles and the tilted-frame rotation.
///
/// - `tilt = arccos(nz)` with the argument clamped to `[-1, 1]`
/// - `azimuth = atan2(ny, nx)`, folded into `(−π, π]`
///
/// A direction on the pole (`nx = ny = 0`) resolves to azimuth `0`; the
/// azimuth is meaningless there and no special case is made.
///
/// Fails with [`KinematicsError::DegenerateDirection`] for a zero vector.
pub fn resolve(direction: &Vector3) -> Result<ResolvedOrientation, KinematicsError> {
    let n = normalized(direction).ok_or(KinematicsError::DegenerateDirection)?;

    let tilt = n.z.clamp(-1.0, 1.0).acos();
    // Adding +0.0 turns -0.0 into +0.0 so atan2 never lands on -π.
    let mut azimuth = (n.y + 0.0).atan2(n.x + 0.0);
    if azimuth <= -PI {
        azimuth += 2.0 * PI;
    }

    // Tilt about Y is applied first, then azimuth about Z.
    let ry = build(&Vector3::y(), tilt)?;
    let rz = build(&Vector3::z(), azimuth)?;
    let rotation = rz * ry;

    tracing::trace!(
        tilt,
        azimuth,
        "resolved direction ({:.4}, {:.4}, {:.4})",
        n.x,
        n.y,
        n.z
    );

    Ok(ResolvedOrientation {
        angles: RotaryAngles::new(tilt, azimuth),
        rotation,
    })
}

/// Re-express `position` in the frame given by `rotation`.
pub fn transform_position(position: &Vector3, rotation: &RotationMatrix) -> Vector3 {
    rotation.apply(position)
}

/// Resolve an oriented point into the record a 5-axis controller consumes.
pub fn to_motion_record(
    point: &OrientedPoint,
    command: MotionCommand,
) -> Result<MotionRecord, KinematicsError> {
    let resolved = resolve(&point.direction)?;
    let position = transform_position(&point.position, &resolved.rotation);
    Ok(MotionRecord::oriented(command, position, resolved.angles))
}
