//! Arc Plane Solver
//!
//! Plans a circular arc between two oriented points whose supporting plane
//! may be oriented arbitrarily in 3-D. The arc is rotated into a frame where
//! its plane is horizontal, so it becomes a 2-D [`ArcSpec`] plus a constant
//! elevation.
//!
//! The first point's direction is the vector from that point to the arc
//! center; its length is the radius.

use crate::linearize::{linearize, ArcSpec};
use crate::orientation::resolve;
use crate::rotation::RotationMatrix;
use fivekit_core::{KinematicsError, OrientedPoint, Point2, Tolerance, Vector3, Winding};
use std::f64::consts::PI;

/// Default angular step: 5°
pub const DEFAULT_ARC_STEP: f64 = PI / 36.0;

/// Configuration for arc planning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPlannerConfig {
    /// Comparison tolerances. `linear` bounds coincident endpoints and
    /// radius mismatch; `angular` bounds the sine of the angle between the
    /// center-to-endpoint vectors below which the plane is degenerate.
    pub tolerance: Tolerance,
    /// Angular step in radians for the planned arc
    pub step: f64,
}

impl Default for ArcPlannerConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT,
            step: DEFAULT_ARC_STEP,
        }
    }
}

/// A planned arc: the planar arc in its own frame and the way back out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedArc {
    /// The arc in the rotated 2-D frame
    pub spec: ArcSpec,
    /// Constant third coordinate of the arc in the rotated frame
    pub elevation: f64,
    /// Unit normal of the arc plane in the machine frame
    pub normal: Vector3,
    /// Rotation taking machine coordinates into the rotated frame
    pub rotation: RotationMatrix,
}

impl PlannedArc {
    /// Linearized points in the rotated frame, with the elevation as `z`
    pub fn points(&self) -> impl Iterator<Item = Vector3> + '_ {
        let z = self.elevation;
        linearize(&self.spec).map(move |p| Vector3::new(p.x, p.y, z))
    }

    /// Linearized points rotated back into the machine frame
    pub fn machine_points(&self) -> impl Iterator<Item = Vector3> + '_ {
        let back = self.rotation.inverse();
        self.points().map(move |p| back.apply(&p))
    }

    /// The same arc traversed with `winding`
    pub fn with_winding(self, winding: Winding) -> Result<Self, KinematicsError> {
        let spec = &self.spec;
        Ok(Self {
            spec: ArcSpec::new(spec.start(), spec.end(), spec.center(), spec.step(), winding)?,
            ..self
        })
    }
}

/// Plans arcs with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct ArcPlanner {
    config: ArcPlannerConfig,
}

impl ArcPlanner {
    pub fn new(config: ArcPlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ArcPlannerConfig {
        &self.config
    }

    /// Plan the arc from `start` to `end`.
    ///
    /// The plane normal is `(c − start) × (c − end)` where `c` is the arc
    /// center, and `winding` is measured about that normal. The rotation
    /// maps the normal onto `+Z`: it is the inverse of the orientation
    /// resolver's rotation for the normal.
    pub fn plan(
        &self,
        start: &OrientedPoint,
        end: &Vector3,
        winding: Winding,
    ) -> Result<PlannedArc, KinematicsError> {
        let tol = &self.config.tolerance;
        if tol.points_equal(&start.position, end) {
            return Err(KinematicsError::IdenticalEndpoints);
        }

        let center = start.position + start.direction;
        let normal = plane_normal(&center, &start.position, end, tol)?;
        let rotation = resolve(&normal)?.rotation.inverse();

        let p1 = rotation.apply(&start.position);
        let p2 = rotation.apply(end);
        let c = rotation.apply(&center);

        let spec = ArcSpec::new(
            Point2::new(p1.x, p1.y),
            Point2::new(p2.x, p2.y),
            Point2::new(c.x, c.y),
            self.config.step,
            winding,
        )?;

        let mismatch = (spec.radius() - spec.end_radius()).abs();
        if mismatch > tol.linear {
            tracing::warn!(
                start_radius = spec.radius(),
                end_radius = spec.end_radius(),
                "arc endpoints are not equidistant from the center"
            );
        }

        tracing::debug!(
            radius = spec.radius(),
            sweep = spec.sweep(),
            elevation = c.z,
            "planned arc with normal ({:.4}, {:.4}, {:.4})",
            normal.x,
            normal.y,
            normal.z
        );

        Ok(PlannedArc {
            spec,
            elevation: c.z,
            normal,
            rotation,
        })
    }
}

fn plane_normal(
    center: &Vector3,
    start: &Vector3,
    end: &Vector3,
    tol: &Tolerance,
) -> Result<Vector3, KinematicsError> {
    let a = center - start;
    let b = center - end;
    let cross = a.cross(&b);
    let scale = a.norm() * b.norm();
    let norm = cross.norm();
    if !norm.is_finite() || scale <= 0.0 || norm <= tol.angular * scale {
        return Err(KinematicsError::DegenerateArcPlane);
    }
    Ok(cross / norm)
}

/// Plan the arc from `p1` to `p2` with the default tolerances.
///
/// Only the position of `p2` is used.
pub fn plan_arc(
    p1: &OrientedPoint,
    p2: &OrientedPoint,
    winding: Winding,
    step: f64,
) -> Result<PlannedArc, KinematicsError> {
    ArcPlanner::new(ArcPlannerConfig {
        tolerance: Tolerance::DEFAULT,
        step,
    })
    .plan(p1, &p2.position, winding)
}
