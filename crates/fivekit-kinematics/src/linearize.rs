//! Arc Linearizer
//!
//! Discretizes a planar circular arc into a lazy sequence of points spaced
//! by a fixed angular step.

use fivekit_core::{KinematicsError, Point2, Tolerance, Winding};
use std::f64::consts::TAU;
use std::iter::FusedIterator;

/// Slack applied when counting steps so an exact multiple of the step does
/// not produce a sliver segment.
const STEP_COUNT_SLACK: f64 = 1e-9;

/// Largest number of segments a single arc may be split into
pub const MAX_ARC_SEGMENTS: usize = 1_000_000;

/// A circular arc in a 2-D plane frame
///
/// Construction validates the arc, so every `ArcSpec` can be linearized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    start: Point2,
    end: Point2,
    center: Point2,
    step: f64,
    winding: Winding,
}

impl ArcSpec {
    /// Create an arc from `start` to `end` around `center`.
    ///
    /// `step` is the angular increment in radians. Fails with
    /// [`KinematicsError::InvalidStep`] unless it is finite, `> 0` and
    /// coarse enough to split the arc into at most [`MAX_ARC_SEGMENTS`]
    /// segments, and with [`KinematicsError::IdenticalEndpoints`] when start
    /// and end coincide.
    pub fn new(
        start: Point2,
        end: Point2,
        center: Point2,
        step: f64,
        winding: Winding,
    ) -> Result<Self, KinematicsError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(KinematicsError::InvalidStep { step });
        }
        if Tolerance::DEFAULT.points2_equal(&start, &end) {
            return Err(KinematicsError::IdenticalEndpoints);
        }
        let spec = Self {
            start,
            end,
            center,
            step,
            winding,
        };
        if spec.sweep().abs() / step > MAX_ARC_SEGMENTS as f64 {
            return Err(KinematicsError::InvalidStep { step });
        }
        Ok(spec)
    }

    pub fn start(&self) -> Point2 {
        self.start
    }

    pub fn end(&self) -> Point2 {
        self.end
    }

    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Angular step in radians
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Distance from the center to the start point
    pub fn radius(&self) -> f64 {
        (self.start - self.center).norm()
    }

    /// Distance from the center to the end point
    pub fn end_radius(&self) -> f64 {
        (self.end - self.center).norm()
    }

    /// Angle of the start point about the center, in `(−π, π]`
    pub fn start_angle(&self) -> f64 {
        let d = self.start - self.center;
        d.y.atan2(d.x)
    }

    /// Angle of the end point about the center, in `(−π, π]`
    pub fn end_angle(&self) -> f64 {
        let d = self.end - self.center;
        d.y.atan2(d.x)
    }

    /// Signed angle swept from start to end.
    ///
    /// Positive for counter-clockwise arcs and negative for clockwise ones,
    /// with magnitude in `(0, 2π]`. Coincident start and end angles (a
    /// spiral back to the same bearing) sweep a full turn.
    pub fn sweep(&self) -> f64 {
        let delta = self.end_angle() - self.start_angle();
        match self.winding {
            Winding::Ccw if delta <= 0.0 => delta + TAU,
            Winding::Cw if delta >= 0.0 => delta - TAU,
            _ => delta,
        }
    }

    /// Number of straight segments [`linearize`] will produce
    pub fn segment_count(&self) -> usize {
        let steps = (self.sweep().abs() / self.step - STEP_COUNT_SLACK).ceil();
        // Bounded by MAX_ARC_SEGMENTS through `new`
        (steps as usize).max(1)
    }
}

/// Lazy point sequence along an arc, ending exactly on the arc's end point
#[derive(Debug, Clone)]
pub struct ArcPoints {
    center: Point2,
    radius: f64,
    start_angle: f64,
    delta: f64,
    end: Point2,
    segments: usize,
    index: usize,
}

impl Iterator for ArcPoints {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        let i = self.index;
        if i > self.segments {
            return None;
        }
        self.index += 1;
        if i == self.segments {
            return Some(self.end);
        }
        let theta = self.start_angle + self.delta * i as f64;
        Some(Point2::new(
            self.center.x + self.radius * theta.cos(),
            self.center.y + self.radius * theta.sin(),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.segments + 1).saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArcPoints {}

impl FusedIterator for ArcPoints {}

/// Linearize an arc.
///
/// Starts at the start angle and advances by `step` in the winding's
/// direction while the running angle has not passed the end angle, then
/// yields the end point exactly. Always yields at least two points, and the
/// same `ArcSpec` always yields the same sequence.
///
/// Intermediate points lie on the start radius. An end point off that
/// radius is still reached exactly by the final segment.
pub fn linearize(spec: &ArcSpec) -> ArcPoints {
    let segments = spec.segment_count();
    tracing::trace!(
        sweep = spec.sweep(),
        segments,
        winding = %spec.winding,
        "linearizing arc"
    );
    ArcPoints {
        center: spec.center,
        radius: spec.radius(),
        start_angle: spec.start_angle(),
        delta: spec.step * spec.winding.signum(),
        end: spec.end,
        segments,
        index: 0,
    }
}
