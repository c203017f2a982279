//! # FiveKit Kinematics
//!
//! The geometric kernel of FiveKit. Every operation is a pure function of
//! its arguments: nothing is cached between calls, so independent threads
//! can resolve orientations or plan arcs without coordination.
//!
//! - **Rotation Builder**: axis-angle to rotation matrix ([`rotation::build`])
//! - **Orientation Resolver**: tool direction to tilt/azimuth plus the tilted
//!   frame rotation ([`orientation::resolve`])
//! - **Arc Plane Solver**: two oriented points to a planar arc in the arc's
//!   own frame ([`arc_plane::plan_arc`])
//! - **Arc Linearizer**: planar arc to a lazy sequence of points
//!   ([`linearize::linearize`])

pub mod arc_plane;
pub mod linearize;
pub mod orientation;
pub mod rotation;

pub use arc_plane::{plan_arc, ArcPlanner, ArcPlannerConfig, PlannedArc, DEFAULT_ARC_STEP};
pub use linearize::{linearize, ArcPoints, ArcSpec, MAX_ARC_SEGMENTS};
pub use orientation::{resolve, to_motion_record, transform_position, ResolvedOrientation};
pub use rotation::{build, RotationMatrix};

pub use fivekit_core::KinematicsError;

/// Result type for kinematics operations
pub type KinematicsResult<T> = Result<T, KinematicsError>;
