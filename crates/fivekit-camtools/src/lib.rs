//! # FiveKit CAM Tools
//!
//! Parametric generators producing oriented toolpath points for 5-axis
//! printing and machining.
//!
//! ## Generators Included
//!
//! - **Prism Walls**: square walls with the tool normal to each face
//! - **Extrusion**: a vertical column followed by a sideways extension
//!   printed with the tool tilted 90°
//! - **Sphere Shell**: rings of latitude over growing spherical layers with
//!   the tool along the sphere normal

pub mod error;
pub mod extrusion;
pub mod prism;
pub mod sphere;

pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use extrusion::{ExtrusionGenerator, ExtrusionParameters};
pub use prism::{PrismWallGenerator, PrismWallParameters};
pub use sphere::{SphereShellGenerator, SphereShellParameters};

use fivekit_core::{MotionCommand, MotionRecord, OrientedPoint};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Upper bound on generated layers per stage
pub const MAX_LAYERS: usize = 100_000;

/// Load generator parameters from a JSON file
pub fn load_parameters<T: DeserializeOwned>(path: &Path) -> CamToolResult<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Resolve generated points into five-axis records
pub fn to_records(
    points: &[OrientedPoint],
    command: MotionCommand,
) -> CamToolResult<Vec<MotionRecord>> {
    points
        .iter()
        .map(|p| fivekit_kinematics::to_motion_record(p, command).map_err(CamToolError::from))
        .collect()
}
