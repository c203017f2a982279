//! Square prism walls with the tool normal to each face

use crate::error::{ParameterError, ParameterResult};
use crate::MAX_LAYERS;
use fivekit_core::{OrientedPoint, Vector3};
use serde::{Deserialize, Serialize};

/// Parameters for the prism wall generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismWallParameters {
    /// Side length of the square, centered on the origin (mm)
    pub side: f64,
    /// Height between layers (mm); layers run from z = 0 while below `side`
    pub layer_height: f64,
}

impl Default for PrismWallParameters {
    fn default() -> Self {
        Self {
            side: 50.0,
            layer_height: 10.0,
        }
    }
}

impl PrismWallParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        ParameterError::require_positive("side", self.side)?;
        ParameterError::require_positive("layer_height", self.layer_height)?;
        ParameterError::require_range(
            "layer_height",
            self.layer_height,
            self.side / MAX_LAYERS as f64,
            f64::MAX,
        )
    }

    /// Number of layers: heights `k · layer_height` below `side`
    pub fn layer_count(&self) -> usize {
        (self.side / self.layer_height - 1e-9).ceil().max(1.0) as usize
    }
}

/// Generator for prism walls
pub struct PrismWallGenerator {
    params: PrismWallParameters,
}

impl PrismWallGenerator {
    pub fn new(params: PrismWallParameters) -> Self {
        Self { params }
    }

    /// Corners of every layer, counter-clockwise from `(+s/2, −s/2)`.
    ///
    /// Each corner's direction is the outward normal of the face that
    /// starts there, so the tool stays square to the wall it is about to
    /// trace.
    pub fn generate(&self) -> ParameterResult<Vec<OrientedPoint>> {
        self.params.validate()?;
        let h = self.params.side / 2.0;
        let corners = [
            (h, -h, -Vector3::y()),
            (h, h, Vector3::x()),
            (-h, h, Vector3::y()),
            (-h, -h, -Vector3::x()),
        ];

        let layers = self.params.layer_count();
        let mut points = Vec::with_capacity(layers * corners.len());
        for layer in 0..layers {
            let z = layer as f64 * self.params.layer_height;
            for (x, y, normal) in &corners {
                points.push(OrientedPoint::new(Vector3::new(*x, *y, z), *normal));
            }
        }

        tracing::debug!(layers, points = points.len(), "generated prism walls");
        Ok(points)
    }
}
