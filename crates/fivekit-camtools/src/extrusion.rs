//! Square column with a sideways extrusion printed on top
//!
//! The base layers are printed with the tool vertical. After a rapid move
//! the tool is tilted 90° and the extension layers are printed from the top
//! of the base, so the second stage builds sideways.

use crate::error::{ParameterError, ParameterResult};
use crate::MAX_LAYERS;
use fivekit_core::{MotionCommand, MotionRecord, RotaryAngles, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Parameters for the extrusion generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrusionParameters {
    /// Side of the square base, which is also its height (mm)
    pub base_side: f64,
    /// Side of the square the reposition move targets (mm)
    pub offset: f64,
    /// Height of the tilted extension (mm)
    pub height: f64,
    /// Layer height for both stages (mm)
    pub layer_height: f64,
}

impl Default for ExtrusionParameters {
    fn default() -> Self {
        Self {
            base_side: 10.0,
            offset: 5.0,
            height: 5.0,
            layer_height: 1.0,
        }
    }
}

impl ExtrusionParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        ParameterError::require_positive("base_side", self.base_side)?;
        ParameterError::require_positive("offset", self.offset)?;
        ParameterError::require_positive("height", self.height)?;
        ParameterError::require_positive("layer_height", self.layer_height)?;
        let tallest = self.base_side.max(self.height);
        ParameterError::require_range(
            "layer_height",
            self.layer_height,
            tallest / MAX_LAYERS as f64,
            f64::MAX,
        )
    }
}

/// Generator for the two-stage extrusion
pub struct ExtrusionGenerator {
    params: ExtrusionParameters,
}

impl ExtrusionGenerator {
    pub fn new(params: ExtrusionParameters) -> Self {
        Self { params }
    }

    fn square(h: f64, z: f64, angles: RotaryAngles, out: &mut Vec<MotionRecord>) {
        for (x, y) in [(h, -h), (h, h), (-h, h), (-h, -h)] {
            out.push(MotionRecord::oriented(
                MotionCommand::Linear,
                Vector3::new(x, y, z),
                angles,
            ));
        }
    }

    /// Positions are in the machine frame; the angles carry the tilt.
    pub fn generate(&self) -> ParameterResult<Vec<MotionRecord>> {
        let p = &self.params;
        p.validate()?;
        let h = p.base_side / 2.0;
        let upright = RotaryAngles::new(0.0, 0.0);
        let tilted = RotaryAngles::new(FRAC_PI_2, 0.0);

        let mut records = Vec::new();

        // Base: heights below base_side
        let base_layers = (p.base_side / p.layer_height - 1e-9).ceil().max(1.0) as usize;
        for layer in 0..base_layers {
            Self::square(h, layer as f64 * p.layer_height, upright, &mut records);
        }

        records.push(MotionRecord::oriented(
            MotionCommand::Rapid,
            Vector3::new(-p.offset / 2.0, -p.offset / 2.0, p.base_side),
            tilted,
        ));

        // Extension: heights up to and including `height` above the base
        let extension_layers = (p.height / p.layer_height + 1e-9).floor() as usize + 1;
        for layer in 0..extension_layers {
            let z = p.base_side + layer as f64 * p.layer_height;
            Self::square(h, z, tilted, &mut records);
        }

        tracing::debug!(
            base_layers,
            extension_layers,
            records = records.len(),
            "generated extrusion"
        );
        Ok(records)
    }
}
