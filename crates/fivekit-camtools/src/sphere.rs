//! Spherical shell printed as horizontal rings
//!
//! Each layer is a sphere slightly larger than the last. A layer is covered
//! by rings of latitude spaced `layer_distance` apart along the surface,
//! walked from the pole down to the equator on odd layers and back up on
//! even ones. Points along a ring are spaced `resolution` apart and the tool
//! follows the outward sphere normal.

use crate::error::{ParameterError, ParameterResult};
use fivekit_core::{OrientedPoint, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Rings smaller than this are skipped
const MIN_RING_RADIUS: f64 = 1e-9;

/// Upper bound on points per ring and rings per layer
const MAX_RING_POINTS: f64 = 100_000.0;

/// Parameters for the sphere shell generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereShellParameters {
    /// Distance between points along a ring (mm)
    pub resolution: f64,
    /// Distance between rings along the surface (mm)
    pub layer_distance: f64,
    /// Radial thickness of one layer (mm)
    pub layer_height: f64,
    /// Radius of the sphere printed on (mm)
    pub sphere_radius: f64,
    /// Height of the sphere center above the bed (mm)
    pub platform_height: f64,
    /// Number of layers
    pub layers: u32,
    /// Start angle advance between consecutive rings (degrees), so ring
    /// seams do not line up
    pub ring_offset_deg: f64,
}

impl Default for SphereShellParameters {
    fn default() -> Self {
        Self {
            resolution: 0.1,
            layer_distance: 0.2,
            layer_height: 0.2,
            sphere_radius: 10.0,
            platform_height: 0.0,
            layers: 20,
            ring_offset_deg: 1.0,
        }
    }
}

impl SphereShellParameters {
    pub fn validate(&self) -> ParameterResult<()> {
        ParameterError::require_positive("resolution", self.resolution)?;
        ParameterError::require_positive("layer_distance", self.layer_distance)?;
        ParameterError::require_positive("layer_height", self.layer_height)?;
        ParameterError::require_positive("sphere_radius", self.sphere_radius)?;
        ParameterError::require_finite("platform_height", self.platform_height)?;
        ParameterError::require_finite("ring_offset_deg", self.ring_offset_deg)?;
        ParameterError::require_range("layers", f64::from(self.layers), 1.0, 10_000.0)?;

        // spacing is measured along the outermost sphere
        let finest = 2.0 * PI * self.layer_radius(self.layers) / MAX_RING_POINTS;
        ParameterError::require_range("resolution", self.resolution, finest, f64::MAX)?;
        ParameterError::require_range("layer_distance", self.layer_distance, finest, f64::MAX)
    }

    /// Radius of the sphere for `layer` (1-based)
    pub fn layer_radius(&self, layer: u32) -> f64 {
        self.sphere_radius + self.layer_height * f64::from(layer)
    }
}

/// Generator for spherical shells
pub struct SphereShellGenerator {
    params: SphereShellParameters,
}

impl SphereShellGenerator {
    pub fn new(params: SphereShellParameters) -> Self {
        Self { params }
    }

    /// Polar angles (degrees from the pole) of the rings on one layer
    fn ring_angles(&self, radius: f64, descending: bool) -> Vec<f64> {
        // arc length layer_distance on a sphere of this radius
        let step = (180.0 * self.params.layer_distance) / (PI * radius);
        let count = (90.0 / step + 1e-9).floor() as usize;
        let mut angles: Vec<f64> = (1..=count).map(|k| k as f64 * step).collect();
        if descending {
            angles.reverse();
        }
        angles
    }

    fn push_ring(
        &self,
        sphere: f64,
        polar_deg: f64,
        start_deg: f64,
        out: &mut Vec<OrientedPoint>,
    ) {
        let polar = polar_deg.to_radians();
        let ring = sphere * polar.sin();
        if ring < MIN_RING_RADIUS {
            return;
        }
        let z = sphere * polar.cos();
        let step = (180.0 * self.params.resolution) / (PI * ring);
        let count = (360.0 / step + 1e-9).floor() as usize + 1;

        for k in 0..count {
            let c = (start_deg + k as f64 * step).to_radians();
            let (x, y) = (ring * c.sin(), ring * c.cos());
            out.push(OrientedPoint::new(
                Vector3::new(x, y, z + self.params.platform_height),
                Vector3::new(x, y, z) / sphere,
            ));
        }
    }

    /// Every ring of every layer in print order
    pub fn generate(&self) -> ParameterResult<Vec<OrientedPoint>> {
        let p = &self.params;
        p.validate()?;

        let mut points = Vec::new();
        let mut start = 0.0;
        let mut rings = 0usize;

        for layer in 1..=p.layers {
            let radius = p.layer_radius(layer);
            let descending = layer % 2 == 0;
            for polar in self.ring_angles(radius, descending) {
                self.push_ring(radius, polar, start, &mut points);
                rings += 1;
                start = (start + p.ring_offset_deg).rem_euclid(360.0);
            }
        }

        tracing::debug!(
            layers = p.layers,
            rings,
            points = points.len(),
            "generated sphere shell"
        );
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SphereShellParameters {
        SphereShellParameters {
            resolution: 1.0,
            layer_distance: 2.0,
            layer_height: 0.5,
            sphere_radius: 5.0,
            platform_height: 3.0,
            layers: 2,
            ring_offset_deg: 10.0,
        }
    }

    #[test]
    fn test_points_lie_on_layer_spheres() {
        let params = small();
        let points = SphereShellGenerator::new(params.clone()).generate().unwrap();
        assert!(!points.is_empty());
        let center = Vector3::new(0.0, 0.0, params.platform_height);
        for p in &points {
            let r = (p.position - center).norm();
            let on_layer =
                (r - params.layer_radius(1)).abs() < 1e-9 || (r - params.layer_radius(2)).abs() < 1e-9;
            assert!(on_layer, "radius {r}");
            // outward unit normal
            assert!((p.direction.norm() - 1.0).abs() < 1e-12);
            assert!(((p.position - center) / r - p.direction).norm() < 1e-9);
            assert!(p.position.z >= params.platform_height - 1e-9);
        }
    }

    #[test]
    fn test_layers_alternate_direction() {
        let gen = SphereShellGenerator::new(small());
        let up = gen.ring_angles(5.5, false);
        let down = gen.ring_angles(6.0, true);
        assert!(up.windows(2).all(|w| w[0] < w[1]));
        assert!(down.windows(2).all(|w| w[0] > w[1]));
        assert!(up.iter().chain(&down).all(|a| *a > 0.0 && *a <= 90.0 + 1e-9));
    }

    #[test]
    fn test_ring_closes() {
        let gen = SphereShellGenerator::new(small());
        let mut ring = Vec::new();
        gen.push_ring(5.0, 90.0, 0.0, &mut ring);
        // circumference 10π at resolution 1 gives 31 steps plus the start
        assert_eq!(ring.len(), 32);
        assert!((ring[0].position - Vector3::new(0.0, 5.0, 3.0)).norm() < 1e-9);
    }

    #[test]
    fn test_rejects_spacing_too_fine_for_radius() {
        let params = SphereShellParameters {
            resolution: 1e-300,
            ..small()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::OutOfRange { ref name, .. }) if name == "resolution"
        ));

        let params = SphereShellParameters {
            layer_distance: 1e-6,
            ..small()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::OutOfRange { ref name, .. }) if name == "layer_distance"
        ));

        let params = SphereShellParameters {
            layer_height: 1e305,
            ..small()
        };
        assert!(params.validate().is_err());

        assert!(SphereShellParameters::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_layers() {
        let gen = SphereShellGenerator::new(SphereShellParameters {
            layers: 0,
            ..small()
        });
        assert!(matches!(
            gen.generate(),
            Err(ParameterError::OutOfRange { .. })
        ));
    }
}
