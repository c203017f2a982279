use fivekit_camtools::{
    load_parameters, to_records, CamToolError, PrismWallGenerator, PrismWallParameters,
    SphereShellGenerator, SphereShellParameters,
};
use fivekit_core::{MotionCommand, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_prism_records_face_each_wall() {
    let points = PrismWallGenerator::new(PrismWallParameters {
        side: 20.0,
        layer_height: 5.0,
    })
    .generate()
    .unwrap();
    let records = to_records(&points, MotionCommand::Linear).unwrap();
    assert_eq!(records.len(), 16);

    // every wall normal is horizontal
    for r in &records {
        let angles = r.angles.unwrap();
        assert!((angles.tilt - FRAC_PI_2).abs() < 1e-12);
    }
    let azimuths: Vec<f64> = records[..4]
        .iter()
        .map(|r| r.angles.unwrap().azimuth)
        .collect();
    assert!((azimuths[0] + FRAC_PI_2).abs() < 1e-12);
    assert!(azimuths[1].abs() < 1e-12);
    assert!((azimuths[2] - FRAC_PI_2).abs() < 1e-12);
    assert!((azimuths[3] - PI).abs() < 1e-12);
}

#[test]
fn test_sphere_records_resolve() {
    let points = SphereShellGenerator::new(SphereShellParameters {
        resolution: 2.0,
        layer_distance: 3.0,
        layer_height: 1.0,
        sphere_radius: 8.0,
        platform_height: 0.0,
        layers: 1,
        ring_offset_deg: 5.0,
    })
    .generate()
    .unwrap();
    let records = to_records(&points, MotionCommand::Linear).unwrap();
    assert_eq!(records.len(), points.len());
    for (point, record) in points.iter().zip(&records) {
        let angles = record.angles.unwrap();
        assert!(angles.in_canonical_range());
        // Tilt equals the polar angle of the point on the sphere
        let polar = (point.position.z / point.position.norm()).acos();
        assert!((angles.tilt - polar).abs() < 1e-9);
    }
}

#[test]
fn test_load_parameters_from_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prism.json");
    fs::write(&path, r#"{ "side": 12.0, "layer_height": 4.0 }"#).unwrap();

    let params: PrismWallParameters = load_parameters(&path).unwrap();
    assert_eq!(params.side, 12.0);
    let points = PrismWallGenerator::new(params).generate().unwrap();
    assert_eq!(points[4].position, Vector3::new(6.0, -6.0, 4.0));

    fs::write(&path, "{ not json").unwrap();
    let err = load_parameters::<PrismWallParameters>(&path).unwrap_err();
    assert!(matches!(err, CamToolError::SerializationError(_)));

    let err = load_parameters::<PrismWallParameters>(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, CamToolError::IoError(_)));
}

#[test]
fn test_partial_parameter_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sphere.json");
    fs::write(&path, r#"{ "layers": 3 }"#).unwrap();

    let params: SphereShellParameters = load_parameters(&path).unwrap();
    assert_eq!(params.layers, 3);
    assert_eq!(params.sphere_radius, 10.0);
}
