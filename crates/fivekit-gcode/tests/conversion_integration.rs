use fivekit_core::{AngleUnit, Error, GcodeError};
use fivekit_gcode::{five_axis_pipeline, RecordEmitter, RescaleFilter};
use fivekit_kinematics::ArcPlanner;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_convert_mixed_program() {
    let program = "\
; generated by mesh extraction
G21
G01 X0.000 Y0.000 Z5.000 I0.000 J0.000 K1.000
G01 X0.000 Y0.000 Z5.000 I1.000 J0.000 K0.000
G00 X10 Y0 Z0
G01 X0 Y10 Z0
M02
";
    let pipeline = five_axis_pipeline(true, ArcPlanner::default());
    let out = pipeline.convert(program, &RecordEmitter::default()).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(
        lines,
        vec![
            "; generated by mesh extraction",
            "G21",
            "G01 X0.0000 Y0.0000 Z5.0000 U0.0000 V0.0000",
            "G01 X5.0000 Y0.0000 Z0.0000 U1.5708 V0.0000",
            "G00 X10 Y0 Z0",
            "G01 X0 Y10 Z0",
            "M02",
        ]
    );
}

#[test]
fn test_convert_in_degrees() {
    let program = "G01 X1 Y2 Z3 I0 J1 K0\n";
    let pipeline = five_axis_pipeline(true, ArcPlanner::default());
    let emitter = RecordEmitter::new(3, AngleUnit::Degrees);
    let out = pipeline.convert(program, &emitter).unwrap();
    assert!(out.trim_end().ends_with("U90.000 V90.000"), "{out}");
}

#[test]
fn test_convert_arc_between_moves() {
    let program = "G00 X1 Y0 Z0\nG03 X0 Y1 Z0 I-1 J0 K0\nG01 X0 Y1 Z1\n";
    let pipeline = five_axis_pipeline(true, ArcPlanner::default());
    let out = pipeline.convert(program, &RecordEmitter::default()).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    // rapid + 19 arc points + closing move
    assert_eq!(lines.len(), 21);
    assert_eq!(lines[1], "G01 X1.0000 Y0.0000 Z0.0000");
    assert_eq!(lines[19], "G01 X0.0000 Y1.0000 Z0.0000");
    assert_eq!(lines[20], "G01 X0 Y1 Z1");
}

#[test]
fn test_convert_clockwise_arc_at_height() {
    let program = "G00 X0 Y1 Z5\nG02 X1 Y0 Z5 I0 J-1\nG01 X1 Y0 Z5\n";
    let pipeline = five_axis_pipeline(true, ArcPlanner::default());
    let out = pipeline.convert(program, &RecordEmitter::default()).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 21);
    assert_eq!(lines[1], "G01 X0.0000 Y1.0000 Z5.0000");
    assert_eq!(lines[19], "G01 X1.0000 Y0.0000 Z5.0000");
    assert!(lines[1..20].iter().all(|l| l.ends_with(" Z5.0000")));
    assert_eq!(lines[20], "G01 X1 Y0 Z5");
}

#[test]
fn test_strict_and_lenient_zero_direction() {
    let program = "G01 X1 Y1 Z1 I0 J0 K0\nG01 X2 Y2 Z2 I0 J0 K1\n";

    let strict = five_axis_pipeline(true, ArcPlanner::default());
    let err = strict
        .convert(program, &RecordEmitter::default())
        .unwrap_err();
    assert!(matches!(err, GcodeError::Kinematics { line_number: 1, .. }));

    let lenient = five_axis_pipeline(false, ArcPlanner::default());
    let out = lenient.convert(program, &RecordEmitter::default()).unwrap();
    assert_eq!(out, "G01 X2.0000 Y2.0000 Z2.0000 U0.0000 V0.0000\n");
}

#[test]
fn test_rescale_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("part.gcode");
    let output = dir.path().join("part_scaled.gcode");

    let mut lines = vec!["; FiveKit", "G21", "G90"];
    lines.extend_from_slice(&["G1 X1 Y2 Z3 A45", "G1 X-1 Y0.5 Z3 A45"]);
    lines.extend_from_slice(&["M5", "G0 Z20", "G0 X0 Y0", "M2", "; end", "%"]);
    fs::write(&input, lines.join("\n")).unwrap();

    RescaleFilter::with_multiplier(5.0)
        .rescale_file(&input, &output)
        .unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let out: Vec<&str> = text.lines().collect();
    assert_eq!(out[3], "G1 X5.0000 Y10.0000 Z15.0000");
    assert_eq!(out[4], "G1 X-5.0000 Y2.5000 Z15.0000");
    assert_eq!(out[10], "%");
}

#[test]
fn test_rescale_file_errors() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.gcode");
    let output = dir.path().join("out.gcode");

    let err = RescaleFilter::default()
        .rescale_file(&missing, &output)
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));

    let short = dir.path().join("short.gcode");
    fs::write(&short, "G21\nG1 X1\n").unwrap();
    let err = RescaleFilter::default()
        .rescale_file(&short, &output)
        .unwrap_err();
    assert!(matches!(err, Error::Gcode(_)));
    assert!(!output.exists());
}
