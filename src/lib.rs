//! # FiveKit
//!
//! A 5-axis kinematics toolkit for printers and mills with two rotary axes:
//! - Converts oriented toolpath points (position + tool direction) into
//!   tilt/azimuth motion records
//! - Linearizes arcs lying in arbitrary planes
//! - Rescales existing G-code and generates parametric test toolpaths
//!
//! ## Architecture
//!
//! FiveKit is organized as a workspace with multiple crates:
//!
//! 1. **fivekit-core** - Core types, tolerances, units, errors
//! 2. **fivekit-kinematics** - Rotation builder, orientation resolver, arc planning
//! 3. **fivekit-gcode** - G-code parsing, line processors, emitter, rescale filter
//! 4. **fivekit-camtools** - Parametric oriented-point generators
//! 5. **fivekit-settings** - Configuration files
//! 6. **fivekit** - Main binary that integrates all crates

pub use fivekit_core::{
    AngleUnit, Error, GcodeError, KinematicsError, MeasurementSystem, MotionCommand, MotionRecord,
    OrientedPoint, Point2, Result, RotaryAngles, Tolerance, Vector3, Winding,
};

pub use fivekit_kinematics::{
    build, linearize, plan_arc, resolve, to_motion_record, transform_position, ArcPlanner,
    ArcPlannerConfig, ArcPoints, ArcSpec, PlannedArc, ResolvedOrientation, RotationMatrix,
    DEFAULT_ARC_STEP,
};

pub use fivekit_gcode::{
    five_axis_pipeline, format_number, format_oriented_point, parse_line, parse_program,
    ArcProcessor, FiveAxisProcessor, GcodeLine, LineProcessor, ProcessedLine, ProcessorHandle,
    ProcessorPipeline, ProgramState, RecordEmitter, RescaleFilter, Word,
};

pub use fivekit_camtools::{
    load_parameters, to_records, CamToolError, ExtrusionGenerator, ExtrusionParameters,
    ParameterError, PrismWallGenerator, PrismWallParameters, SphereShellGenerator,
    SphereShellParameters,
};

pub use fivekit_settings::{Config, KinematicsSettings, OutputSettings, RescaleSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Arc planner configured from the kinematics settings
pub fn planner_from_config(config: &Config) -> ArcPlanner {
    ArcPlanner::new(ArcPlannerConfig {
        tolerance: config.kinematics.tolerance(),
        step: config.kinematics.arc_step,
    })
}

/// Record emitter configured from the output settings
pub fn emitter_from_config(config: &Config) -> RecordEmitter {
    RecordEmitter::new(config.output.decimals, config.output.angle_unit)
}

/// Rescale filter with the configured layout and the given multiplier
pub fn rescale_filter_from_config(config: &Config, multiplier: f64) -> RescaleFilter {
    let r = &config.rescale;
    RescaleFilter {
        multiplier,
        header_lines: r.header_lines,
        footer_lines: r.footer_lines,
        dropped_words: r.dropped_words.clone(),
        decimals: config.output.decimals,
    }
}

/// Conversion pipeline configured from the settings
pub fn pipeline_from_config(config: &Config) -> ProcessorPipeline {
    five_axis_pipeline(
        config.kinematics.strict_directions,
        planner_from_config(config),
    )
}

/// Convert a G-code program using the configured pipeline and emitter
pub fn convert_program(config: &Config, text: &str) -> Result<String> {
    let output = pipeline_from_config(config).convert(text, &emitter_from_config(config))?;
    Ok(output)
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support (INFO by default)
/// - Output on stderr so G-code written to stdout stays clean
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_convert_with_default_config() {
        let config = Config::default();
        let out = convert_program(&config, "G01 X1 Y2 Z3 I0 J0 K1\nM02\n").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "G01 X1.0000 Y2.0000 Z3.0000 U0.0000 V0.0000");
        assert_eq!(lines[1], "M02");
    }

    #[test]
    fn test_convert_with_degrees_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output]\nangle_unit = \"degrees\"\ndecimals = 1\n").unwrap();

        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.output.angle_unit, AngleUnit::Degrees);

        let out = convert_program(&config, "G01 X0 Y0 Z0 I1 J0 K0\n").unwrap();
        assert_eq!(out.lines().next(), Some("G01 X0.0 Y0.0 Z0.0 U90.0 V0.0"));
    }

    #[test]
    fn test_lenient_config_skips_zero_direction() {
        let mut config = Config::default();
        config.kinematics.strict_directions = false;
        let out = convert_program(&config, "G01 X1 Y1 Z1 I0 J0 K0\nG01 X0 Y0 Z1\n").unwrap();
        assert_eq!(out.lines().count(), 1);

        config.kinematics.strict_directions = true;
        let err = convert_program(&config, "G01 X1 Y1 Z1 I0 J0 K0\n").unwrap_err();
        assert!(err.is_kinematics_error());
    }

    #[test]
    fn test_config_feeds_planner_and_rescale() {
        let mut config = Config::default();
        config.kinematics.arc_step = 0.25;
        config.rescale.header_lines = 1;
        config.rescale.footer_lines = 1;

        assert_eq!(planner_from_config(&config).config().step, 0.25);

        let filter = rescale_filter_from_config(&config, 2.0);
        assert_eq!(filter.multiplier, 2.0);
        assert_eq!(filter.header_lines, 1);
        let out = filter.apply("G21\nG1 X1 Y2 Z3 A4\nM2\n").unwrap();
        assert!(out.contains("X2.0000 Y4.0000 Z6.0000"));
        assert!(!out.contains("A4"));
    }
}
