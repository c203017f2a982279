//! Five-axis line processors

use crate::command::GcodeLine;
use crate::pipeline::{LineProcessor, ProcessedLine, ProgramState};
use fivekit_core::{
    GcodeError, KinematicsError, MotionCommand, MotionRecord, OrientedPoint, Vector3, Winding,
};
use fivekit_kinematics::{to_motion_record, ArcPlanner};

fn kinematics_error(line: &GcodeLine, source: KinematicsError) -> GcodeError {
    GcodeError::Kinematics {
        line_number: line.line_number,
        source,
    }
}

fn ijk(line: &GcodeLine) -> Vector3 {
    Vector3::new(
        line.get('I').unwrap_or(0.0),
        line.get('J').unwrap_or(0.0),
        line.get('K').unwrap_or(0.0),
    )
}

/// Converts `G00`/`G01 X Y Z I J K` lines into five-axis records
///
/// I/J/K is the tool direction. Lines without any of I, J or K pass through
/// untouched. A zero direction is an error in strict mode; otherwise the
/// line is dropped with a warning.
#[derive(Debug, Clone)]
pub struct FiveAxisProcessor {
    strict: bool,
}

impl FiveAxisProcessor {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn strict() -> Self {
        Self::new(true)
    }

    pub fn lenient() -> Self {
        Self::new(false)
    }
}

impl Default for FiveAxisProcessor {
    fn default() -> Self {
        Self::strict()
    }
}

impl LineProcessor for FiveAxisProcessor {
    fn name(&self) -> &str {
        "five-axis"
    }

    fn description(&self) -> &str {
        "Resolves G00/G01 tool directions (I/J/K) into tilted-frame positions with U/V rotary angles"
    }

    fn process(
        &self,
        line: &GcodeLine,
        state: &ProgramState,
    ) -> Result<Vec<ProcessedLine>, GcodeError> {
        if !line.is_straight_move() || !line.has_any(&['I', 'J', 'K']) {
            return Ok(vec![ProcessedLine::Source(line.clone())]);
        }

        let command = match line.g_code() {
            Some(0) => MotionCommand::Rapid,
            _ => MotionCommand::Linear,
        };
        let point = OrientedPoint::new(state.target(line), ijk(line));

        match to_motion_record(&point, command) {
            Ok(record) => Ok(vec![ProcessedLine::Record(record)]),
            Err(e) if !self.strict => {
                tracing::warn!("Skipping line {}: {}", line.line_number, e);
                Ok(vec![])
            }
            Err(e) => Err(kinematics_error(line, e)),
        }
    }
}

/// Linearizes `G02`/`G03` arcs in arbitrary planes
///
/// X/Y/Z give the end point (missing axes keep the current value) and
/// I/J/K the center offset from the current position. The arc is
/// linearized in the rotated frame of its plane and emitted as plain `G01`
/// segments back in the machine frame.
///
/// G02 is clockwise and G03 counter-clockwise as seen from the +Z side of
/// the arc plane; for arcs whose plane contains the Z direction the sense
/// is taken about `(center − start) × (center − end)`.
#[derive(Debug, Clone, Default)]
pub struct ArcProcessor {
    planner: ArcPlanner,
}

impl ArcProcessor {
    pub fn new(planner: ArcPlanner) -> Self {
        Self { planner }
    }

    pub fn planner(&self) -> &ArcPlanner {
        &self.planner
    }

    fn winding_for(line: &GcodeLine) -> Winding {
        if line.g_code() == Some(2) {
            Winding::Cw
        } else {
            Winding::Ccw
        }
    }
}

impl LineProcessor for ArcProcessor {
    fn name(&self) -> &str {
        "arc"
    }

    fn description(&self) -> &str {
        "Expands G02/G03 arcs in any plane into G01 segments"
    }

    fn process(
        &self,
        line: &GcodeLine,
        state: &ProgramState,
    ) -> Result<Vec<ProcessedLine>, GcodeError> {
        if !line.is_arc() {
            return Ok(vec![ProcessedLine::Source(line.clone())]);
        }

        let start = state.position;
        let end = state.target(line);
        let winding = Self::winding_for(line);

        let mut arc = self
            .planner
            .plan(&OrientedPoint::new(start, ijk(line)), &end, winding)
            .map_err(|e| kinematics_error(line, e))?;
        // G02/G03 sense is taken from the +Z side of the plane
        if arc.normal.z < 0.0 {
            arc = arc
                .with_winding(winding.reversed())
                .map_err(|e| kinematics_error(line, e))?;
        }

        tracing::debug!(
            line = line.line_number,
            winding = %arc.spec.winding(),
            "expanding arc with {} segments",
            arc.spec.segment_count()
        );

        Ok(arc
            .machine_points()
            .map(|p| ProcessedLine::Record(MotionRecord::linear(p)))
            .collect())
    }
}
