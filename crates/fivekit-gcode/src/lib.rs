//! # FiveKit G-Code
//!
//! G-code input and output around the kinematics kernel.
//! Includes the line parser, record emitter, the five-axis and arc line
//! processors with their pipeline, and the rescale filter.

pub mod command;
pub mod emitter;
pub mod pipeline;
pub mod processors;
pub mod rescale;

use std::sync::Arc;

pub use command::{parse_line, parse_program, strip_comments, GcodeLine, Word};
pub use emitter::{format_number, format_oriented_point, RecordEmitter};
pub use pipeline::{LineProcessor, ProcessedLine, ProcessorHandle, ProcessorPipeline, ProgramState};
pub use processors::{ArcProcessor, FiveAxisProcessor};
pub use rescale::RescaleFilter;

use fivekit_kinematics::ArcPlanner;

/// Pipeline with arc expansion followed by five-axis resolution
pub fn five_axis_pipeline(strict: bool, planner: ArcPlanner) -> ProcessorPipeline {
    let mut pipeline = ProcessorPipeline::new();
    pipeline
        .register(Arc::new(ArcProcessor::new(planner)))
        .register(Arc::new(FiveAxisProcessor::new(strict)));
    pipeline
}
