//! Line processor pipeline
//!
//! Parsed lines flow through the registered processors in order. A
//! processor either claims a line and turns it into motion records, or
//! hands it on unchanged. Records produced by one processor are not offered
//! to later ones.

use crate::command::{parse_program, GcodeLine};
use crate::emitter::RecordEmitter;
use fivekit_core::{GcodeError, MotionRecord, Vector3};
use std::sync::Arc;

/// Modal program state seen by processors
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgramState {
    /// Last commanded position in the machine frame
    pub position: Vector3,
}

impl ProgramState {
    /// Fill in the axes `line` omits from the current position
    pub fn target(&self, line: &GcodeLine) -> Vector3 {
        Vector3::new(
            line.get('X').unwrap_or(self.position.x),
            line.get('Y').unwrap_or(self.position.y),
            line.get('Z').unwrap_or(self.position.z),
        )
    }

    /// Track the position commanded by a motion line. Absolute mode only.
    pub fn update(&mut self, line: &GcodeLine) {
        let is_motion = match line.g_code() {
            Some(code) => code <= 3,
            None => line.command.is_none(),
        };
        if is_motion && line.has_any(&['X', 'Y', 'Z']) {
            self.position = self.target(line);
        }
    }
}

/// One unit of pipeline output
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessedLine {
    /// A source line no processor claimed
    Source(GcodeLine),
    /// A generated motion record
    Record(MotionRecord),
}

impl ProcessedLine {
    /// Text form: source lines as read, records through `emitter`
    pub fn render(&self, emitter: &RecordEmitter) -> String {
        match self {
            Self::Source(line) => line.source.trim_end().to_string(),
            Self::Record(record) => emitter.format(record),
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }
}

/// A transformation applied to parsed lines
///
/// Returning the input line unchanged passes it through; an empty vector
/// drops it.
pub trait LineProcessor: Send + Sync {
    /// Short identifier
    fn name(&self) -> &str;

    /// What this processor does
    fn description(&self) -> &str;

    /// Process one source line given the state before it executes
    fn process(
        &self,
        line: &GcodeLine,
        state: &ProgramState,
    ) -> Result<Vec<ProcessedLine>, GcodeError>;

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Shared handle to a processor
pub type ProcessorHandle = Arc<dyn LineProcessor>;

/// Ordered list of line processors
#[derive(Default)]
pub struct ProcessorPipeline {
    processors: Vec<ProcessorHandle>,
}

impl ProcessorPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a processor; processors run in registration order.
    pub fn register(&mut self, processor: ProcessorHandle) -> &mut Self {
        self.processors.push(processor);
        self
    }

    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    /// `(name, description, enabled)` for each processor
    pub fn list_processors(&self) -> Vec<(&str, &str, bool)> {
        self.processors
            .iter()
            .map(|p| (p.name(), p.description(), p.is_enabled()))
            .collect()
    }

    /// Run one line through every enabled processor
    pub fn process_line(
        &self,
        line: &GcodeLine,
        state: &ProgramState,
    ) -> Result<Vec<ProcessedLine>, GcodeError> {
        let mut current = vec![ProcessedLine::Source(line.clone())];

        for processor in self.processors.iter().filter(|p| p.is_enabled()) {
            let mut next = Vec::with_capacity(current.len());
            for item in current {
                match item {
                    ProcessedLine::Source(source) => {
                        let out = processor.process(&source, state).map_err(|e| {
                            tracing::warn!(
                                "Processor '{}' failed on line {}: {}",
                                processor.name(),
                                source.line_number,
                                e
                            );
                            e
                        })?;
                        next.extend(out);
                    }
                    record => next.push(record),
                }
            }
            current = next;
            if current.is_empty() {
                break;
            }
        }

        Ok(current)
    }

    /// Run a parsed program, tracking position across lines
    pub fn process_program(&self, lines: &[GcodeLine]) -> Result<Vec<ProcessedLine>, GcodeError> {
        let mut state = ProgramState::default();
        let mut output = Vec::with_capacity(lines.len());
        let mut dropped = 0usize;

        for line in lines {
            let processed = self.process_line(line, &state)?;
            if processed.is_empty() {
                dropped += 1;
            }
            output.extend(processed);
            state.update(line);
        }

        let records = output.iter().filter(|p| p.is_record()).count();
        tracing::info!(
            lines = lines.len(),
            records,
            passed_through = output.len() - records,
            dropped,
            "pipeline finished"
        );
        Ok(output)
    }

    /// Parse `text`, process it and render the result, one line per output
    pub fn convert(&self, text: &str, emitter: &RecordEmitter) -> Result<String, GcodeError> {
        let lines = parse_program(text)?;
        let mut out = String::new();
        for item in self.process_program(&lines)? {
            out.push_str(&item.render(emitter));
            out.push('\n');
        }
        Ok(out)
    }
}
