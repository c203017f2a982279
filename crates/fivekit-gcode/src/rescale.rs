//! Rescale an existing G-code file
//!
//! The first `header_lines` and last `footer_lines` lines are copied
//! verbatim. Every `G1`/`G01` line in between has its X, Y and Z values
//! multiplied, dropped words removed and everything else kept in order.
//! Other body lines are trimmed.

use crate::emitter::format_number;
use fivekit_core::{GcodeError, MeasurementSystem};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Rescale configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescaleFilter {
    /// Factor applied to X, Y and Z
    pub multiplier: f64,
    /// Lines copied verbatim from the start
    pub header_lines: usize,
    /// Lines copied verbatim from the end
    pub footer_lines: usize,
    /// Word letters removed from motion lines
    pub dropped_words: Vec<char>,
    /// Digits written after the decimal point for scaled values
    pub decimals: usize,
}

impl Default for RescaleFilter {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            header_lines: 3,
            footer_lines: 6,
            dropped_words: vec!['A'],
            decimals: 4,
        }
    }
}

impl RescaleFilter {
    /// Default layout with the given multiplier
    pub fn with_multiplier(multiplier: f64) -> Self {
        Self {
            multiplier,
            ..Self::default()
        }
    }

    /// Default layout converting lengths between measurement systems
    pub fn for_units(from: MeasurementSystem, to: MeasurementSystem) -> Self {
        Self::with_multiplier(MeasurementSystem::conversion_factor(from, to))
    }

    fn is_linear_move(line: &str) -> bool {
        line.split_whitespace()
            .next()
            .is_some_and(|cmd| cmd.eq_ignore_ascii_case("G1") || cmd.eq_ignore_ascii_case("G01"))
    }

    fn rescale_line(&self, line_number: u32, line: &str) -> Result<String, GcodeError> {
        let mut parts = Vec::new();
        for part in line.split_whitespace() {
            let Some(letter) = part.chars().next().map(|c| c.to_ascii_uppercase()) else {
                continue;
            };
            if self.dropped_words.iter().any(|d| d.eq_ignore_ascii_case(&letter)) {
                continue;
            }
            if matches!(letter, 'X' | 'Y' | 'Z') {
                let value: f64 = part[1..].parse().map_err(|_| GcodeError::InvalidWord {
                    line_number,
                    word: part.to_string(),
                })?;
                parts.push(format!(
                    "{}{}",
                    letter,
                    format_number(value * self.multiplier, self.decimals)
                ));
            } else {
                parts.push(part.to_string());
            }
        }
        Ok(parts.join(" "))
    }

    /// Rescale program text.
    ///
    /// Fails with [`GcodeError::TooFewLines`] unless the text has more lines
    /// than header and footer together.
    pub fn apply(&self, text: &str) -> Result<String, GcodeError> {
        let lines: Vec<&str> = text.lines().collect();
        let required = self.header_lines + self.footer_lines;
        if lines.len() <= required {
            return Err(GcodeError::TooFewLines {
                lines: lines.len(),
                required,
            });
        }

        let body_end = lines.len() - self.footer_lines;
        let mut out = String::with_capacity(text.len());
        let mut scaled = 0usize;

        for (idx, line) in lines.iter().enumerate() {
            let rendered = if idx < self.header_lines || idx >= body_end {
                (*line).to_string()
            } else if Self::is_linear_move(line) {
                scaled += 1;
                let line_number = u32::try_from(idx + 1).unwrap_or(u32::MAX);
                self.rescale_line(line_number, line)?
            } else {
                line.trim().to_string()
            };
            out.push_str(&rendered);
            out.push('\n');
        }

        tracing::info!(
            multiplier = self.multiplier,
            lines = lines.len(),
            scaled,
            "rescaled program"
        );
        Ok(out)
    }

    /// Rescale `input` into `output`
    pub fn rescale_file(&self, input: &Path, output: &Path) -> fivekit_core::Result<()> {
        let text = fs::read_to_string(input)?;
        let rescaled = self.apply(&text)?;
        fs::write(output, rescaled)?;
        tracing::debug!("wrote {}", output.display());
        Ok(())
    }
}
