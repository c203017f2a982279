//! Text output for motion records and raw oriented points

use fivekit_core::{AngleUnit, MotionRecord, OrientedPoint};
use std::io::{self, Write};

/// Fixed-point formatting that never prints `-0.000`
pub fn format_number(value: f64, decimals: usize) -> String {
    let half_ulp = 0.5 * 10f64.powi(-(decimals as i32));
    let value = if value.abs() < half_ulp { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

/// Writes [`MotionRecord`]s as `G00|G01 X Y Z [U V]` lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordEmitter {
    /// Digits after the decimal point
    pub decimals: usize,
    /// Unit for the U (tilt) and V (azimuth) words
    pub angle_unit: AngleUnit,
}

impl Default for RecordEmitter {
    fn default() -> Self {
        Self {
            decimals: 4,
            angle_unit: AngleUnit::Radians,
        }
    }
}

impl RecordEmitter {
    pub fn new(decimals: usize, angle_unit: AngleUnit) -> Self {
        Self {
            decimals,
            angle_unit,
        }
    }

    /// Format a single record
    pub fn format(&self, record: &MotionRecord) -> String {
        let d = self.decimals;
        let p = &record.position;
        let mut line = format!(
            "{} X{} Y{} Z{}",
            record.command.code(),
            format_number(p.x, d),
            format_number(p.y, d),
            format_number(p.z, d)
        );
        if let Some(angles) = record.angles {
            line.push_str(&format!(
                " U{} V{}",
                format_number(self.angle_unit.convert(angles.tilt), d),
                format_number(self.angle_unit.convert(angles.azimuth), d)
            ));
        }
        line
    }

    /// Write records one per line
    pub fn write_all<'a, W, I>(&self, writer: &mut W, records: I) -> io::Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = &'a MotionRecord>,
    {
        let mut count = 0;
        for record in records {
            writeln!(writer, "{}", self.format(record))?;
            count += 1;
        }
        Ok(count)
    }
}

/// Raw oriented-point output, `G01 X Y Z I J K`
pub fn format_oriented_point(point: &OrientedPoint, decimals: usize) -> String {
    let p = &point.position;
    let n = &point.direction;
    format!(
        "G01 X{} Y{} Z{} I{} J{} K{}",
        format_number(p.x, decimals),
        format_number(p.y, decimals),
        format_number(p.z, decimals),
        format_number(n.x, decimals),
        format_number(n.y, decimals),
        format_number(n.z, decimals)
    )
}
