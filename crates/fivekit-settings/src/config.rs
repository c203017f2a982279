//! Configuration management for FiveKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats; the default file lives in the platform configuration
//! directory.
//!
//! Configuration is organized into logical sections:
//! - Kinematics (arc step, tolerances, direction handling)
//! - Output (number formatting, rotary-axis unit)
//! - Rescale (header/footer layout, multiplier, dropped words)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use fivekit_core::{AngleUnit, Tolerance};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

/// Largest accepted number of decimals in formatted output
pub const MAX_DECIMALS: usize = 10;

/// Kinematics settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicsSettings {
    /// Angular step for arc linearization (radians)
    pub arc_step: f64,
    /// Smallest step accepted for `arc_step` (radians)
    pub min_arc_step: f64,
    /// Linear comparison tolerance (mm)
    pub linear_tolerance: f64,
    /// Angular comparison tolerance (radians)
    pub angular_tolerance: f64,
    /// Fail on zero tool directions instead of skipping the line
    pub strict_directions: bool,
}

impl Default for KinematicsSettings {
    fn default() -> Self {
        Self {
            arc_step: PI / 36.0,
            min_arc_step: 1e-4,
            linear_tolerance: Tolerance::DEFAULT.linear,
            angular_tolerance: Tolerance::DEFAULT.angular,
            strict_directions: true,
        }
    }
}

impl KinematicsSettings {
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.linear_tolerance, self.angular_tolerance)
    }
}

/// Output formatting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Decimals for five-axis records
    pub decimals: usize,
    /// Unit for U/V rotary words
    pub angle_unit: AngleUnit,
    /// Decimals for raw `X Y Z I J K` output
    pub oriented_decimals: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            decimals: 4,
            angle_unit: AngleUnit::Radians,
            oriented_decimals: 3,
        }
    }
}

/// Rescale filter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RescaleSettings {
    /// Lines copied verbatim from the start
    pub header_lines: usize,
    /// Lines copied verbatim from the end
    pub footer_lines: usize,
    /// Default multiplier for X/Y/Z
    pub multiplier: f64,
    /// Word letters removed from motion lines
    pub dropped_words: Vec<char>,
}

impl Default for RescaleSettings {
    fn default() -> Self {
        Self {
            header_lines: 3,
            footer_lines: 6,
            multiplier: 1.0,
            dropped_words: vec!['A'],
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Kinematics settings
    pub kinematics: KinematicsSettings,
    /// Output formatting
    pub output: OutputSettings,
    /// Rescale filter defaults
    pub rescale: RescaleSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_for(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )
        .into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_for(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let k = &self.kinematics;
        if !(k.min_arc_step.is_finite() && k.min_arc_step > 0.0) {
            return Err(SettingsError::invalid(
                "kinematics.min_arc_step",
                "must be > 0",
            ));
        }
        if !(k.arc_step.is_finite() && k.arc_step >= k.min_arc_step) {
            return Err(SettingsError::invalid(
                "kinematics.arc_step",
                format!("must be >= min_arc_step ({})", k.min_arc_step),
            ));
        }
        if !(k.linear_tolerance.is_finite() && k.linear_tolerance > 0.0) {
            return Err(SettingsError::invalid(
                "kinematics.linear_tolerance",
                "must be > 0",
            ));
        }
        if !(k.angular_tolerance.is_finite() && k.angular_tolerance > 0.0) {
            return Err(SettingsError::invalid(
                "kinematics.angular_tolerance",
                "must be > 0",
            ));
        }

        if self.output.decimals > MAX_DECIMALS {
            return Err(SettingsError::invalid(
                "output.decimals",
                format!("must be <= {MAX_DECIMALS}"),
            ));
        }
        if self.output.oriented_decimals > MAX_DECIMALS {
            return Err(SettingsError::invalid(
                "output.oriented_decimals",
                format!("must be <= {MAX_DECIMALS}"),
            ));
        }

        let r = &self.rescale;
        if !(r.multiplier.is_finite() && r.multiplier != 0.0) {
            return Err(SettingsError::invalid(
                "rescale.multiplier",
                "must be finite and non-zero",
            ));
        }
        if let Some(bad) = r.dropped_words.iter().find(|c| !c.is_ascii_alphabetic()) {
            return Err(SettingsError::invalid(
                "rescale.dropped_words",
                format!("'{bad}' is not a word letter"),
            ));
        }

        Ok(())
    }

    /// Default config file location: `<config dir>/fivekit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("fivekit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("platform config directory not available".into())
            })
    }

    /// Load `path` if given, else the default file if it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(default) if default.exists() => Self::load_from_file(&default),
            Ok(_) => Ok(Self::default()),
            Err(e) => {
                tracing::debug!("using built-in configuration: {}", e);
                Ok(Self::default())
            }
        }
    }
}
