//! FiveKit Settings Crate
//!
//! Handles application configuration files: loading, saving and validation.

pub mod config;
pub mod error;

pub use config::{Config, KinematicsSettings, OutputSettings, RescaleSettings, MAX_DECIMALS};
pub use error::{ConfigError, SettingsError, SettingsResult};
