//! # FiveKit Core
//!
//! Core types and utilities shared by every FiveKit crate.
//! Provides the oriented-point data model, motion records, geometric
//! tolerances, unit handling and the error hierarchy.

pub mod data;
pub mod error;
pub mod units;

pub use data::{
    MotionCommand, MotionRecord, OrientedPoint, Point2, RotaryAngles, Tolerance, Vector3, Winding,
};

pub use error::{Error, GcodeError, KinematicsError, Result};

pub use units::{AngleUnit, MeasurementSystem};
