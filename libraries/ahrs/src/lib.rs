//! # AHRS - accelerometer tilt estimation
//!
//! Derives pitch, roll and inclination from the gravity vector sensed by an
//! accelerometer and smooths pitch/roll across updates.
//!
//! ## Features
//!
//! - Pitch/roll from a single acceleration sample
//! - Inclination (combined tilt magnitude)
//! - Exponential low-pass filter with persistent state
//!
//! ## Platform Support
//!
//! - **desktop**: enables `nalgebra/std` for host builds and SITL

pub mod error;
pub mod orientation;
pub mod utils;

pub use error::{AhrsError, AhrsResult};
pub use orientation::{
    FilterState, OrientationEstimate, OrientationFilter, Tilt, DEFAULT_FILTER_ALPHA,
};
