//! Polling driver for the Bosch BMI160 6-axis IMU
//!
//! Reads accelerometer, gyroscope and temperature registers over a register
//! bus, converts them to physical units, estimates pitch/roll/inclination,
//! evaluates tilt, motion and vibration thresholds and publishes everything
//! to optional sinks.

pub mod alert;
pub mod bus;
pub mod config;
pub mod error;
pub mod imu;

#[cfg(test)]
pub(crate) mod mock;

pub use alert::{vibration_magnitude, AlertFlags};
pub use bus::{I2cRegisterDevice, RegisterDevice};
pub use config::{Bmi160Config, ThresholdConfig};
pub use error::{BusError, ConfigError, DriverError};
pub use imu::bmi160::{RawSample, BMI160_I2C_ADDR_PRIMARY, BMI160_I2C_ADDR_SECONDARY};
pub use imu::{Bmi160, Reading, Sinks};
