/// IMU (Inertial Measurement Unit) data types
use embassy_time::Instant;

use crate::types::Vector3d;

/// One calibrated 6-axis measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalSample {
    /// Linear acceleration in body frame (x, y, z) in m/s²
    pub accel: Vector3d,

    /// Angular rate in body frame (x, y, z) in °/s
    pub gyro: Vector3d,

    /// Die temperature in Celsius
    ///
    /// NaN until the first successful temperature read.
    pub temperature: f32,
}

/// IMU sensor status information
#[derive(Debug, Clone, Copy)]
pub struct ImuStatus {
    /// Whether the last motion read succeeded
    pub healthy: bool,

    /// Last known temperature of the sensor in Celsius
    pub temperature: f32,

    /// Time of the last successful motion read
    pub last_reading: Option<Instant>,

    /// Motion reads that failed since the last successful one
    pub consecutive_failures: u32,
}
