use embedded_hal_async::i2c::ErrorKind;
use thiserror::Error;

/// Failure of a register transfer
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The transport reported an error
    #[error("bus transfer failed: {0:?}")]
    Transfer(ErrorKind),
}

/// Rejected configuration value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{parameter} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("filter_alpha = {0} must be in (0, 1]")]
    FilterAlpha(f32),

    #[error("update interval must be non-zero")]
    ZeroInterval,

    #[error("orientation filter rejected the configuration: {0}")]
    Filter(#[from] ahrs::AhrsError),
}

/// Why a poll tick was aborted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriverError {
    #[error("sensor unreadable: {0}")]
    Bus(#[from] BusError),

    #[error("orientation rejected: {0}")]
    Orientation(#[from] ahrs::AhrsError),
}
