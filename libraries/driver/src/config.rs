use ahrs::DEFAULT_FILTER_ALPHA;
use embassy_time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_TILT_THRESHOLD_DEG: f32 = 15.0;
pub const DEFAULT_MOTION_THRESHOLD_MS2: f32 = 0.3;
pub const DEFAULT_VIBRATION_THRESHOLD_MS2: f32 = 0.5;
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_LOG_TAG: &str = "bmi160";

// Accepted ranges, inclusive
pub const TILT_THRESHOLD_RANGE: (f32, f32) = (0.0, 90.0);
pub const MOTION_THRESHOLD_RANGE: (f32, f32) = (0.0, 10.0);
pub const VIBRATION_THRESHOLD_RANGE: (f32, f32) = (0.0, 50.0);

/// Alert thresholds and orientation smoothing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdConfig {
    /// Tilt alert when |pitch| or |roll| exceeds this, in degrees
    pub tilt_threshold_deg: f32,

    /// Motion alert when any |acceleration| axis exceeds this, in m/s²
    pub motion_threshold_ms2: f32,

    /// Vibration alert when the vibration magnitude exceeds this, in m/s²
    pub vibration_threshold_ms2: f32,

    /// Weight of the previous pitch/roll estimate, in (0, 1]
    pub filter_alpha: f32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            tilt_threshold_deg: DEFAULT_TILT_THRESHOLD_DEG,
            motion_threshold_ms2: DEFAULT_MOTION_THRESHOLD_MS2,
            vibration_threshold_ms2: DEFAULT_VIBRATION_THRESHOLD_MS2,
            filter_alpha: DEFAULT_FILTER_ALPHA,
        }
    }
}

impl ThresholdConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "tilt_threshold_deg",
            self.tilt_threshold_deg,
            TILT_THRESHOLD_RANGE,
        )?;
        check_range(
            "motion_threshold_ms2",
            self.motion_threshold_ms2,
            MOTION_THRESHOLD_RANGE,
        )?;
        check_range(
            "vibration_threshold_ms2",
            self.vibration_threshold_ms2,
            VIBRATION_THRESHOLD_RANGE,
        )?;

        if !(self.filter_alpha > 0.0 && self.filter_alpha <= 1.0) {
            return Err(ConfigError::FilterAlpha(self.filter_alpha));
        }

        Ok(())
    }
}

fn check_range(parameter: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    // NaN fails both comparisons
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            parameter,
            value,
            min,
            max,
        })
    }
}

/// Configuration for the BMI160 component
/// Fixed at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi160Config {
    pub thresholds: ThresholdConfig,

    /// Time between two polls
    pub update_interval: Duration,

    /// Log target for this instance
    pub tag: &'static str,
}

impl Default for Bmi160Config {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),
            update_interval: DEFAULT_UPDATE_INTERVAL,
            tag: DEFAULT_LOG_TAG,
        }
    }
}

impl Bmi160Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval == Duration::from_ticks(0) {
            return Err(ConfigError::ZeroInterval);
        }
        self.thresholds.validate()
    }
}
