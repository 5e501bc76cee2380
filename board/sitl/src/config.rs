// Simulation settings read from the environment

use std::str::FromStr;

use anyhow::{Context, Result};
use driver::{Bmi160Config, ThresholdConfig};
use embassy_time::Duration;

pub const DEFAULT_TICKS: u32 = 20;
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// What to simulate and how to configure the driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SitlSettings {
    /// Ticks to run before stopping
    pub ticks: u32,
    /// Pose the board is moved to after the first tick, in degrees
    pub pitch_deg: f32,
    pub roll_deg: f32,
    /// Peak shake added to the X axis, in g
    pub shake_g: f32,
    pub driver: Bmi160Config,
}

impl Default for SitlSettings {
    fn default() -> Self {
        Self {
            ticks: DEFAULT_TICKS,
            pitch_deg: 0.0,
            roll_deg: 0.0,
            shake_g: 0.0,
            driver: Bmi160Config {
                update_interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
                ..Default::default()
            },
        }
    }
}

impl SitlSettings {
    /// Read `SITL_*` variables; unset ones keep their default
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let thresholds = defaults.driver.thresholds;

        let interval_ms = parse_or(&lookup, "SITL_INTERVAL_MS", DEFAULT_INTERVAL_MS)?;
        let settings = Self {
            ticks: parse_or(&lookup, "SITL_TICKS", defaults.ticks)?,
            pitch_deg: parse_or(&lookup, "SITL_PITCH", defaults.pitch_deg)?,
            roll_deg: parse_or(&lookup, "SITL_ROLL", defaults.roll_deg)?,
            shake_g: parse_or(&lookup, "SITL_SHAKE", defaults.shake_g)?,
            driver: Bmi160Config {
                thresholds: ThresholdConfig {
                    tilt_threshold_deg: parse_or(
                        &lookup,
                        "SITL_TILT_THRESHOLD",
                        thresholds.tilt_threshold_deg,
                    )?,
                    motion_threshold_ms2: parse_or(
                        &lookup,
                        "SITL_MOTION_THRESHOLD",
                        thresholds.motion_threshold_ms2,
                    )?,
                    vibration_threshold_ms2: parse_or(
                        &lookup,
                        "SITL_VIBRATION_THRESHOLD",
                        thresholds.vibration_threshold_ms2,
                    )?,
                    filter_alpha: parse_or(&lookup, "SITL_FILTER_ALPHA", thresholds.filter_alpha)?,
                },
                update_interval: Duration::from_millis(interval_ms),
                ..defaults.driver
            },
        };

        settings
            .driver
            .validate()
            .context("invalid driver configuration")?;
        Ok(settings)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}
