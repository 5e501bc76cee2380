use ahrs::OrientationEstimate;
use hal::{PhysicalSample, Vector3d, STANDARD_GRAVITY};

use crate::config::ThresholdConfig;

/// Sum of absolute axis accelerations minus one g
///
/// Reads about zero for a sensor at rest in any axis-aligned pose.
pub fn vibration_magnitude(accel: &Vector3d) -> f32 {
    accel.x.abs() + accel.y.abs() + accel.z.abs() - STANDARD_GRAVITY
}

/// Threshold decisions for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertFlags {
    /// |pitch| or |roll| above the tilt threshold
    pub tilt: bool,
    /// Any |acceleration| axis above the motion threshold
    pub motion: bool,
    /// Vibration magnitude above the vibration threshold
    pub vibration: bool,
}

impl AlertFlags {
    /// Compare against thresholds; all comparisons are strict
    pub fn evaluate(
        sample: &PhysicalSample,
        orientation: &OrientationEstimate,
        vibration: f32,
        thresholds: &ThresholdConfig,
    ) -> Self {
        let tilt_limit = thresholds.tilt_threshold_deg;
        let motion_limit = thresholds.motion_threshold_ms2;

        Self {
            tilt: orientation.pitch.abs() > tilt_limit || orientation.roll.abs() > tilt_limit,
            motion: sample.accel.iter().any(|a| a.abs() > motion_limit),
            vibration: vibration > thresholds.vibration_threshold_ms2,
        }
    }

    pub fn any(&self) -> bool {
        self.tilt || self.motion || self.vibration
    }
}
