use embassy_time::{Duration, Instant};
use nalgebra as na;

use crate::error::helpers::{check_vector_valid, config_error, invalid_state};
use crate::utils::{all_finite, rad_to_deg};
use crate::AhrsResult;

/// Default smoothing coefficient, weight of the previous estimate
pub const DEFAULT_FILTER_ALPHA: f32 = 0.98;

/// Pitch and roll in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tilt {
    pub pitch: f32,
    pub roll: f32,
}

impl Tilt {
    pub fn new(pitch: f32, roll: f32) -> Self {
        Self { pitch, roll }
    }

    /// Instantaneous tilt from an acceleration vector in body frame
    ///
    /// Pitch is the elevation of the y axis, roll the rotation about it.
    /// Any unit works since only ratios are used.
    pub fn from_accel(accel: &na::Vector3<f32>) -> AhrsResult<Self> {
        check_vector_valid(accel, "accel")?;

        let pitch = accel.y.atan2((accel.x * accel.x + accel.z * accel.z).sqrt());
        let roll = (-accel.x).atan2(accel.z);

        Ok(Self {
            pitch: rad_to_deg(pitch),
            roll: rad_to_deg(roll),
        })
    }

    /// Combined tilt magnitude in degrees, never negative
    pub fn inclination(&self) -> f32 {
        (self.pitch * self.pitch + self.roll * self.roll).sqrt()
    }
}

/// Orientation published for one update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationEstimate {
    /// Pitch in degrees
    pub pitch: f32,
    /// Roll in degrees
    pub roll: f32,
    /// `sqrt(pitch² + roll²)` of the values above
    pub inclination: f32,
}

impl From<Tilt> for OrientationEstimate {
    fn from(tilt: Tilt) -> Self {
        Self {
            pitch: tilt.pitch,
            roll: tilt.roll,
            inclination: tilt.inclination(),
        }
    }
}

/// Persistent filter memory
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterState {
    /// Previous filtered tilt, `None` before the first update
    pub estimate: Option<Tilt>,
    /// Time of the previous update
    pub last_update: Option<Instant>,
}

/// Exponential smoothing of pitch and roll
///
/// `filtered = alpha * previous + (1 - alpha) * instantaneous`, applied to
/// each axis on every update regardless of the elapsed time. The first
/// update is taken as is. `alpha == 1` turns smoothing off.
#[derive(Debug, Clone)]
pub struct OrientationFilter {
    alpha: f32,
    state: FilterState,
}

impl Default for OrientationFilter {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_FILTER_ALPHA,
            state: FilterState::default(),
        }
    }
}

impl OrientationFilter {
    /// Create a filter with the given smoothing coefficient in `(0, 1]`
    pub fn new(alpha: f32) -> AhrsResult<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(config_error(
                format!("smoothing coefficient {} outside (0, 1]", alpha),
                Some("filter_alpha"),
            ));
        }

        Ok(Self {
            alpha,
            state: FilterState::default(),
        })
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Whether updates are blended with the previous estimate
    pub fn is_smoothing(&self) -> bool {
        self.alpha < 1.0
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Time elapsed since the last update, if there was one
    pub fn time_since_last_update(&self, now: Instant) -> Option<Duration> {
        self.state
            .last_update
            .and_then(|last| now.checked_duration_since(last))
    }

    /// Fold an instantaneous tilt into the estimate
    ///
    /// The state is left untouched when `tilt` is not finite.
    pub fn update(&mut self, tilt: Tilt, now: Instant) -> AhrsResult<OrientationEstimate> {
        if !all_finite(&[tilt.pitch, tilt.roll]) {
            return Err(invalid_state(
                format!("tilt ({}, {}) is not finite", tilt.pitch, tilt.roll),
                "OrientationFilter",
            ));
        }

        let filtered = match self.state.estimate {
            Some(previous) if self.is_smoothing() => Tilt {
                pitch: self.blend(previous.pitch, tilt.pitch),
                roll: self.blend(previous.roll, tilt.roll),
            },
            _ => tilt,
        };

        self.state.estimate = Some(filtered);
        self.state.last_update = Some(now);

        Ok(filtered.into())
    }

    fn blend(&self, previous: f32, instantaneous: f32) -> f32 {
        self.alpha * previous + (1.0 - self.alpha) * instantaneous
    }
}
