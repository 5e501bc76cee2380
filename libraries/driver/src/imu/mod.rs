// BMI160 polling component
//
// Every tick runs acquisition, conversion, orientation filtering, alert
// evaluation and publication in that order. A failed motion read ends the
// tick before anything is converted, filtered or published.

use ahrs::{FilterState, OrientationEstimate, OrientationFilter, Tilt};
use embassy_time::{Duration, Instant};
use embedded_hal_async::delay::DelayNs;
use hal::{
    BinarySink, Channel, ImuStatus, NumericSink, PhysicalSample, PollingComponent, SetupPriority,
    CHANNEL_COUNT,
};
use log::{debug, info, trace, warn};

use crate::alert::{vibration_magnitude, AlertFlags};
use crate::bus::RegisterDevice;
use crate::config::Bmi160Config;
use crate::error::{ConfigError, DriverError};

pub mod bmi160;

use self::bmi160::{read_raw_sample, reset_and_configure};

/// Optional output slots, one per channel
///
/// An unset slot means the value is computed and dropped.
#[derive(Default)]
pub struct Sinks {
    pub accel_x: Option<Box<dyn NumericSink>>,
    pub accel_y: Option<Box<dyn NumericSink>>,
    pub accel_z: Option<Box<dyn NumericSink>>,

    pub gyro_x: Option<Box<dyn NumericSink>>,
    pub gyro_y: Option<Box<dyn NumericSink>>,
    pub gyro_z: Option<Box<dyn NumericSink>>,

    pub pitch: Option<Box<dyn NumericSink>>,
    pub roll: Option<Box<dyn NumericSink>>,
    pub inclination: Option<Box<dyn NumericSink>>,

    pub temperature: Option<Box<dyn NumericSink>>,
    pub vibration: Option<Box<dyn NumericSink>>,

    pub tilt_alert: Option<Box<dyn BinarySink>>,
    pub motion_alert: Option<Box<dyn BinarySink>>,
    pub vibration_alert: Option<Box<dyn BinarySink>>,
}

impl Sinks {
    /// Bind a numeric sink; returns `false` for binary channels
    pub fn bind_numeric(&mut self, channel: Channel, sink: Box<dyn NumericSink>) -> bool {
        let slot = match channel {
            Channel::AccelX => &mut self.accel_x,
            Channel::AccelY => &mut self.accel_y,
            Channel::AccelZ => &mut self.accel_z,
            Channel::GyroX => &mut self.gyro_x,
            Channel::GyroY => &mut self.gyro_y,
            Channel::GyroZ => &mut self.gyro_z,
            Channel::Pitch => &mut self.pitch,
            Channel::Roll => &mut self.roll,
            Channel::Inclination => &mut self.inclination,
            Channel::Temperature => &mut self.temperature,
            Channel::Vibration => &mut self.vibration,
            Channel::TiltAlert | Channel::MotionAlert | Channel::VibrationAlert => return false,
        };
        *slot = Some(sink);
        true
    }

    /// Bind a binary sink; returns `false` for numeric channels
    pub fn bind_binary(&mut self, channel: Channel, sink: Box<dyn BinarySink>) -> bool {
        let slot = match channel {
            Channel::TiltAlert => &mut self.tilt_alert,
            Channel::MotionAlert => &mut self.motion_alert,
            Channel::VibrationAlert => &mut self.vibration_alert,
            _ => return false,
        };
        *slot = Some(sink);
        true
    }

    pub fn is_bound(&self, channel: Channel) -> bool {
        match channel {
            Channel::AccelX => self.accel_x.is_some(),
            Channel::AccelY => self.accel_y.is_some(),
            Channel::AccelZ => self.accel_z.is_some(),
            Channel::GyroX => self.gyro_x.is_some(),
            Channel::GyroY => self.gyro_y.is_some(),
            Channel::GyroZ => self.gyro_z.is_some(),
            Channel::Pitch => self.pitch.is_some(),
            Channel::Roll => self.roll.is_some(),
            Channel::Inclination => self.inclination.is_some(),
            Channel::Temperature => self.temperature.is_some(),
            Channel::Vibration => self.vibration.is_some(),
            Channel::TiltAlert => self.tilt_alert.is_some(),
            Channel::MotionAlert => self.motion_alert.is_some(),
            Channel::VibrationAlert => self.vibration_alert.is_some(),
        }
    }

    /// Bound channels in publication order
    pub fn bound_channels(&self) -> heapless::Vec<Channel, CHANNEL_COUNT> {
        Channel::ALL
            .iter()
            .copied()
            .filter(|channel| self.is_bound(*channel))
            .collect()
    }

    fn publish(&mut self, reading: &Reading) {
        let sample = &reading.sample;
        let orientation = &reading.orientation;

        publish_value(&mut self.accel_x, sample.accel.x);
        publish_value(&mut self.accel_y, sample.accel.y);
        publish_value(&mut self.accel_z, sample.accel.z);

        publish_value(&mut self.gyro_x, sample.gyro.x);
        publish_value(&mut self.gyro_y, sample.gyro.y);
        publish_value(&mut self.gyro_z, sample.gyro.z);

        publish_value(&mut self.pitch, orientation.pitch);
        publish_value(&mut self.roll, orientation.roll);
        publish_value(&mut self.inclination, orientation.inclination);

        publish_value(&mut self.temperature, sample.temperature);
        publish_value(&mut self.vibration, reading.vibration);

        publish_state(&mut self.tilt_alert, reading.alerts.tilt);
        publish_state(&mut self.motion_alert, reading.alerts.motion);
        publish_state(&mut self.vibration_alert, reading.alerts.vibration);
    }
}

fn publish_value(slot: &mut Option<Box<dyn NumericSink>>, value: f32) {
    if let Some(sink) = slot {
        sink.publish(value);
    }
}

fn publish_state(slot: &mut Option<Box<dyn BinarySink>>, state: bool) {
    if let Some(sink) = slot {
        sink.publish(state);
    }
}

/// Everything computed in one successful tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub sample: PhysicalSample,
    pub orientation: OrientationEstimate,
    /// Vibration magnitude in m/s²
    pub vibration: f32,
    pub alerts: AlertFlags,
}

/// BMI160 6-axis IMU polled over a register bus
///
/// Owns the orientation filter and the last good temperature; both are only
/// touched from `poll`.
pub struct Bmi160<D: RegisterDevice, T: DelayNs> {
    /// Register access to the chip
    device: D,
    /// Used once, after the soft reset
    delay: T,
    /// Fixed configuration
    config: Bmi160Config,
    /// Pitch/roll smoothing
    filter: OrientationFilter,
    /// Output slots
    sinks: Sinks,
    /// Last successfully read temperature in Celsius, NaN before the first
    temperature_c: f32,
    /// Time of the last successful tick
    last_reading: Option<Instant>,
    /// Motion reads failed since the last success
    consecutive_failures: u32,
}

impl<D: RegisterDevice, T: DelayNs> Bmi160<D, T> {
    /// Create a component with the default configuration
    pub fn new(device: D, delay: T, sinks: Sinks) -> Self {
        Self {
            device,
            delay,
            config: Bmi160Config::default(),
            filter: OrientationFilter::default(),
            sinks,
            temperature_c: f32::NAN,
            last_reading: None,
            consecutive_failures: 0,
        }
    }

    /// Create a component with a custom configuration
    pub fn new_with_config(
        device: D,
        delay: T,
        config: Bmi160Config,
        sinks: Sinks,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let filter = OrientationFilter::new(config.thresholds.filter_alpha)?;

        Ok(Self {
            device,
            delay,
            config,
            filter,
            sinks,
            temperature_c: f32::NAN,
            last_reading: None,
            consecutive_failures: 0,
        })
    }

    pub fn config(&self) -> &Bmi160Config {
        &self.config
    }

    pub fn filter_state(&self) -> &FilterState {
        self.filter.state()
    }

    pub fn sinks(&self) -> &Sinks {
        &self.sinks
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn status(&self) -> ImuStatus {
        ImuStatus {
            healthy: self.last_reading.is_some() && self.consecutive_failures == 0,
            temperature: self.temperature_c,
            last_reading: self.last_reading,
            consecutive_failures: self.consecutive_failures,
        }
    }

    /// Soft reset and configure the chip
    ///
    /// Write failures are not reported; an absent chip shows up as failed
    /// reads on every tick.
    pub async fn setup(&mut self) {
        let tag = self.config.tag;
        info!(target: tag, "Setting up BMI160...");

        let steps = ["soft reset", "accelerometer config", "gyroscope config"];
        let results = reset_and_configure(&mut self.device, &mut self.delay).await;
        for (step, result) in steps.iter().zip(results) {
            if let Err(e) = result {
                debug!(target: tag, "{} write failed: {}", step, e);
            }
        }

        info!(target: tag, "BMI160 setup done");
    }

    /// Run one tick and report why it was aborted, if it was
    pub async fn poll(&mut self, now: Instant) -> Result<Reading, DriverError> {
        let raw = match read_raw_sample(&mut self.device).await {
            Ok(raw) => raw,
            Err(e) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                return Err(e.into());
            }
        };

        let sample = raw.to_physical(self.temperature_c);
        let tilt = Tilt::from_accel(&sample.accel)?;
        let since_last = self.filter.time_since_last_update(now);
        let orientation = self.filter.update(tilt, now)?;
        if let Some(elapsed) = since_last {
            trace!(
                target: self.config.tag,
                "Orientation filtered {} ms after the previous tick",
                elapsed.as_millis()
            );
        }

        // Only commit the temperature once the tick can no longer fail
        self.temperature_c = sample.temperature;
        self.last_reading = Some(now);
        self.consecutive_failures = 0;

        let vibration = vibration_magnitude(&sample.accel);
        let alerts = AlertFlags::evaluate(&sample, &orientation, vibration, &self.config.thresholds);
        self.log_alerts(&alerts, vibration);

        let reading = Reading {
            sample,
            orientation,
            vibration,
            alerts,
        };
        self.sinks.publish(&reading);

        Ok(reading)
    }

    /// Run one tick; failures are logged and the tick is skipped
    pub async fn update(&mut self, now: Instant) {
        if let Err(e) = self.poll(now).await {
            warn!(target: self.config.tag, "BMI160 read failed: {}", e);
        }
    }

    pub fn dump_config(&self) {
        let tag = self.config.tag;
        let thresholds = &self.config.thresholds;

        info!(target: tag, "BMI160:");
        info!(target: tag, "  Update interval: {} ms", self.config.update_interval.as_millis());
        info!(target: tag, "  Tilt threshold: {:.1}°", thresholds.tilt_threshold_deg);
        info!(target: tag, "  Motion threshold: {:.3} m/s²", thresholds.motion_threshold_ms2);
        info!(target: tag, "  Vibration threshold: {:.3} m/s²", thresholds.vibration_threshold_ms2);
        if self.filter.is_smoothing() {
            info!(target: tag, "  Smoothing: alpha = {:.3}", self.filter.alpha());
        } else {
            info!(target: tag, "  Smoothing: disabled");
        }
        for channel in self.sinks.bound_channels() {
            info!(target: tag, "  Channel '{}'", channel.name());
        }
    }

    fn log_alerts(&self, alerts: &AlertFlags, vibration: f32) {
        if !alerts.any() {
            return;
        }
        let tag = self.config.tag;
        if alerts.tilt {
            debug!(target: tag, "Tilt threshold exceeded");
        }
        if alerts.vibration {
            debug!(target: tag, "Vibration threshold exceeded: {:.3} m/s²", vibration);
        }
        if alerts.motion {
            debug!(target: tag, "Motion threshold exceeded");
        }
    }
}

impl<D: RegisterDevice, T: DelayNs> PollingComponent for Bmi160<D, T> {
    async fn setup(&mut self) {
        self.setup().await
    }

    async fn update(&mut self, now: Instant) {
        self.update(now).await
    }

    fn setup_priority(&self) -> SetupPriority {
        SetupPriority::Data
    }

    fn update_interval(&self) -> Duration {
        self.config.update_interval
    }

    fn dump_config(&self) {
        self.dump_config()
    }
}
