use embedded_hal_async::delay::DelayNs;
use hal::{PhysicalSample, Vector3d, STANDARD_GRAVITY};

use crate::bus::RegisterDevice;
use crate::error::BusError;

// BMI160 I2C addresses (depends on SDO pin state)
pub const BMI160_I2C_ADDR_PRIMARY: u8 = 0x68;
pub const BMI160_I2C_ADDR_SECONDARY: u8 = 0x69;

// Register addresses
pub const BMI160_REG_DATA_ACC_X_L: u8 = 0x12;
pub const BMI160_REG_TEMPERATURE: u8 = 0x20;
pub const BMI160_REG_ACC_CONF: u8 = 0x40;
pub const BMI160_REG_GYR_CONF: u8 = 0x42;
pub const BMI160_REG_CMD: u8 = 0x7E;

// Motion block read on every tick: accel X/Y/Z then gyro X/Y/Z
pub const BMI160_MOTION_BLOCK_START: u8 = BMI160_REG_DATA_ACC_X_L;
pub const BMI160_MOTION_BLOCK_LEN: usize = 12;

// Soft reset command
pub const BMI160_CMD_SOFT_RESET: u8 = 0xB6;
pub const BMI160_RESET_DELAY_MS: u32 = 100;

// Accelerometer: ±2 g, normal power
pub const BMI160_ACC_CONF_VALUE: u8 = 0x28;
// Gyroscope: ±2000 °/s, normal power
pub const BMI160_GYR_CONF_VALUE: u8 = 0x26;

/// m/s² per raw accelerometer count at ±2 g (16384 LSB/g)
pub const ACCEL_SCALE: f32 = STANDARD_GRAVITY / 16384.0;
/// °/s per raw gyroscope count at ±2000 °/s
pub const GYRO_SCALE: f32 = 2000.0 / 32768.0;

pub const TEMP_SCALE: f32 = 0.5;
pub const TEMP_OFFSET: f32 = 23.0;

/// Raw register values of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    pub ax: i16,
    pub ay: i16,
    pub az: i16,
    pub gx: i16,
    pub gy: i16,
    pub gz: i16,
    /// Temperature code, `None` when its read failed
    pub temperature: Option<u8>,
}

impl RawSample {
    /// Decode the little-endian motion block
    pub fn from_le_bytes(data: &[u8; BMI160_MOTION_BLOCK_LEN], temperature: Option<u8>) -> Self {
        Self {
            ax: i16::from_le_bytes([data[0], data[1]]),
            ay: i16::from_le_bytes([data[2], data[3]]),
            az: i16::from_le_bytes([data[4], data[5]]),
            gx: i16::from_le_bytes([data[6], data[7]]),
            gy: i16::from_le_bytes([data[8], data[9]]),
            gz: i16::from_le_bytes([data[10], data[11]]),
            temperature,
        }
    }

    /// Convert to physical units
    ///
    /// `fallback_temperature` is used when this sample carries no
    /// temperature code.
    pub fn to_physical(&self, fallback_temperature: f32) -> PhysicalSample {
        PhysicalSample {
            accel: Vector3d::new(accel_ms2(self.ax), accel_ms2(self.ay), accel_ms2(self.az)),
            gyro: Vector3d::new(gyro_dps(self.gx), gyro_dps(self.gy), gyro_dps(self.gz)),
            temperature: self
                .temperature
                .map(temperature_c)
                .unwrap_or(fallback_temperature),
        }
    }
}

/// Raw accelerometer count to m/s²
pub fn accel_ms2(raw: i16) -> f32 {
    raw as f32 * ACCEL_SCALE
}

/// Raw gyroscope count to °/s
pub fn gyro_dps(raw: i16) -> f32 {
    raw as f32 * GYRO_SCALE
}

/// Temperature register code to °C
pub fn temperature_c(code: u8) -> f32 {
    code as f32 * TEMP_SCALE + TEMP_OFFSET
}

/// Soft reset, then put both sensors in normal mode
///
/// Every write is attempted even if an earlier one failed. The result of
/// each write is returned in order: reset, accelerometer, gyroscope.
pub async fn reset_and_configure<D: RegisterDevice, T: DelayNs>(
    device: &mut D,
    delay: &mut T,
) -> [Result<(), BusError>; 3] {
    let reset = device
        .write_register(BMI160_REG_CMD, BMI160_CMD_SOFT_RESET)
        .await;
    delay.delay_ms(BMI160_RESET_DELAY_MS).await;

    let accel = device
        .write_register(BMI160_REG_ACC_CONF, BMI160_ACC_CONF_VALUE)
        .await;
    let gyro = device
        .write_register(BMI160_REG_GYR_CONF, BMI160_GYR_CONF_VALUE)
        .await;

    [reset, accel, gyro]
}

/// Burst-read the motion block and read the temperature code
///
/// Only the motion block is required; a failed temperature read yields a
/// sample without temperature.
pub async fn read_raw_sample<D: RegisterDevice>(device: &mut D) -> Result<RawSample, BusError> {
    let mut data = [0u8; BMI160_MOTION_BLOCK_LEN];
    device
        .read_registers(BMI160_MOTION_BLOCK_START, &mut data)
        .await?;

    let temperature = device.read_register(BMI160_REG_TEMPERATURE).await.ok();

    Ok(RawSample::from_le_bytes(&data, temperature))
}
