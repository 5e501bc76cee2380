// Simulated BMI160 on a host I2C bus, plus host time and delay

use driver::imu::bmi160::{
    ACCEL_SCALE, BMI160_CMD_SOFT_RESET, BMI160_I2C_ADDR_PRIMARY, BMI160_MOTION_BLOCK_START,
    BMI160_REG_ACC_CONF, BMI160_REG_CMD, BMI160_REG_GYR_CONF, BMI160_REG_TEMPERATURE, GYRO_SCALE,
    TEMP_OFFSET, TEMP_SCALE,
};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use hal::STANDARD_GRAVITY;
use log::trace;

use crate::util::{body_gravity, to_counts};

const REG_CHIP_ID: u8 = 0x00;
const CHIP_ID: u8 = 0xD1;
const POWER_ON_ACC_CONF: u8 = 0x28;
const POWER_ON_GYR_CONF: u8 = 0x28;

/// Injected bus fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Nothing acknowledges the address
    Absent,
    /// Reads of the motion block fail
    MotionRead,
    /// Reads of the temperature register fail
    TemperatureRead,
}

/// Register-level model of a BMI160
///
/// Register writes auto-increment like the real chip. The motion block is
/// regenerated from the simulated pose before every burst read.
pub struct SimulatedBmi160 {
    addr: u8,
    regs: [u8; 256],
    pointer: u8,

    /// Specific force in g, body frame
    accel_g: (f32, f32, f32),
    /// Angular rate in °/s
    gyro_dps: (f32, f32, f32),
    /// Peak X-axis shake in g, sign alternates per burst read
    shake_g: f32,
    shake_positive: bool,

    fault: Option<Fault>,
    resets: u32,
}

impl SimulatedBmi160 {
    pub fn new() -> Self {
        Self::with_address(BMI160_I2C_ADDR_PRIMARY)
    }

    pub fn with_address(addr: u8) -> Self {
        let mut chip = Self {
            addr,
            regs: [0; 256],
            pointer: 0,
            accel_g: (0.0, 0.0, 1.0),
            gyro_dps: (0.0, 0.0, 0.0),
            shake_g: 0.0,
            shake_positive: true,
            fault: None,
            resets: 0,
        };
        chip.power_on();
        chip.set_temperature_c(TEMP_OFFSET);
        chip
    }

    /// Hold the board still at a pitch and roll, in degrees
    pub fn set_orientation(&mut self, pitch_deg: f32, roll_deg: f32) {
        self.accel_g = body_gravity(pitch_deg, roll_deg);
        self.refresh_motion();
    }

    pub fn set_angular_rate(&mut self, x: f32, y: f32, z: f32) {
        self.gyro_dps = (x, y, z);
        self.refresh_motion();
    }

    pub fn set_shake(&mut self, peak_g: f32) {
        self.shake_g = peak_g.abs();
        self.refresh_motion();
    }

    pub fn set_temperature_c(&mut self, celsius: f32) {
        let code = ((celsius - TEMP_OFFSET) / TEMP_SCALE).round().clamp(0.0, 255.0);
        self.regs[BMI160_REG_TEMPERATURE as usize] = code as u8;
    }

    pub fn set_fault(&mut self, fault: Option<Fault>) {
        self.fault = fault;
    }

    pub fn register(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    /// Soft resets seen since creation
    pub fn resets(&self) -> u32 {
        self.resets
    }

    fn power_on(&mut self) {
        self.regs[REG_CHIP_ID as usize] = CHIP_ID;
        self.regs[BMI160_REG_ACC_CONF as usize] = POWER_ON_ACC_CONF;
        self.regs[BMI160_REG_GYR_CONF as usize] = POWER_ON_GYR_CONF;
        self.refresh_motion();
    }

    fn refresh_motion(&mut self) {
        let shake = if self.shake_positive {
            self.shake_g
        } else {
            -self.shake_g
        };
        let (ax, ay, az) = self.accel_g;
        let (gx, gy, gz) = self.gyro_dps;

        let accel_counts_per_g = STANDARD_GRAVITY / ACCEL_SCALE;
        let gyro_counts_per_dps = 1.0 / GYRO_SCALE;
        let counts = [
            to_counts(ax + shake, accel_counts_per_g),
            to_counts(ay, accel_counts_per_g),
            to_counts(az, accel_counts_per_g),
            to_counts(gx, gyro_counts_per_dps),
            to_counts(gy, gyro_counts_per_dps),
            to_counts(gz, gyro_counts_per_dps),
        ];

        let start = BMI160_MOTION_BLOCK_START as usize;
        for (i, count) in counts.iter().enumerate() {
            let [lo, hi] = count.to_le_bytes();
            self.regs[start + 2 * i] = lo;
            self.regs[start + 2 * i + 1] = hi;
        }
    }

    fn store(&mut self, reg: u8, value: u8) {
        if reg == BMI160_REG_CMD && value == BMI160_CMD_SOFT_RESET {
            trace!(target: "sitl", "soft reset");
            self.resets += 1;
            self.power_on();
            return;
        }
        self.regs[reg as usize] = value;
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        if let Some((reg, values)) = bytes.split_first() {
            self.pointer = *reg;
            for value in values {
                self.store(self.pointer, *value);
                self.pointer = self.pointer.wrapping_add(1);
            }
        }
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<(), ErrorKind> {
        match (self.fault, self.pointer) {
            (Some(Fault::MotionRead), BMI160_MOTION_BLOCK_START) => return Err(ErrorKind::Bus),
            (Some(Fault::TemperatureRead), BMI160_REG_TEMPERATURE) => return Err(ErrorKind::Other),
            _ => {}
        }

        if self.pointer == BMI160_MOTION_BLOCK_START && self.shake_g > 0.0 {
            self.shake_positive = !self.shake_positive;
            self.refresh_motion();
        }

        for byte in buffer.iter_mut() {
            *byte = self.regs[self.pointer as usize];
            self.pointer = self.pointer.wrapping_add(1);
        }
        Ok(())
    }
}

impl Default for SimulatedBmi160 {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for SimulatedBmi160 {
    type Error = ErrorKind;
}

impl I2c for SimulatedBmi160 {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.addr || self.fault == Some(Fault::Absent) {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for operation in operations {
            match operation {
                Operation::Write(bytes) => self.write_bytes(bytes),
                Operation::Read(buffer) => self.read_bytes(buffer)?,
            }
        }
        Ok(())
    }
}

/// Blocking delay backed by the host thread
#[derive(Debug, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    async fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Monotonic host clock expressed as embassy instants
#[derive(Debug, Clone, Copy)]
pub struct HostClock {
    start: std::time::Instant,
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    pub fn now(&self) -> embassy_time::Instant {
        embassy_time::Instant::from_micros(self.start.elapsed().as_micros() as u64)
    }
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}
