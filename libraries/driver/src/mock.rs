//! Test doubles for the register bus, the delay provider, the sinks and the logger

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Mutex;
use std::thread::{self, ThreadId};
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{ErrorKind, NoAcknowledgeSource};
use hal::{BinarySink, Channel, NumericSink};

use crate::bus::RegisterDevice;
use crate::error::BusError;
use crate::imu::bmi160::{BMI160_MOTION_BLOCK_START, BMI160_REG_TEMPERATURE};

/// Register transfer, recorded for verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Write { reg: u8, value: u8 },
    Read { reg: u8, len: usize },
}

/// In-memory register bank with fault injection
#[derive(Debug)]
pub struct MockDevice {
    regs: [u8; 256],
    transfers: Vec<Transfer>,
    fail_writes: bool,
    fail_motion: bool,
    fail_temperature: bool,
}

impl MockDevice {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            transfers: Vec::new(),
            fail_writes: false,
            fail_motion: false,
            fail_temperature: false,
        }
    }

    pub fn transfers(&self) -> Vec<Transfer> {
        self.transfers.clone()
    }

    /// Load accel X/Y/Z then gyro X/Y/Z counts into the motion block
    pub fn set_motion(&mut self, counts: &[i16; 6]) {
        let start = BMI160_MOTION_BLOCK_START as usize;
        for (i, count) in counts.iter().enumerate() {
            let bytes = count.to_le_bytes();
            self.regs[start + 2 * i] = bytes[0];
            self.regs[start + 2 * i + 1] = bytes[1];
        }
    }

    pub fn set_temperature(&mut self, code: u8) {
        self.regs[BMI160_REG_TEMPERATURE as usize] = code;
    }

    pub fn register(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn fail_motion_reads(&mut self, fail: bool) {
        self.fail_motion = fail;
    }

    pub fn fail_temperature_reads(&mut self, fail: bool) {
        self.fail_temperature = fail;
    }
}

impl RegisterDevice for MockDevice {
    async fn write_register(&mut self, reg: u8, value: u8) -> Result<(), BusError> {
        self.transfers.push(Transfer::Write { reg, value });
        if self.fail_writes {
            return Err(BusError::Transfer(ErrorKind::Bus));
        }
        self.regs[reg as usize] = value;
        Ok(())
    }

    async fn read_registers(&mut self, reg: u8, data: &mut [u8]) -> Result<(), BusError> {
        self.transfers.push(Transfer::Read {
            reg,
            len: data.len(),
        });
        if self.fail_motion && reg == BMI160_MOTION_BLOCK_START {
            return Err(BusError::Transfer(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Data,
            )));
        }
        if self.fail_temperature && reg == BMI160_REG_TEMPERATURE {
            return Err(BusError::Transfer(ErrorKind::Bus));
        }
        let start = reg as usize;
        data.copy_from_slice(&self.regs[start..start + data.len()]);
        Ok(())
    }
}

/// Delay provider that only adds up the requested time
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

/// One publish call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Published {
    Numeric(Channel, f32),
    Binary(Channel, bool),
}

impl Published {
    pub fn channel(&self) -> Channel {
        match self {
            Published::Numeric(channel, _) | Published::Binary(channel, _) => *channel,
        }
    }
}

/// Shared log of every publish call, in order
#[derive(Debug, Clone, Default)]
pub struct PublishLog(Rc<RefCell<Vec<Published>>>);

impl PublishLog {
    pub fn sink(&self, channel: Channel) -> RecordingSink {
        RecordingSink {
            channel,
            log: self.clone(),
        }
    }

    pub fn entries(&self) -> Vec<Published> {
        self.0.borrow().clone()
    }

    pub fn channels(&self) -> Vec<Channel> {
        self.0.borrow().iter().map(Published::channel).collect()
    }

    pub fn numeric(&self, channel: Channel) -> Option<f32> {
        self.0.borrow().iter().rev().find_map(|p| match p {
            Published::Numeric(c, value) if *c == channel => Some(*value),
            _ => None,
        })
    }

    pub fn binary(&self, channel: Channel) -> Option<bool> {
        self.0.borrow().iter().rev().find_map(|p| match p {
            Published::Binary(c, state) if *c == channel => Some(*state),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Sink bound to one channel that appends to a `PublishLog`
pub struct RecordingSink {
    channel: Channel,
    log: PublishLog,
}

impl NumericSink for RecordingSink {
    fn publish(&mut self, value: f32) {
        self.log
            .0
            .borrow_mut()
            .push(Published::Numeric(self.channel, value));
    }
}

impl BinarySink for RecordingSink {
    fn publish(&mut self, state: bool) {
        self.log
            .0
            .borrow_mut()
            .push(Published::Binary(self.channel, state));
    }
}

/// One log record, as seen by `capture_logs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLog {
    pub level: log::Level,
    pub target: String,
    pub message: String,
}

struct CaptureLogger;

static CAPTURED: Mutex<Vec<(ThreadId, CapturedLog)>> = Mutex::new(Vec::new());
static LOGGER: CaptureLogger = CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let entry = CapturedLog {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        if let Ok(mut captured) = CAPTURED.lock() {
            captured.push((thread::current().id(), entry));
        }
    }

    fn flush(&self) {}
}

/// Run `f` and return the log records it emitted on this thread
///
/// Tests run in parallel; records from other threads are left alone.
pub fn capture_logs(f: impl FnOnce()) -> Vec<CapturedLog> {
    // only the first call installs the logger
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Trace);

    let me = thread::current().id();
    take_records(me);
    f();
    take_records(me)
}

fn take_records(thread: ThreadId) -> Vec<CapturedLog> {
    let mut captured = CAPTURED.lock().unwrap_or_else(|e| e.into_inner());
    let mut mine = Vec::new();
    captured.retain(|(id, entry)| {
        if *id == thread {
            mine.push(entry.clone());
            false
        } else {
            true
        }
    });
    mine
}
