// Register-level access to a sensor on a shared bus
//
// Drivers talk to a `RegisterDevice`, which already knows the device
// address. `I2cRegisterDevice` provides one on top of any
// `embedded-hal-async` I2C bus.

use embedded_hal_async::i2c::{Error as _, I2c};

use crate::error::BusError;

/// Byte-oriented register access for one device
pub trait RegisterDevice {
    /// Write to a single register
    async fn write_register(&mut self, reg: u8, value: u8) -> Result<(), BusError>;

    /// Read `data.len()` consecutive registers starting at `reg`
    async fn read_registers(&mut self, reg: u8, data: &mut [u8]) -> Result<(), BusError>;

    /// Read a single register
    async fn read_register(&mut self, reg: u8) -> Result<u8, BusError> {
        let mut buffer = [0u8; 1];
        self.read_registers(reg, &mut buffer).await?;
        Ok(buffer[0])
    }
}

/// A device at a fixed 7-bit address on an async I2C bus
pub struct I2cRegisterDevice<I> {
    i2c: I,
    addr: u8,
}

impl<I: I2c> I2cRegisterDevice<I> {
    pub fn new(i2c: I, addr: u8) -> Self {
        Self { i2c, addr }
    }

    pub fn address(&self) -> u8 {
        self.addr
    }

    pub fn bus_mut(&mut self) -> &mut I {
        &mut self.i2c
    }

    /// Give the bus back
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> RegisterDevice for I2cRegisterDevice<I> {
    async fn write_register(&mut self, reg: u8, value: u8) -> Result<(), BusError> {
        self.i2c
            .write(self.addr, &[reg, value])
            .await
            .map_err(|e| BusError::Transfer(e.kind()))
    }

    async fn read_registers(&mut self, reg: u8, data: &mut [u8]) -> Result<(), BusError> {
        self.i2c
            .write_read(self.addr, &[reg], data)
            .await
            .map_err(|e| BusError::Transfer(e.kind()))
    }
}
