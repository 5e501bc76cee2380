#![no_std]
extern crate nalgebra;

mod channel;
mod component;
mod imu;
mod sink;
mod types;

pub use channel::*;
pub use component::*;
pub use imu::*;
pub use sink::*;
pub use types::*;
