//! Host simulation of a BMI160 board
//!
//! Runs the real driver against a register-level chip model on a simulated
//! I2C bus, with console sinks and host time.

pub mod board;
pub mod config;
pub mod sink;
pub mod util;

use embassy_futures::block_on;
use hal::PollingComponent;
use log::info;

use crate::board::HostClock;

/// Set up `component` and poll it `ticks` times at its own interval
///
/// `before_tick` runs ahead of every poll with the tick index, so the caller
/// can move the simulated board.
pub fn run<C: PollingComponent>(
    component: &mut C,
    clock: &HostClock,
    ticks: u32,
    mut before_tick: impl FnMut(&mut C, u32),
) {
    info!(
        target: "sitl",
        "Starting component, setup priority {}",
        component.setup_priority().value()
    );
    block_on(component.setup());
    component.dump_config();

    let interval = std::time::Duration::from_micros(component.update_interval().as_micros());
    let mut last_update_time = std::time::Instant::now();
    for tick in 0..ticks {
        if tick > 0 {
            let elapsed = last_update_time.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }
        last_update_time = std::time::Instant::now();

        before_tick(component, tick);
        block_on(component.update(clock.now()));
    }
    info!(target: "sitl", "Stopping after {} ticks", ticks);
}
