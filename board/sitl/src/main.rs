use anyhow::Context;
use driver::{Bmi160, I2cRegisterDevice, BMI160_I2C_ADDR_PRIMARY};
use hal::Channel;
use log::info;

use sitl::board::{HostClock, SimulatedBmi160, StdDelay};
use sitl::config::SitlSettings;
use sitl::sink::console_sinks;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = SitlSettings::from_env().context("failed to read SITL settings")?;
    info!(target: "sitl", "Settings: {:?}", settings);

    let mut chip = SimulatedBmi160::new();
    chip.set_shake(settings.shake_g);
    let device = I2cRegisterDevice::new(chip, BMI160_I2C_ADDR_PRIMARY);
    let sinks = console_sinks(&Channel::ALL, settings.driver.tag);
    let mut imu = Bmi160::new_with_config(device, StdDelay, settings.driver, sinks)?;

    let clock = HostClock::new();
    sitl::run(&mut imu, &clock, settings.ticks, |imu, tick| {
        // level for the first tick, then the requested pose
        if tick == 1 {
            imu.device_mut()
                .bus_mut()
                .set_orientation(settings.pitch_deg, settings.roll_deg);
        }
    });

    let status = imu.status();
    info!(
        target: "sitl",
        "Healthy: {}, consecutive failures: {}",
        status.healthy,
        status.consecutive_failures
    );
    Ok(())
}
