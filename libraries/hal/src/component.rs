/// Scheduler-facing component interface
use embassy_time::{Duration, Instant};

/// Stage at which a component is set up relative to others
///
/// Higher stages are set up first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SetupPriority {
    /// Runs after everything else
    Late,
    /// Consumers of processed data
    Processor,
    /// Components that read data from hardware
    Data,
    /// Hardware peripherals that are not buses
    Hardware,
    /// Communication buses
    Bus,
}

impl SetupPriority {
    /// Numeric priority, higher runs earlier
    pub fn value(self) -> f32 {
        match self {
            SetupPriority::Bus => 1000.0,
            SetupPriority::Hardware => 800.0,
            SetupPriority::Data => 600.0,
            SetupPriority::Processor => 400.0,
            SetupPriority::Late => -100.0,
        }
    }
}

/// A component driven by an external scheduler
///
/// The scheduler calls `setup` exactly once, then `update` on every
/// interval. Calls never overlap.
pub trait PollingComponent {
    /// One-time hardware initialization
    async fn setup(&mut self);

    /// One poll tick
    async fn update(&mut self, now: Instant);

    /// Stage this component wants to be set up at
    fn setup_priority(&self) -> SetupPriority;

    /// Time between two `update` calls
    fn update_interval(&self) -> Duration;

    /// Log the active configuration
    fn dump_config(&self);
}
