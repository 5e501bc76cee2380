// Console sinks: every published value becomes a log line

use driver::Sinks;
use hal::{BinarySink, Channel, NumericSink};
use log::info;

/// Render a numeric state with the channel's decimals and unit
pub fn format_value(channel: Channel, value: f32) -> String {
    let decimals = channel.accuracy_decimals().unwrap_or(0) as usize;
    match channel.unit() {
        Some(unit) => format!("{:.*} {}", decimals, value, unit),
        None => format!("{:.*}", decimals, value),
    }
}

pub fn format_state(state: bool) -> &'static str {
    if state {
        "ON"
    } else {
        "OFF"
    }
}

/// Logs every state it receives under a fixed target
pub struct LogSink {
    channel: Channel,
    target: &'static str,
}

impl LogSink {
    pub fn new(channel: Channel, target: &'static str) -> Self {
        Self { channel, target }
    }
}

impl NumericSink for LogSink {
    fn publish(&mut self, value: f32) {
        info!(
            target: self.target,
            "'{}': Sending state {}",
            self.channel.name(),
            format_value(self.channel, value)
        );
    }
}

impl BinarySink for LogSink {
    fn publish(&mut self, state: bool) {
        info!(
            target: self.target,
            "'{}': Sending state {}",
            self.channel.name(),
            format_state(state)
        );
    }
}

/// Bind a `LogSink` to each of `channels`
pub fn console_sinks(channels: &[Channel], target: &'static str) -> Sinks {
    let mut sinks = Sinks::default();
    for &channel in channels {
        let sink = LogSink::new(channel, target);
        if channel.is_binary() {
            sinks.bind_binary(channel, Box::new(sink));
        } else {
            sinks.bind_numeric(channel, Box::new(sink));
        }
    }
    sinks
}
