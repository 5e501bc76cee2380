// Publish interfaces for computed values
//
// A sink is owned by the producer once bound. Consumers that need to
// observe the published values keep their own shared handle inside the
// sink implementation.

/// Receiver for a numeric measurement channel
pub trait NumericSink {
    /// Accept the value computed for this tick
    fn publish(&mut self, value: f32);
}

/// Receiver for a boolean alert channel
pub trait BinarySink {
    /// Accept the state computed for this tick
    fn publish(&mut self, state: bool);
}
