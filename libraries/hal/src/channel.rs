// Output channels of a 6-axis IMU component

/// Number of output channels, numeric and binary
pub const CHANNEL_COUNT: usize = 14;

/// A named output slot that a sink can be bound to
///
/// The declaration order is the publication order within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    AccelX,
    AccelY,
    AccelZ,
    GyroX,
    GyroY,
    GyroZ,
    Pitch,
    Roll,
    Inclination,
    Temperature,
    Vibration,
    TiltAlert,
    MotionAlert,
    VibrationAlert,
}

impl Channel {
    /// Every channel, in publication order
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::AccelX,
        Channel::AccelY,
        Channel::AccelZ,
        Channel::GyroX,
        Channel::GyroY,
        Channel::GyroZ,
        Channel::Pitch,
        Channel::Roll,
        Channel::Inclination,
        Channel::Temperature,
        Channel::Vibration,
        Channel::TiltAlert,
        Channel::MotionAlert,
        Channel::VibrationAlert,
    ];

    /// Configuration key of the channel
    pub fn name(self) -> &'static str {
        match self {
            Channel::AccelX => "accel_x",
            Channel::AccelY => "accel_y",
            Channel::AccelZ => "accel_z",
            Channel::GyroX => "gyro_x",
            Channel::GyroY => "gyro_y",
            Channel::GyroZ => "gyro_z",
            Channel::Pitch => "pitch",
            Channel::Roll => "roll",
            Channel::Inclination => "inclination",
            Channel::Temperature => "temperature",
            Channel::Vibration => "vibration",
            Channel::TiltAlert => "tilt_alert",
            Channel::MotionAlert => "motion_alert",
            Channel::VibrationAlert => "vibration_alert",
        }
    }

    /// Whether the channel carries a boolean alert rather than a number
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Channel::TiltAlert | Channel::MotionAlert | Channel::VibrationAlert
        )
    }

    /// Unit of measurement, `None` for binary channels
    pub fn unit(self) -> Option<&'static str> {
        match self {
            Channel::AccelX | Channel::AccelY | Channel::AccelZ | Channel::Vibration => {
                Some("m/s²")
            }
            Channel::GyroX | Channel::GyroY | Channel::GyroZ => Some("°/s"),
            Channel::Pitch | Channel::Roll | Channel::Inclination => Some("°"),
            Channel::Temperature => Some("°C"),
            Channel::TiltAlert | Channel::MotionAlert | Channel::VibrationAlert => None,
        }
    }

    /// Number of decimals a consumer should display, `None` for binary channels
    pub fn accuracy_decimals(self) -> Option<u8> {
        match self {
            Channel::AccelX
            | Channel::AccelY
            | Channel::AccelZ
            | Channel::GyroX
            | Channel::GyroY
            | Channel::GyroZ
            | Channel::Vibration => Some(3),
            Channel::Pitch | Channel::Roll | Channel::Inclination | Channel::Temperature => Some(1),
            Channel::TiltAlert | Channel::MotionAlert | Channel::VibrationAlert => None,
        }
    }
}
