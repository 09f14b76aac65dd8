//! Named `f64` channels of the telemetry record, in ABI order.

use std::fmt;

/// Number of `f64` channels in the record.
pub const CHANNEL_COUNT: usize = 28;

/// One double-precision slot of [`TelemetryRecord`](super::TelemetryRecord).
///
/// The discriminant is the channel's position in the published layout.
/// Reordering variants changes the byte offsets every reader relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Channel {
    Lateral = 0,
    Longitudinal,
    Vertical,
    Pitch,
    Roll,
    Yaw,
    PositionX,
    PositionY,
    PositionZ,
    VelocityX,
    VelocityY,
    VelocityZ,
    SpinX,
    SpinY,
    SpinZ,
    WheelSpeedFL,
    WheelSpeedFR,
    WheelSpeedRL,
    WheelSpeedRR,
    Rpm,
    Speed,
    Gear,
    Throttle,
    Brake,
    Clutch,
    Steering,
    Abs,
    SlipAngle,
}

impl Channel {
    /// All channels in layout order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Lateral,
        Channel::Longitudinal,
        Channel::Vertical,
        Channel::Pitch,
        Channel::Roll,
        Channel::Yaw,
        Channel::PositionX,
        Channel::PositionY,
        Channel::PositionZ,
        Channel::VelocityX,
        Channel::VelocityY,
        Channel::VelocityZ,
        Channel::SpinX,
        Channel::SpinY,
        Channel::SpinZ,
        Channel::WheelSpeedFL,
        Channel::WheelSpeedFR,
        Channel::WheelSpeedRL,
        Channel::WheelSpeedRR,
        Channel::Rpm,
        Channel::Speed,
        Channel::Gear,
        Channel::Throttle,
        Channel::Brake,
        Channel::Clutch,
        Channel::Steering,
        Channel::Abs,
        Channel::SlipAngle,
    ];

    /// Position of this channel among the `f64` slots.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Byte offset of this channel inside the serialized record.
    pub const fn offset(self) -> usize {
        super::record::CHANNELS_OFFSET + self.index() * size_of::<f64>()
    }

    /// Field name as readers of the segment know it.
    pub const fn name(self) -> &'static str {
        match self {
            Channel::Lateral => "Lateral",
            Channel::Longitudinal => "Longitudinal",
            Channel::Vertical => "Vertical",
            Channel::Pitch => "Pitch",
            Channel::Roll => "Roll",
            Channel::Yaw => "Yaw",
            Channel::PositionX => "PositionX",
            Channel::PositionY => "PositionY",
            Channel::PositionZ => "PositionZ",
            Channel::VelocityX => "VelocityX",
            Channel::VelocityY => "VelocityY",
            Channel::VelocityZ => "VelocityZ",
            Channel::SpinX => "SpinX",
            Channel::SpinY => "SpinY",
            Channel::SpinZ => "SpinZ",
            Channel::WheelSpeedFL => "WheelSpeedFL",
            Channel::WheelSpeedFR => "WheelSpeedFR",
            Channel::WheelSpeedRL => "WheelSpeedRL",
            Channel::WheelSpeedRR => "WheelSpeedRR",
            Channel::Rpm => "RPM",
            Channel::Speed => "Speed",
            Channel::Gear => "Gear",
            Channel::Throttle => "Throttle",
            Channel::Brake => "Brake",
            Channel::Clutch => "Clutch",
            Channel::Steering => "Steering",
            Channel::Abs => "ABS",
            Channel::SlipAngle => "SlipAngle",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
