//! Mapping from X-Plane data groups to record channels.
//!
//! | id | group              | channels                                    | units in  |
//! |----|--------------------|---------------------------------------------|-----------|
//! | 3  | pitch/roll/heading | Pitch, Roll, Yaw ← 0, 1, 2                  | deg → rad |
//! | 16 | local velocity     | VelocityX/Y/Z ← 0, 1, 2                     | m/s       |
//! | 17 | local acceleration | Lateral, Longitudinal, Vertical ← 0, 1, 2   | g         |
//! | 20 | angular rate       | SpinX/Y/Z ← 0, 1, 2                         | deg/s → rad/s |
//! | 21 | engine             | RPM ← 0                                     | rpm       |
//! | 37 | controls           | Throttle ← 0, Brake ← 2, Gear ← 5           | raw       |
//!
//! Indices not listed are read off the wire and dropped. Group 37 carries
//! more than the record has room for; only three of its slots are kept.

use tracing::trace;

use super::packet::DataGroup;
use crate::types::{Channel, TelemetryRecord};

/// Unit conversion applied to every value of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Widen to `f64` unchanged.
    Identity,
    /// Widen to `f64` and multiply by π/180.
    DegreesToRadians,
}

impl Conversion {
    pub fn apply(self, value: f32) -> f64 {
        let value = f64::from(value);
        match self {
            Conversion::Identity => value,
            Conversion::DegreesToRadians => value.to_radians(),
        }
    }
}

/// How one known group lands in the record.
#[derive(Debug, Clone, Copy)]
pub struct GroupMapping {
    pub id: i32,
    pub name: &'static str,
    pub conversion: Conversion,
    /// `(value index, channel)` pairs.
    pub assignments: &'static [(usize, Channel)],
}

pub const ATTITUDE: i32 = 3;
pub const LOCAL_VELOCITY: i32 = 16;
pub const LOCAL_ACCELERATION: i32 = 17;
pub const ANGULAR_RATE: i32 = 20;
pub const ENGINE_RPM: i32 = 21;
pub const CONTROLS: i32 = 37;

/// Every group the bridge understands.
pub const GROUP_TABLE: &[GroupMapping] = &[
    GroupMapping {
        id: ATTITUDE,
        name: "pitch/roll/heading",
        conversion: Conversion::DegreesToRadians,
        assignments: &[(0, Channel::Pitch), (1, Channel::Roll), (2, Channel::Yaw)],
    },
    GroupMapping {
        id: LOCAL_VELOCITY,
        name: "local velocity",
        conversion: Conversion::Identity,
        assignments: &[(0, Channel::VelocityX), (1, Channel::VelocityY), (2, Channel::VelocityZ)],
    },
    GroupMapping {
        id: LOCAL_ACCELERATION,
        name: "local acceleration",
        conversion: Conversion::Identity,
        assignments: &[(0, Channel::Lateral), (1, Channel::Longitudinal), (2, Channel::Vertical)],
    },
    GroupMapping {
        id: ANGULAR_RATE,
        name: "angular rate",
        conversion: Conversion::DegreesToRadians,
        assignments: &[(0, Channel::SpinX), (1, Channel::SpinY), (2, Channel::SpinZ)],
    },
    GroupMapping {
        id: ENGINE_RPM,
        name: "engine rpm",
        conversion: Conversion::Identity,
        assignments: &[(0, Channel::Rpm)],
    },
    GroupMapping {
        id: CONTROLS,
        name: "controls",
        conversion: Conversion::Identity,
        assignments: &[(0, Channel::Throttle), (2, Channel::Brake), (5, Channel::Gear)],
    },
];

/// Find the mapping for a group id.
pub fn lookup(id: i32) -> Option<&'static GroupMapping> {
    GROUP_TABLE.iter().find(|mapping| mapping.id == id)
}

/// Write a decoded group into the record.
///
/// Returns `false` for ids with no mapping; the record is left untouched.
pub fn apply(record: &mut TelemetryRecord, group: &DataGroup) -> bool {
    let Some(mapping) = lookup(group.id) else {
        trace!(id = group.id, "Ignoring unknown group");
        return false;
    };

    for &(index, channel) in mapping.assignments {
        record.set(channel, mapping.conversion.apply(group.values[index]));
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::VALUES_PER_GROUP;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    const LEGACY_DEG_TO_RAD: f64 = 0.0174533;

    fn group(id: i32, values: [f32; VALUES_PER_GROUP]) -> DataGroup {
        DataGroup { id, values }
    }

    #[test]
    fn table_ids_are_unique_and_indices_in_range() {
        let mut ids: Vec<_> = GROUP_TABLE.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), GROUP_TABLE.len());

        for mapping in GROUP_TABLE {
            for (index, _) in mapping.assignments {
                assert!(*index < VALUES_PER_GROUP, "{} index {} out of range", mapping.name, index);
            }
        }
    }

    #[test]
    fn attitude_converts_to_radians() {
        let mut record = TelemetryRecord::new();
        assert!(apply(&mut record, &group(ATTITUDE, [90.0, -45.0, 180.0, 1.0, 1.0, 1.0, 1.0, 1.0])));

        assert!((record.get(Channel::Pitch) - FRAC_PI_2).abs() < 1e-6);
        assert!((record.get(Channel::Roll) + FRAC_PI_2 / 2.0).abs() < 1e-6);
        assert!((record.get(Channel::Yaw) - std::f64::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn velocity_and_acceleration_pass_through() {
        let mut record = TelemetryRecord::new();
        apply(&mut record, &group(LOCAL_VELOCITY, [1.5, -2.5, 3.25, 0.0, 0.0, 0.0, 0.0, 0.0]));
        apply(&mut record, &group(LOCAL_ACCELERATION, [0.5, 1.0, -9.75, 0.0, 0.0, 0.0, 0.0, 0.0]));

        assert_eq!(record.get(Channel::VelocityX), 1.5);
        assert_eq!(record.get(Channel::VelocityY), -2.5);
        assert_eq!(record.get(Channel::VelocityZ), 3.25);
        assert_eq!(record.get(Channel::Lateral), 0.5);
        assert_eq!(record.get(Channel::Longitudinal), 1.0);
        assert_eq!(record.get(Channel::Vertical), -9.75);
    }

    #[test]
    fn rpm_is_not_range_checked() {
        let mut record = TelemetryRecord::new();
        apply(&mut record, &group(ENGINE_RPM, [-123456.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0]));
        assert_eq!(record.get(Channel::Rpm), -123456.0);
    }

    #[test]
    fn controls_keep_only_throttle_brake_gear() {
        let mut record = TelemetryRecord::new();
        apply(&mut record, &group(CONTROLS, [0.75, 11.0, 0.25, 13.0, 14.0, 3.0, 16.0, 17.0]));

        assert_eq!(record.get(Channel::Throttle), 0.75);
        assert_eq!(record.get(Channel::Brake), 0.25);
        assert_eq!(record.get(Channel::Gear), 3.0);

        let touched = [Channel::Throttle, Channel::Brake, Channel::Gear];
        for channel in Channel::ALL.iter().filter(|c| !touched.contains(*c)) {
            assert_eq!(record.get(*channel), 0.0, "{} should be untouched", channel);
        }
    }

    #[test]
    fn unknown_group_is_ignored() {
        let mut record = TelemetryRecord::new();
        record.set(Channel::Speed, 42.0);
        let before = record.clone();

        assert!(!apply(&mut record, &group(999, [1.0; VALUES_PER_GROUP])));
        assert!(!apply(&mut record, &group(-1, [1.0; VALUES_PER_GROUP])));
        assert_eq!(record, before);
    }

    proptest! {
        #[test]
        fn angular_rate_matches_legacy_factor(v in -100.0f32..100.0) {
            let mut record = TelemetryRecord::new();
            apply(&mut record, &group(ANGULAR_RATE, [v, v, v, 0.0, 0.0, 0.0, 0.0, 0.0]));

            let expected = f64::from(v) * LEGACY_DEG_TO_RAD;
            for channel in [Channel::SpinX, Channel::SpinY, Channel::SpinZ] {
                prop_assert!((record.get(channel) - expected).abs() < 1e-6);
            }
        }

        #[test]
        fn mapping_only_touches_listed_channels(
            id in prop::sample::select(GROUP_TABLE.iter().map(|m| m.id).collect::<Vec<_>>()),
            values in prop::array::uniform8(-1.0e4f32..1.0e4),
            prior in -1.0e4f64..1.0e4
        ) {
            let mut record = TelemetryRecord::new();
            for channel in Channel::ALL {
                record.set(channel, prior);
            }
            apply(&mut record, &group(id, values));

            let mapping = lookup(id).unwrap();
            for channel in Channel::ALL {
                let assigned = mapping.assignments.iter().find(|(_, c)| *c == channel);
                match assigned {
                    Some((index, _)) => {
                        prop_assert_eq!(record.get(channel), mapping.conversion.apply(values[*index]));
                    }
                    None => prop_assert_eq!(record.get(channel), prior),
                }
            }
        }
    }
}
