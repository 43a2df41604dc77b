// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Human-readable command summaries.

use std::fmt::Write;

use crate::command::{AirVolume, Command, Mode, Power, WindDirection};

/// Fixed phrase for a unit that is not running.
const OFF_PHRASE: &str = "オフ:sleeping:";

/// Fallback label for modes this bridge does not recognize.
const UNKNOWN_MODE: &str = "???";

/// Renders a command as a short human-readable summary.
///
/// The mapping is total: every command, including ones carrying unknown
/// enum values, produces a non-empty string. Anything other than the known
/// "on" power value is summarized as off, independent of the remaining
/// fields.
///
/// # Examples
///
/// ```
/// use aircon_relay::command::{AirVolume, Command, Mode, Power, WindDirection};
/// use aircon_relay::notify::describe;
///
/// let command = Command {
///     power: Power::On,
///     mode: Mode::Cooler,
///     preset_temp: 26,
///     air_volume: AirVolume::Auto,
///     wind_direction: WindDirection::Auto,
/// };
/// assert_eq!(describe(&command), "冷房, 26℃\n風量: 自動, 風向: 自動");
/// ```
#[must_use]
pub fn describe(command: &Command) -> String {
    if !command.power.is_on() {
        return OFF_PHRASE.to_string();
    }

    let mut m = String::new();
    match command.mode {
        Mode::Cooler => m.push_str("冷房, "),
        Mode::Heater => m.push_str("暖房, "),
        Mode::Dehumidifier => m.push_str("除湿, "),
        Mode::Other(_) => {
            m.push_str(UNKNOWN_MODE);
            m.push_str(", ");
        }
    }

    let _ = write!(m, "{}℃\n風量: ", command.preset_temp);
    match command.air_volume {
        AirVolume::Auto => m.push_str("自動, "),
        AirVolume::Still => m.push_str("静, "),
        AirVolume::Powerful => m.push_str("パワフル, "),
        AirVolume::Level(n) => {
            let _ = write!(m, "{}, ", i16::from(n) - 1);
        }
    }

    m.push_str("風向: ");
    match command.wind_direction {
        WindDirection::Auto => m.push_str("自動"),
        WindDirection::Step(n) => {
            let _ = write!(m, "{n}");
        }
    }

    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Command {
        Command {
            power: Power::On,
            mode: Mode::Cooler,
            preset_temp: 26,
            air_volume: AirVolume::Auto,
            wind_direction: WindDirection::Auto,
        }
    }

    #[test]
    fn cooler_auto_summary() {
        assert_eq!(describe(&base()), "冷房, 26℃\n風量: 自動, 風向: 自動");
    }

    #[test]
    fn off_phrase_ignores_other_fields() {
        let mut command = base();
        command.power = Power::Off;
        assert_eq!(describe(&command), "オフ:sleeping:");

        command.mode = Mode::Other(99);
        command.preset_temp = 3;
        assert_eq!(describe(&command), "オフ:sleeping:");
    }

    #[test]
    fn unknown_power_is_summarized_as_off() {
        let mut command = base();
        command.power = Power::Other(7);
        assert_eq!(describe(&command), "オフ:sleeping:");
    }

    #[test]
    fn mode_labels() {
        let mut command = base();
        command.mode = Mode::Heater;
        assert!(describe(&command).starts_with("暖房, "));
        command.mode = Mode::Dehumidifier;
        assert!(describe(&command).starts_with("除湿, "));
        command.mode = Mode::Other(9);
        assert!(describe(&command).starts_with("???, "));
    }

    #[test]
    fn air_volume_labels() {
        let mut command = base();
        command.air_volume = AirVolume::Still;
        assert!(describe(&command).contains("風量: 静, "));
        command.air_volume = AirVolume::Powerful;
        assert!(describe(&command).contains("風量: パワフル, "));
        command.air_volume = AirVolume::Level(4);
        assert!(describe(&command).contains("風量: 3, "));
    }

    #[test]
    fn wind_direction_labels() {
        let mut command = base();
        command.wind_direction = WindDirection::Step(5);
        assert!(describe(&command).ends_with("風向: 5"));
    }

    #[test]
    fn summary_is_total_and_non_empty() {
        for power in 0..=5u8 {
            for mode in 0..=5u8 {
                for vol in 0..=8u8 {
                    let command = Command {
                        power: power.into(),
                        mode: mode.into(),
                        preset_temp: 22,
                        air_volume: vol.into(),
                        wind_direction: 2u8.into(),
                    };
                    assert!(!describe(&command).is_empty());
                }
            }
        }
    }
}
