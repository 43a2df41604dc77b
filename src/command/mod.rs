// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Air-conditioner command structures.
//!
//! A [`Command`] is the unit of work flowing through the bridge: one decoded
//! inbound message, consumed by exactly one relay-loop iteration. All
//! enum-like fields are open sets — unrecognized wire values survive a
//! decode/re-encode round trip byte for byte, so a payload produced by a
//! newer controller never gets rejected or mangled here.

mod air_volume;
mod mode;
mod power;
mod wind_direction;

pub use air_volume::AirVolume;
pub use mode::Mode;
pub use power::Power;
pub use wind_direction::WindDirection;

use serde::{Deserialize, Serialize};

/// A structured air-conditioner control intent.
///
/// The wire format is a JSON object with camelCase keys:
///
/// ```json
/// {"power":1,"mode":1,"presetTemp":26,"airVolume":0,"windDirection":0}
/// ```
///
/// # Examples
///
/// ```
/// use aircon_relay::command::{AirVolume, Command, Mode, Power, WindDirection};
///
/// let raw = br#"{"power":1,"mode":1,"presetTemp":26,"airVolume":0,"windDirection":0}"#;
/// let command = Command::decode(raw).unwrap();
/// assert_eq!(command.power, Power::On);
/// assert_eq!(command.mode, Mode::Cooler);
/// assert_eq!(command.preset_temp, 26);
/// assert_eq!(command.air_volume, AirVolume::Auto);
/// assert_eq!(command.wind_direction, WindDirection::Auto);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    /// Whether the unit should run.
    pub power: Power,
    /// Operating mode.
    pub mode: Mode,
    /// Target temperature in degrees Celsius.
    pub preset_temp: u8,
    /// Fan-speed setting.
    pub air_volume: AirVolume,
    /// Louver setting.
    pub wind_direction: WindDirection,
}

impl Command {
    /// Decodes a command from raw message bytes.
    ///
    /// # Errors
    ///
    /// Returns the underlying JSON error if the payload is malformed.
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// Re-serializes the command for republishing on the state topic.
    ///
    /// # Errors
    ///
    /// Returns the underlying JSON error if serialization fails.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Command {
        Command {
            power: Power::On,
            mode: Mode::Cooler,
            preset_temp: 26,
            air_volume: AirVolume::Auto,
            wind_direction: WindDirection::Auto,
        }
    }

    #[test]
    fn decode_encode_round_trip() {
        let command = sample();
        let encoded = command.encode().unwrap();
        let decoded = Command::decode(&encoded).unwrap();
        assert_eq!(decoded, command);
    }

    #[test]
    fn round_trip_preserves_unknown_enum_values() {
        let command = Command {
            power: Power::Other(7),
            mode: Mode::Other(9),
            preset_temp: 22,
            air_volume: AirVolume::Level(5),
            wind_direction: WindDirection::Step(4),
        };
        let encoded = command.encode().unwrap();
        let decoded = Command::decode(&encoded).unwrap();
        assert_eq!(decoded, command);
    }

    #[test]
    fn wire_keys_are_camel_case() {
        let json: serde_json::Value = serde_json::from_slice(&sample().encode().unwrap()).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["power", "mode", "presetTemp", "airVolume", "windDirection"] {
            assert!(obj.contains_key(key), "missing wire key {key}");
        }
    }

    #[test]
    fn decode_rejects_malformed_payload() {
        assert!(Command::decode(b"not json").is_err());
    }

    #[test]
    fn enum_fields_serialize_as_numbers() {
        let json: serde_json::Value = serde_json::from_slice(&sample().encode().unwrap()).unwrap();
        assert_eq!(json["power"], 1);
        assert_eq!(json["mode"], 1);
        assert_eq!(json["airVolume"], 0);
        assert_eq!(json["windDirection"], 0);
    }
}
