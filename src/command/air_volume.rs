// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed (air volume) of the air conditioner.

use serde::{Deserialize, Serialize};

/// The fan-speed setting.
///
/// Auto, still, and powerful are named settings; any other wire value is a
/// manual fan level carried through unchanged. Manual levels are stored
/// offset by one on the remote-control protocol; rendering for humans is
/// the summary builder's job.
///
/// # Examples
///
/// ```
/// use aircon_relay::command::AirVolume;
///
/// assert_eq!(AirVolume::from(0), AirVolume::Auto);
/// assert_eq!(AirVolume::from(3), AirVolume::Level(3));
/// assert_eq!(u8::from(AirVolume::Level(3)), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum AirVolume {
    /// Fan speed chosen by the unit.
    Auto,
    /// Quiet operation.
    Still,
    /// Maximum airflow.
    Powerful,
    /// A manual fan level, kept as-is.
    Level(u8),
}

impl AirVolume {
    /// Returns the raw wire value.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Auto => 0,
            Self::Still => 1,
            Self::Powerful => 7,
            Self::Level(n) => n,
        }
    }
}

impl From<u8> for AirVolume {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Auto,
            1 => Self::Still,
            7 => Self::Powerful,
            n => Self::Level(n),
        }
    }
}

impl From<AirVolume> for u8 {
    fn from(value: AirVolume) -> Self {
        value.as_byte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values_round_trip() {
        for vol in [AirVolume::Auto, AirVolume::Still, AirVolume::Powerful] {
            assert_eq!(AirVolume::from(u8::from(vol)), vol);
        }
    }

    #[test]
    fn level_round_trips() {
        let vol = AirVolume::from(4);
        assert_eq!(vol, AirVolume::Level(4));
        assert_eq!(u8::from(vol), 4);
    }

    #[test]
    fn named_settings_keep_their_bytes() {
        assert_eq!(u8::from(AirVolume::Auto), 0);
        assert_eq!(u8::from(AirVolume::Still), 1);
        assert_eq!(u8::from(AirVolume::Powerful), 7);
    }
}
