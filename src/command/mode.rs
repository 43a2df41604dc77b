// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode of the air conditioner.

use serde::{Deserialize, Serialize};

/// The unit's operating mode.
///
/// Three modes are known to this bridge; everything else is an open-set
/// value carried through decode and re-encode unchanged. The bridge never
/// rejects a mode it does not recognize — the remote-control protocol may
/// grow modes this code has not heard of.
///
/// # Examples
///
/// ```
/// use aircon_relay::command::Mode;
///
/// assert_eq!(Mode::from(1), Mode::Cooler);
/// assert_eq!(Mode::from(8), Mode::Other(8));
/// assert_eq!(u8::from(Mode::Other(8)), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Mode {
    /// Cooling.
    Cooler,
    /// Heating.
    Heater,
    /// Dehumidifying.
    Dehumidifier,
    /// An unrecognized mode value, kept as-is.
    Other(u8),
}

impl Mode {
    /// Returns the raw wire value.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Cooler => 1,
            Self::Heater => 2,
            Self::Dehumidifier => 3,
            Self::Other(n) => n,
        }
    }
}

impl From<u8> for Mode {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Cooler,
            2 => Self::Heater,
            3 => Self::Dehumidifier,
            n => Self::Other(n),
        }
    }
}

impl From<Mode> for u8 {
    fn from(value: Mode) -> Self {
        value.as_byte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values_round_trip() {
        for mode in [Mode::Cooler, Mode::Heater, Mode::Dehumidifier] {
            assert_eq!(Mode::from(u8::from(mode)), mode);
        }
    }

    #[test]
    fn unknown_value_round_trips() {
        let mode = Mode::from(200);
        assert_eq!(mode, Mode::Other(200));
        assert_eq!(u8::from(mode), 200);
    }

    #[test]
    fn conversion_canonicalizes_known_bytes() {
        // A value matching a known mode never stays in the open-set variant.
        assert_eq!(Mode::from(2), Mode::Heater);
    }
}
