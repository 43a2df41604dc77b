// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state of the air conditioner.

use serde::{Deserialize, Serialize};

/// Whether the air conditioner is running.
///
/// The wire representation is numeric: `0` is off, `1` is on. Any other
/// value is preserved as [`Power::Other`] so that payloads from newer
/// remote-control firmware round-trip unchanged.
///
/// # Examples
///
/// ```
/// use aircon_relay::command::Power;
///
/// assert_eq!(Power::from(0), Power::Off);
/// assert_eq!(Power::from(1), Power::On);
/// assert_eq!(Power::from(9), Power::Other(9));
/// assert_eq!(u8::from(Power::Other(9)), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Power {
    /// The unit is off.
    Off,
    /// The unit is on.
    On,
    /// An unrecognized power value, kept as-is.
    Other(u8),
}

impl Power {
    /// Returns the raw wire value.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
            Self::Other(n) => n,
        }
    }

    /// Returns `true` only for the known "on" value.
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<u8> for Power {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Off,
            1 => Self::On,
            n => Self::Other(n),
        }
    }
}

impl From<Power> for u8 {
    fn from(value: Power) -> Self {
        value.as_byte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values_round_trip() {
        assert_eq!(Power::from(u8::from(Power::Off)), Power::Off);
        assert_eq!(Power::from(u8::from(Power::On)), Power::On);
    }

    #[test]
    fn unknown_value_round_trips() {
        let p = Power::from(42);
        assert_eq!(p, Power::Other(42));
        assert_eq!(u8::from(p), 42);
    }

    #[test]
    fn only_on_is_on() {
        assert!(Power::On.is_on());
        assert!(!Power::Off.is_on());
        assert!(!Power::Other(2).is_on());
    }
}
