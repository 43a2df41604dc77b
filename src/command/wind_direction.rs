// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Louver (wind direction) setting of the air conditioner.

use serde::{Deserialize, Serialize};

/// The louver angle setting.
///
/// `0` means the unit swings or aims automatically; any other value is a
/// fixed louver step carried through unchanged.
///
/// # Examples
///
/// ```
/// use aircon_relay::command::WindDirection;
///
/// assert_eq!(WindDirection::from(0), WindDirection::Auto);
/// assert_eq!(WindDirection::from(3), WindDirection::Step(3));
/// assert_eq!(u8::from(WindDirection::Step(3)), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum WindDirection {
    /// Direction chosen by the unit.
    Auto,
    /// A fixed louver step, kept as-is.
    Step(u8),
}

impl WindDirection {
    /// Returns the raw wire value.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Auto => 0,
            Self::Step(n) => n,
        }
    }
}

impl From<u8> for WindDirection {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Auto,
            n => Self::Step(n),
        }
    }
}

impl From<WindDirection> for u8 {
    fn from(value: WindDirection) -> Self {
        value.as_byte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_round_trips() {
        assert_eq!(WindDirection::from(u8::from(WindDirection::Auto)), WindDirection::Auto);
    }

    #[test]
    fn step_round_trips() {
        let dir = WindDirection::from(5);
        assert_eq!(dir, WindDirection::Step(5));
        assert_eq!(u8::from(dir), 5);
    }
}
