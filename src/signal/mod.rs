// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Infrared signal encoding.
//!
//! The relay loop treats a pulse train as opaque: it asks a [`SignalEncoder`]
//! for one and hands it to the transmitter without looking inside. The only
//! encoder shipped with this crate targets the Panasonic A75C4269 remote
//! protocol; other units can plug in behind the same trait.

mod a75c4269;

pub use a75c4269::A75c4269Encoder;

use crate::command::Command;

/// An ordered mark/space pulse train in microseconds.
///
/// The sequence starts and ends with a mark (IR carrier on), so a valid
/// sequence always has an odd number of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseSequence(Vec<u32>);

impl PulseSequence {
    /// Wraps raw mark/space durations.
    #[must_use]
    pub fn new(durations: Vec<u32>) -> Self {
        Self(durations)
    }

    /// Returns the durations in microseconds.
    #[must_use]
    pub fn as_micros(&self) -> &[u32] {
        &self.0
    }

    /// Returns the number of mark/space entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the sequence holds no pulses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Maps a structured command to a hardware pulse train.
///
/// Encoding is pure and total: every structurally valid [`Command`] produces
/// a pulse train, including commands carrying enum values this crate does
/// not recognize (their raw bytes go into the frame unchanged).
pub trait SignalEncoder {
    /// Encodes a command into the pulse train the transmitter will emit.
    fn encode(&self, command: &Command) -> PulseSequence;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_sequence_exposes_durations() {
        let seq = PulseSequence::new(vec![3500, 1750, 435]);
        assert_eq!(seq.as_micros(), &[3500, 1750, 435]);
        assert_eq!(seq.len(), 3);
        assert!(!seq.is_empty());
    }

    #[test]
    fn empty_sequence() {
        let seq = PulseSequence::new(Vec::new());
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
    }
}
