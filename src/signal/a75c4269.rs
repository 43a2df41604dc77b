// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Frame builder for the Panasonic A75C4269 remote-control protocol.
//!
//! The protocol sends two LSB-first frames per button press: a fixed leader
//! frame and a variable frame carrying the requested state plus an additive
//! checksum. Bits use a fixed mark with a short space for `0` and a long
//! space for `1`.

use crate::command::Command;
use crate::signal::{PulseSequence, SignalEncoder};

// Timings in microseconds.
const HEADER_MARK: u32 = 3500;
const HEADER_SPACE: u32 = 1750;
const BIT_MARK: u32 = 435;
const ZERO_SPACE: u32 = 435;
const ONE_SPACE: u32 = 1300;
const FRAME_GAP: u32 = 10000;

/// Shared prefix of both frames.
const FRAME_PREFIX: [u8; 5] = [0x02, 0x20, 0xE0, 0x04, 0x00];

/// The fixed leader frame.
const LEADER_FRAME: [u8; 8] = [0x02, 0x20, 0xE0, 0x04, 0x00, 0x00, 0x00, 0x06];

/// Length of the variable frame including the checksum byte.
const STATE_FRAME_LEN: usize = 19;

/// Encoder for Panasonic A75C4269-compatible air conditioners.
///
/// # Examples
///
/// ```
/// use aircon_relay::command::{AirVolume, Command, Mode, Power, WindDirection};
/// use aircon_relay::signal::{A75c4269Encoder, SignalEncoder};
///
/// let command = Command {
///     power: Power::On,
///     mode: Mode::Cooler,
///     preset_temp: 26,
///     air_volume: AirVolume::Auto,
///     wind_direction: WindDirection::Auto,
/// };
/// let pulses = A75c4269Encoder::new().encode(&command);
/// assert!(!pulses.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct A75c4269Encoder;

impl A75c4269Encoder {
    /// Creates a new encoder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the variable frame for a command.
    fn state_frame(command: &Command) -> [u8; STATE_FRAME_LEN] {
        let mut frame = [0u8; STATE_FRAME_LEN];
        frame[..FRAME_PREFIX.len()].copy_from_slice(&FRAME_PREFIX);

        // Open-set enum values go into the frame as their raw bytes, so an
        // unknown mode or fan setting is still encodable.
        frame[5] = (command.mode.as_byte() << 4) | (command.power.as_byte() & 0x0F);
        frame[6] = command.preset_temp.wrapping_mul(2);
        frame[8] = (command.air_volume.as_byte() << 4) | (command.wind_direction.as_byte() & 0x0F);

        let sum: u8 = frame[..STATE_FRAME_LEN - 1]
            .iter()
            .fold(0u8, |acc, b| acc.wrapping_add(*b));
        frame[STATE_FRAME_LEN - 1] = sum;
        frame
    }

    /// Appends one frame's header, bits, and trailing mark to the train.
    fn push_frame(out: &mut Vec<u32>, frame: &[u8]) {
        out.push(HEADER_MARK);
        out.push(HEADER_SPACE);
        for byte in frame {
            for bit in 0..8 {
                out.push(BIT_MARK);
                if byte >> bit & 1 == 1 {
                    out.push(ONE_SPACE);
                } else {
                    out.push(ZERO_SPACE);
                }
            }
        }
        out.push(BIT_MARK);
    }
}

impl SignalEncoder for A75c4269Encoder {
    fn encode(&self, command: &Command) -> PulseSequence {
        let state = Self::state_frame(command);
        let mut out =
            Vec::with_capacity(2 * (LEADER_FRAME.len() + STATE_FRAME_LEN) * 16 + 8);
        Self::push_frame(&mut out, &LEADER_FRAME);
        out.push(FRAME_GAP);
        Self::push_frame(&mut out, &state);
        PulseSequence::new(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{AirVolume, Mode, Power, WindDirection};

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
    fn encoding_is_deterministic() {
        let encoder = A75c4269Encoder::new();
        assert_eq!(encoder.encode(&sample()), encoder.encode(&sample()));
    }

    #[test]
    fn pulse_train_starts_and_ends_with_mark() {
        let pulses = A75c4269Encoder::new().encode(&sample());
        assert_eq!(pulses.len() % 2, 1, "mark/space train must be odd-length");
        assert_eq!(pulses.as_micros()[0], HEADER_MARK);
        assert_eq!(*pulses.as_micros().last().unwrap(), BIT_MARK);
    }

    #[test]
    fn pulse_train_has_expected_length() {
        // Two headers, a frame gap, two trailing marks, and two mark/space
        // pairs per bit of both frames.
        let bits = (LEADER_FRAME.len() + STATE_FRAME_LEN) * 8;
        let expected = 2 * 2 + 1 + 2 + bits * 2;
        let pulses = A75c4269Encoder::new().encode(&sample());
        assert_eq!(pulses.len(), expected);
    }

    #[test]
    fn different_commands_produce_different_trains() {
        let encoder = A75c4269Encoder::new();
        let mut off = sample();
        off.power = Power::Off;
        assert_ne!(encoder.encode(&sample()), encoder.encode(&off));
    }

    #[test]
    fn unknown_enum_values_are_encodable() {
        let command = Command {
            power: Power::Other(5),
            mode: Mode::Other(12),
            preset_temp: 20,
            air_volume: AirVolume::Level(4),
            wind_direction: WindDirection::Step(3),
        };
        let pulses = A75c4269Encoder::new().encode(&command);
        assert!(!pulses.is_empty());
    }

    #[test]
    fn checksum_closes_the_state_frame() {
        let frame = A75c4269Encoder::state_frame(&sample());
        let sum: u8 = frame[..STATE_FRAME_LEN - 1]
            .iter()
            .fold(0u8, |acc, b| acc.wrapping_add(*b));
        assert_eq!(frame[STATE_FRAME_LEN - 1], sum);
    }
}
