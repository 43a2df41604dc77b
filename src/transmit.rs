// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Infrared transmitter drivers.
//!
//! The relay loop drives the transmitter through the [`Transmitter`] trait.
//! The call is synchronous from the loop's perspective: while a frame is on
//! the wire no other command may start transmitting, so the loop simply
//! waits for it.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::TransmitError;
use crate::signal::PulseSequence;

/// Emits a pulse train through infrared hardware.
pub trait Transmitter {
    /// Transmits one pulse sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TransmitError`] when the hardware rejects or fails the
    /// emission. The relay loop treats this as fatal.
    fn transmit(&mut self, pulses: &PulseSequence) -> Result<(), TransmitError>;
}

/// Transmitter backed by a LIRC character device.
///
/// The kernel LIRC interface accepts a pulse train as a write of
/// native-endian `u32` durations in microseconds, alternating mark/space
/// and starting with a mark. The write returns once the driver has queued
/// the full train.
///
/// # Examples
///
/// ```no_run
/// use aircon_relay::transmit::LircTransmitter;
///
/// let tx = LircTransmitter::open("/dev/lirc0")?;
/// # Ok::<(), aircon_relay::error::TransmitError>(())
/// ```
#[derive(Debug)]
pub struct LircTransmitter {
    device: File,
    path: PathBuf,
}

impl LircTransmitter {
    /// Opens a LIRC device for transmission.
    ///
    /// # Errors
    ///
    /// Returns [`TransmitError::DeviceUnavailable`] if the device cannot
    /// be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TransmitError> {
        let path = path.as_ref().to_path_buf();
        let device = OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|e| TransmitError::DeviceUnavailable(format!("{}: {e}", path.display())))?;
        tracing::info!(device = %path.display(), "Opened infrared transmitter");
        Ok(Self { device, path })
    }

    /// Returns the device path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Transmitter for LircTransmitter {
    fn transmit(&mut self, pulses: &PulseSequence) -> Result<(), TransmitError> {
        // The driver requires the train to end on a mark.
        if pulses.is_empty() || pulses.len() % 2 == 0 {
            return Err(TransmitError::MalformedSequence(format!(
                "expected an odd number of mark/space entries, got {}",
                pulses.len()
            )));
        }

        let mut buf = Vec::with_capacity(pulses.len() * 4);
        for duration in pulses.as_micros() {
            buf.extend_from_slice(&duration.to_ne_bytes());
        }
        self.device.write_all(&buf)?;
        self.device.flush()?;

        tracing::debug!(
            device = %self.path.display(),
            entries = pulses.len(),
            "Pulse train transmitted"
        );
        Ok(())
    }
}
