// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The command-relay control loop.
//!
//! One dispatcher owns the lifecycle of every inbound command: decode,
//! transmit, publish state, notify — in that order, one command at a time,
//! with no interleaving of two commands' side effects. Stage failures are
//! contained per the bridge's error policy:
//!
//! - a decode failure drops that message and the loop carries on;
//! - a transmit failure is fatal and ends the loop, because hardware that
//!   failed once is assumed unusable for every later command;
//! - a publish failure is logged and tolerated, since the physical unit has
//!   already changed state;
//! - notification results are never observed by the loop at all.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::command::Command;
use crate::error::{Error, TransmitError};
use crate::notify::{NotificationPayload, Notifier};
use crate::protocol::StatePublisher;
use crate::signal::SignalEncoder;
use crate::transmit::Transmitter;

/// The single-threaded dispatcher at the heart of the bridge.
///
/// Constructed once at startup with its collaborators and consumed by
/// [`RelayLoop::run`]. Inbound payloads arrive through an in-order channel
/// fed by the bus client; a [`watch`] flag signals shutdown.
///
/// # Examples
///
/// ```no_run
/// use aircon_relay::relay::RelayLoop;
/// use aircon_relay::signal::A75c4269Encoder;
/// use aircon_relay::transmit::LircTransmitter;
/// use aircon_relay::notify::WebhookNotifier;
/// # async fn example(
/// #     publisher: aircon_relay::protocol::RetainedStatePublisher,
/// #     inbound: tokio::sync::mpsc::Receiver<Vec<u8>>,
/// #     shutdown: tokio::sync::watch::Receiver<bool>,
/// # ) -> aircon_relay::Result<()> {
/// let transmitter = LircTransmitter::open("/dev/lirc0")?;
/// let relay = RelayLoop::new(
///     A75c4269Encoder::new(),
///     transmitter,
///     publisher,
///     None::<WebhookNotifier>,
///     inbound,
///     shutdown,
/// );
/// relay.run().await?;
/// # Ok(())
/// # }
/// ```
pub struct RelayLoop<E, T, P, N> {
    encoder: E,
    transmitter: T,
    publisher: P,
    notifier: Option<Arc<N>>,
    inbound: mpsc::Receiver<Vec<u8>>,
    shutdown: watch::Receiver<bool>,
}

impl<E, T, P, N> RelayLoop<E, T, P, N>
where
    E: SignalEncoder,
    T: Transmitter,
    P: StatePublisher,
    N: Notifier,
{
    /// Creates a relay loop over its collaborators.
    ///
    /// Passing `None` for the notifier disables the notify stage entirely.
    #[must_use]
    pub fn new(
        encoder: E,
        transmitter: T,
        publisher: P,
        notifier: Option<N>,
        inbound: mpsc::Receiver<Vec<u8>>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            encoder,
            transmitter,
            publisher,
            notifier: notifier.map(Arc::new),
            inbound,
            shutdown,
        }
    }

    /// Runs the dispatcher until shutdown or a fatal transmit failure.
    ///
    /// Returns `Ok(())` on a clean shutdown (signal received or inbound
    /// channel closed). An in-flight command finishes its stages before the
    /// loop exits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transmit`] when the infrared hardware reports a
    /// failure; the command that failed was not applied and has not been
    /// published as applied.
    pub async fn run(mut self) -> Result<(), Error> {
        tracing::info!("Relay loop started");
        loop {
            tokio::select! {
                // A dropped sender counts as shutdown too.
                _ = self.shutdown.changed() => {
                    tracing::info!("Shutdown requested; relay loop exiting");
                    return Ok(());
                }
                message = self.inbound.recv() => {
                    match message {
                        Some(payload) => self.dispatch(&payload).await?,
                        None => {
                            tracing::info!("Inbound channel closed; relay loop exiting");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Processes one inbound message through all four stages.
    async fn dispatch(&mut self, payload: &[u8]) -> Result<(), TransmitError> {
        // Stage 1: decode. Malformed payloads are dropped, never fatal.
        let command = match Command::decode(payload) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding undecodable command");
                return Ok(());
            }
        };

        // Stage 2: transmit. A hardware failure here ends the loop.
        let pulses = self.encoder.encode(&command);
        self.transmitter.transmit(&pulses)?;
        tracing::info!(
            power = command.power.as_byte(),
            mode = command.mode.as_byte(),
            preset_temp = command.preset_temp,
            "Command transmitted"
        );

        // Stage 3: publish state, retained. Best-effort once the hardware
        // has acted.
        match command.encode() {
            Ok(state) => {
                if let Err(e) = self.publisher.publish_state(state).await {
                    tracing::error!(error = %e, "Failed to publish state");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to re-encode command for state topic");
            }
        }

        // Stage 4: notify, fire-and-forget. The loop never awaits the send.
        if let Some(notifier) = &self.notifier {
            let notifier = Arc::clone(notifier);
            let payload = NotificationPayload::for_command(&command);
            tokio::spawn(async move {
                if let Err(e) = notifier.send(payload).await {
                    tracing::warn!(error = %e, "Notification delivery failed");
                }
            });
        }

        Ok(())
    }
}
