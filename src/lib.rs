// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `aircon-relay` - An MQTT to infrared command-relay bridge.
//!
//! This crate bridges a message bus and an infrared transmitter that
//! controls an air conditioner. It subscribes to a command topic, decodes
//! each structured command, emits the matching pulse train through the
//! hardware, republishes the accepted state retained on a status topic,
//! and optionally announces the change to a webhook sink.
//!
//! # Architecture
//!
//! - [`relay::RelayLoop`] — the single-threaded dispatcher that owns
//!   command ordering and the per-stage error policy
//! - [`command`] — the command structures, with open-set enums that
//!   round-trip unknown wire values
//! - [`signal`] — pulse-train encoding behind the [`signal::SignalEncoder`]
//!   seam
//! - [`transmit`] — the LIRC transmitter driver
//! - [`protocol`] — the MQTT connection, inbound channel, and retained
//!   state publisher
//! - [`notify`] — best-effort webhook notifications
//!
//! # Quick Start
//!
//! ```no_run
//! use aircon_relay::config::BridgeConfig;
//! use aircon_relay::protocol::MqttBridge;
//! use aircon_relay::relay::RelayLoop;
//! use aircon_relay::signal::A75c4269Encoder;
//! use aircon_relay::transmit::LircTransmitter;
//! use aircon_relay::notify::WebhookNotifier;
//!
//! #[tokio::main]
//! async fn main() -> aircon_relay::Result<()> {
//!     let config = BridgeConfig::from_env()?;
//!
//!     let bridge = MqttBridge::builder()
//!         .host(&config.mqtt_host)
//!         .port(config.mqtt_port)
//!         .client_id(&config.client_id)
//!         .build()
//!         .await?;
//!
//!     let inbound = bridge.commands(&config.command_topic).await?;
//!     let publisher = bridge.state_publisher(&config.state_topic);
//!     let transmitter = LircTransmitter::open(&config.lirc_device)?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let relay = RelayLoop::new(
//!         A75c4269Encoder::new(),
//!         transmitter,
//!         publisher,
//!         None::<WebhookNotifier>,
//!         inbound,
//!         shutdown_rx,
//!     );
//!     relay.run().await
//! }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod notify;
pub mod protocol;
pub mod relay;
pub mod signal;
pub mod transmit;

pub use command::{AirVolume, Command, Mode, Power, WindDirection};
pub use config::BridgeConfig;
pub use error::{ConfigError, Error, NotifyError, ProtocolError, Result, TransmitError};
pub use notify::{NotificationPayload, Notifier, WebhookNotifier};
pub use protocol::{MqttBridge, RetainedStatePublisher, StatePublisher};
pub use relay::RelayLoop;
pub use signal::{A75c4269Encoder, PulseSequence, SignalEncoder};
pub use transmit::{LircTransmitter, Transmitter};
