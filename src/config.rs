// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge configuration.
//!
//! All configuration is sourced from the process environment exactly once,
//! at startup, and carried as an explicit value into the constructors that
//! need it. Nothing inside the relay loop reads the environment.

use crate::error::ConfigError;

/// Default MQTT client identifier.
const DEFAULT_CLIENT_ID: &str = "rpizerow_aircon";

/// Default inbound command topic.
const DEFAULT_COMMAND_TOPIC: &str = "/aircon/action";

/// Default outbound state topic.
const DEFAULT_STATE_TOPIC: &str = "/aircon/state";

/// Default LIRC transmitter device.
const DEFAULT_LIRC_DEVICE: &str = "/dev/lirc0";

/// Configuration for one bridge process.
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |---|---|---|
/// | `MQTT_HOST` | *(required)* | Broker host |
/// | `MQTT_PORT` | `1883` | Broker port |
/// | `MQTT_USERNAME` / `MQTT_PASSWORD` | unset | Broker credentials |
/// | `MQTT_CLIENT_ID` | `rpizerow_aircon` | Client identifier |
/// | `AIRCON_COMMAND_TOPIC` | `/aircon/action` | Inbound command topic |
/// | `AIRCON_STATE_TOPIC` | `/aircon/state` | Retained state topic |
/// | `SLACK_WEBHOOK` | unset | Notification sink; absence disables notify |
/// | `LIRC_DEVICE` | `/dev/lirc0` | Infrared transmitter device |
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Broker host.
    pub mqtt_host: String,
    /// Broker port.
    pub mqtt_port: u16,
    /// Broker credentials, both or neither.
    pub mqtt_credentials: Option<(String, String)>,
    /// MQTT client identifier.
    pub client_id: String,
    /// Topic carrying inbound command payloads.
    pub command_topic: String,
    /// Topic receiving retained state publications.
    pub state_topic: String,
    /// Webhook URL for the notify stage; `None` disables it.
    pub webhook_url: Option<String>,
    /// Path to the LIRC character device.
    pub lirc_device: String,
}

impl BridgeConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] if `MQTT_HOST` is unset and
    /// [`ConfigError::InvalidValue`] if `MQTT_PORT` does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
    }

    /// Loads configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mqtt_host = lookup("MQTT_HOST").ok_or(ConfigError::MissingVar("MQTT_HOST"))?;

        let mqtt_port = match lookup("MQTT_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                var: "MQTT_PORT",
                value,
            })?,
            None => 1883,
        };

        let mqtt_credentials = match (lookup("MQTT_USERNAME"), lookup("MQTT_PASSWORD")) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        };

        Ok(Self {
            mqtt_host,
            mqtt_port,
            mqtt_credentials,
            client_id: lookup("MQTT_CLIENT_ID").unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            command_topic: lookup("AIRCON_COMMAND_TOPIC")
                .unwrap_or_else(|| DEFAULT_COMMAND_TOPIC.to_string()),
            state_topic: lookup("AIRCON_STATE_TOPIC")
                .unwrap_or_else(|| DEFAULT_STATE_TOPIC.to_string()),
            webhook_url: lookup("SLACK_WEBHOOK"),
            lirc_device: lookup("LIRC_DEVICE").unwrap_or_else(|| DEFAULT_LIRC_DEVICE.to_string()),
        })
    }
}
