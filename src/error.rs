// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the air-conditioner relay bridge.
//!
//! This module provides the error hierarchy for failures across the bridge:
//! configuration loading, bus communication, infrared transmission, and
//! notification delivery. The relay loop contains most of these; only a
//! [`TransmitError`] is allowed to cross the process boundary.

use thiserror::Error;

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while loading configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Error occurred during bus communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while driving the infrared transmitter.
    ///
    /// This is the only error the relay loop propagates; a hardware failure
    /// means the bridge can no longer act on the commands it accepts.
    #[error("transmit error: {0}")]
    Transmit(#[from] TransmitError),

    /// Error occurred while delivering a notification.
    #[error("notify error: {0}")]
    Notify(#[from] NotifyError),
}

/// Errors related to environment-sourced configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable holds a value that cannot be parsed.
    #[error("invalid value for {var}: {value}")]
    InvalidValue {
        /// The variable that failed to parse.
        var: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Errors related to MQTT bus communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// MQTT connection or communication failed.
    #[error("MQTT error: {0}")]
    Mqtt(#[from] rumqttc::ClientError),

    /// Connection to the broker failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid broker address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// Errors related to the infrared transmitter hardware.
#[derive(Debug, Error)]
pub enum TransmitError {
    /// Writing the pulse train to the device failed.
    #[error("transmitter I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The transmitter device could not be opened.
    #[error("transmitter unavailable: {0}")]
    DeviceUnavailable(String),

    /// The pulse sequence cannot be emitted by the hardware.
    #[error("malformed pulse sequence: {0}")]
    MalformedSequence(String),
}

/// Errors related to notification delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request to the notification sink failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The notification sink rejected the payload.
    #[error("notification rejected with status {0}")]
    Rejected(reqwest::StatusCode),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::MissingVar("MQTT_HOST");
        assert_eq!(
            err.to_string(),
            "missing required environment variable: MQTT_HOST"
        );
    }

    #[test]
    fn config_error_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            var: "MQTT_PORT",
            value: "not-a-port".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for MQTT_PORT: not-a-port");
    }

    #[test]
    fn error_from_transmit_error() {
        let err: Error = TransmitError::DeviceUnavailable("/dev/lirc0".to_string()).into();
        assert!(matches!(err, Error::Transmit(_)));
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::ConnectionFailed("timed out".to_string());
        assert_eq!(err.to_string(), "connection failed: timed out");
    }
}
