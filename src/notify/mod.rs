// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Best-effort change notifications.
//!
//! After a command has been transmitted, the bridge can announce the new
//! state to a webhook-style sink. Delivery is fire-and-forget: the relay
//! loop spawns the send and never looks at the result, so a slow or broken
//! sink cannot delay or fail command processing.

mod message;
mod webhook;

pub use message::describe;
pub use webhook::WebhookNotifier;

use serde::Serialize;

use crate::command::Command;
use crate::error::NotifyError;

/// Sender name attached to every notification.
const SENDER_NAME: &str = "エアコン";

/// Icon marker attached to every notification.
const SENDER_ICON: &str = ":cyclone:";

/// The structured record delivered to the notification sink.
///
/// All fields are optional and omitted from the JSON body when empty,
/// matching the sink's incoming-webhook contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    /// Display name of the sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Emoji marker shown next to the sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    /// Free-text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl NotificationPayload {
    /// Builds the payload announcing an applied command.
    #[must_use]
    pub fn for_command(command: &Command) -> Self {
        Self {
            username: Some(SENDER_NAME.to_string()),
            icon_emoji: Some(SENDER_ICON.to_string()),
            text: Some(describe(command)),
        }
    }
}

/// Delivers a notification payload to an external sink.
///
/// Implementations are invoked from spawned tasks, never from the relay
/// loop itself.
pub trait Notifier: Send + Sync + 'static {
    /// Sends one payload.
    fn send(
        &self,
        payload: NotificationPayload,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{AirVolume, Mode, Power, WindDirection};

    #[test]
    fn payload_carries_sender_identity() {
        let command = Command {
            power: Power::Off,
            mode: Mode::Cooler,
            preset_temp: 26,
            air_volume: AirVolume::Auto,
            wind_direction: WindDirection::Auto,
        };
        let payload = NotificationPayload::for_command(&command);
        assert_eq!(payload.username.as_deref(), Some("エアコン"));
        assert_eq!(payload.icon_emoji.as_deref(), Some(":cyclone:"));
        assert!(payload.text.is_some());
    }

    #[test]
    fn empty_fields_are_omitted_from_json() {
        let payload = NotificationPayload {
            username: None,
            icon_emoji: None,
            text: Some("hello".to_string()),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"text":"hello"}"#);
    }
}
