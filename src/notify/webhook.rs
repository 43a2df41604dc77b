// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Webhook-style notification sink.

use std::time::Duration;

use reqwest::Client;

use crate::error::NotifyError;
use crate::notify::{NotificationPayload, Notifier};

/// Delivers notifications as JSON POSTs to an incoming-webhook URL.
///
/// # Examples
///
/// ```
/// use aircon_relay::notify::WebhookNotifier;
///
/// let notifier = WebhookNotifier::new("https://hooks.example.com/T000/B000/XXX").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a notifier targeting the given webhook URL.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(url: impl Into<String>) -> Result<Self, NotifyError> {
        Self::with_timeout(url, Self::DEFAULT_TIMEOUT)
    }

    /// Creates a notifier with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NotifyError::Http)?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Returns the webhook URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Notifier for WebhookNotifier {
    async fn send(&self, payload: NotificationPayload) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(NotifyError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status));
        }

        tracing::debug!(url = %self.url, "Notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_keeps_its_url() {
        let notifier = WebhookNotifier::new("https://hooks.example.com/x").unwrap();
        assert_eq!(notifier.url(), "https://hooks.example.com/x");
    }
}
