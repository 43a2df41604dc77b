// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MQTT broker connection for the relay bridge.
//!
//! One persistent connection serves both directions: the command-topic
//! subscription that feeds the relay loop and the retained state
//! publications that mirror accepted commands back onto the bus.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rumqttc::{AsyncClient, EventLoop, MqttOptions, QoS};
use tokio::sync::{RwLock, mpsc, oneshot};
use tokio::time::sleep;

use crate::error::ProtocolError;
use crate::protocol::StatePublisher;

/// Capacity of the inbound command channel.
///
/// Commands arriving while one is being dispatched queue here in receipt
/// order; the broker's own session buffers anything beyond that.
const INBOUND_CHANNEL_CAPACITY: usize = 32;

/// Configuration for the bridge's MQTT connection.
#[derive(Debug, Clone)]
struct MqttBridgeConfig {
    host: String,
    port: u16,
    client_id: String,
    credentials: Option<(String, String)>,
    keep_alive: Duration,
    connection_timeout: Duration,
}

impl Default for MqttBridgeConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 1883,
            client_id: format!("aircon_relay_{}", std::process::id()),
            credentials: None,
            keep_alive: Duration::from_secs(30),
            connection_timeout: Duration::from_secs(10),
        }
    }
}

/// A command-topic subscription routed to the relay loop.
struct CommandSubscription {
    topic: String,
    tx: mpsc::Sender<Vec<u8>>,
}

/// A shared MQTT broker connection.
///
/// `MqttBridge` is cheaply cloneable (via `Arc`); the event loop task and
/// the state publisher hold clones of the same connection.
///
/// # Examples
///
/// ```no_run
/// use aircon_relay::protocol::MqttBridge;
///
/// # async fn example() -> Result<(), aircon_relay::error::ProtocolError> {
/// let bridge = MqttBridge::builder()
///     .host("192.168.1.50")
///     .port(1883)
///     .credentials("user", "password")
///     .build()
///     .await?;
///
/// let commands = bridge.commands("/aircon/action").await?;
/// let publisher = bridge.state_publisher("/aircon/state");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MqttBridge {
    inner: Arc<MqttBridgeInner>,
}

struct MqttBridgeInner {
    client: AsyncClient,
    config: MqttBridgeConfig,
    connected: AtomicBool,
    subscription: RwLock<Option<CommandSubscription>>,
}

impl MqttBridge {
    /// Creates a new builder for configuring the broker connection.
    #[must_use]
    pub fn builder() -> MqttBridgeBuilder {
        MqttBridgeBuilder::default()
    }

    /// Returns whether the bridge is currently connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.connected.load(Ordering::Acquire)
    }

    /// Returns the broker host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.inner.config.host
    }

    /// Returns the broker port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.inner.config.port
    }

    /// Subscribes to the command topic and returns the inbound channel.
    ///
    /// Messages are delivered in receipt order. The subscription is
    /// restored automatically after a reconnect.
    ///
    /// # Errors
    ///
    /// Returns error if the MQTT subscription fails.
    pub async fn commands(
        &self,
        topic: impl Into<String>,
    ) -> Result<mpsc::Receiver<Vec<u8>>, ProtocolError> {
        let topic = topic.into();
        self.inner
            .client
            .subscribe(&topic, QoS::AtLeastOnce)
            .await
            .map_err(ProtocolError::Mqtt)?;

        tracing::debug!(topic = %topic, "Subscribed to command topic");

        let (tx, rx) = mpsc::channel(INBOUND_CHANNEL_CAPACITY);
        *self.inner.subscription.write().await = Some(CommandSubscription { topic, tx });
        Ok(rx)
    }

    /// Creates a retained-state publisher bound to the given topic.
    #[must_use]
    pub fn state_publisher(&self, topic: impl Into<String>) -> RetainedStatePublisher {
        RetainedStatePublisher {
            bridge: self.clone(),
            topic: topic.into(),
        }
    }

    /// Disconnects from the broker.
    ///
    /// # Errors
    ///
    /// Returns error if the disconnect operation fails.
    pub async fn disconnect(&self) -> Result<(), ProtocolError> {
        tracing::info!(
            host = %self.inner.config.host,
            port = %self.inner.config.port,
            "Disconnecting from MQTT broker"
        );
        *self.inner.subscription.write().await = None;
        self.inner
            .client
            .disconnect()
            .await
            .map_err(ProtocolError::Mqtt)?;
        self.inner.connected.store(false, Ordering::Release);
        Ok(())
    }

    /// Routes an inbound publish to the relay loop's channel.
    async fn route_message(&self, topic: &str, payload: Vec<u8>) {
        let subscription = self.inner.subscription.read().await;
        let Some(sub) = subscription.as_ref() else {
            return;
        };
        if sub.topic != topic {
            return;
        }
        // Blocks when the relay loop is behind; that is the FIFO buffer
        // working as intended, not an error.
        if sub.tx.send(payload).await.is_err() {
            tracing::warn!(topic = %topic, "Relay loop is gone; dropping inbound command");
        }
    }

    /// Restores the command subscription after a reconnect.
    async fn restore_subscription(&self) {
        let subscription = self.inner.subscription.read().await;
        if let Some(sub) = subscription.as_ref() {
            tracing::debug!(topic = %sub.topic, "Restoring command subscription");
            if let Err(e) = self.inner.client.subscribe(&sub.topic, QoS::AtLeastOnce).await {
                tracing::warn!(topic = %sub.topic, error = %e, "Failed to restore subscription");
            }
        }
    }
}

impl std::fmt::Debug for MqttBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MqttBridge")
            .field("host", &self.inner.config.host)
            .field("port", &self.inner.config.port)
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Publishes command state retained at QoS 1 on a fixed topic.
#[derive(Debug, Clone)]
pub struct RetainedStatePublisher {
    bridge: MqttBridge,
    topic: String,
}

impl RetainedStatePublisher {
    /// Returns the status topic.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl StatePublisher for RetainedStatePublisher {
    async fn publish_state(&self, payload: Vec<u8>) -> Result<(), ProtocolError> {
        self.bridge
            .inner
            .client
            .publish(&self.topic, QoS::AtLeastOnce, true, payload)
            .await
            .map_err(ProtocolError::Mqtt)
    }
}

/// Builder for the bridge's MQTT connection.
#[derive(Debug, Default)]
pub struct MqttBridgeBuilder {
    config: MqttBridgeConfig,
}

impl MqttBridgeBuilder {
    /// Sets the broker host address.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Sets the broker port (default: 1883).
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Sets the MQTT client identifier.
    #[must_use]
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config.client_id = client_id.into();
        self
    }

    /// Sets authentication credentials.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the keep-alive interval (default: 30 seconds).
    #[must_use]
    pub fn keep_alive(mut self, duration: Duration) -> Self {
        self.config.keep_alive = duration;
        self
    }

    /// Sets the connection timeout (default: 10 seconds).
    #[must_use]
    pub fn connection_timeout(mut self, duration: Duration) -> Self {
        self.config.connection_timeout = duration;
        self
    }

    /// Builds and connects to the MQTT broker.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Host is not set
    /// - Connection fails
    /// - Connection times out
    pub async fn build(self) -> Result<MqttBridge, ProtocolError> {
        if self.config.host.is_empty() {
            return Err(ProtocolError::InvalidAddress(
                "MQTT broker host is required".to_string(),
            ));
        }

        let mut mqtt_options =
            MqttOptions::new(&self.config.client_id, &self.config.host, self.config.port);
        mqtt_options.set_keep_alive(self.config.keep_alive);
        mqtt_options.set_clean_session(true);

        if let Some((ref username, ref password)) = self.config.credentials {
            mqtt_options.set_credentials(username, password);
        }

        let (client, event_loop) = AsyncClient::new(mqtt_options, 10);

        let bridge = MqttBridge {
            inner: Arc::new(MqttBridgeInner {
                client,
                config: self.config.clone(),
                connected: AtomicBool::new(false),
                subscription: RwLock::new(None),
            }),
        };

        let (connack_tx, connack_rx) = oneshot::channel();
        let bridge_clone = bridge.clone();
        tokio::spawn(async move {
            handle_bridge_events(event_loop, bridge_clone, Some(connack_tx)).await;
        });

        let timeout = self.config.connection_timeout;
        match tokio::time::timeout(timeout, connack_rx).await {
            Ok(Ok(())) => {
                bridge.inner.connected.store(true, Ordering::Release);
                tracing::info!(
                    host = %self.config.host,
                    port = %self.config.port,
                    client_id = %self.config.client_id,
                    "Connected to MQTT broker"
                );
            }
            Ok(Err(_)) => {
                return Err(ProtocolError::ConnectionFailed(
                    "MQTT event loop terminated unexpectedly".to_string(),
                ));
            }
            Err(_) => {
                return Err(ProtocolError::ConnectionFailed(format!(
                    "MQTT connection timeout after {}s",
                    timeout.as_secs()
                )));
            }
        }

        Ok(bridge)
    }
}

/// Drives the MQTT event loop for the lifetime of the connection.
///
/// Connection errors back off and retry instead of tearing the bridge
/// down: the broker link is expected to heal on its own, unlike the
/// infrared hardware.
async fn handle_bridge_events(
    mut event_loop: EventLoop,
    bridge: MqttBridge,
    mut connack_tx: Option<oneshot::Sender<()>>,
) {
    use rumqttc::{Event, Packet};

    let mut backoff = Duration::from_secs(1);

    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(connack))) => {
                tracing::debug!(?connack, "MQTT broker connected");
                bridge.inner.connected.store(true, Ordering::Release);
                if let Some(tx) = connack_tx.take() {
                    let _ = tx.send(());
                } else {
                    // Reconnect, not first connect: the session may be gone.
                    bridge.restore_subscription().await;
                }
                backoff = Duration::from_secs(1);
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                tracing::debug!(
                    topic = %publish.topic,
                    bytes = publish.payload.len(),
                    "MQTT message received"
                );
                bridge
                    .route_message(&publish.topic, publish.payload.to_vec())
                    .await;
            }
            Ok(Event::Incoming(Packet::Disconnect)) => {
                tracing::info!("MQTT broker disconnected");
                bridge.inner.connected.store(false, Ordering::Release);
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "MQTT event loop error; will reconnect");
                bridge.inner.connected.store(false, Ordering::Release);
                sleep(backoff).await;
                backoff = (backoff * 2).min(Duration::from_secs(60));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_default_values() {
        let builder = MqttBridgeBuilder::default();
        assert!(builder.config.host.is_empty());
        assert_eq!(builder.config.port, 1883);
        assert!(builder.config.credentials.is_none());
        assert_eq!(builder.config.keep_alive, Duration::from_secs(30));
        assert_eq!(builder.config.connection_timeout, Duration::from_secs(10));
        assert!(builder.config.client_id.starts_with("aircon_relay_"));
    }

    #[test]
    fn builder_chain() {
        let builder = MqttBridgeBuilder::default()
            .host("192.168.1.50")
            .port(8883)
            .client_id("rpizerow_aircon")
            .credentials("admin", "secret")
            .keep_alive(Duration::from_secs(45))
            .connection_timeout(Duration::from_secs(15));

        assert_eq!(builder.config.host, "192.168.1.50");
        assert_eq!(builder.config.port, 8883);
        assert_eq!(builder.config.client_id, "rpizerow_aircon");
        assert!(builder.config.credentials.is_some());
        assert_eq!(builder.config.keep_alive, Duration::from_secs(45));
        assert_eq!(builder.config.connection_timeout, Duration::from_secs(15));
    }

    #[tokio::test]
    async fn builder_missing_host_fails() {
        let result = MqttBridgeBuilder::default().build().await;
        assert!(matches!(
            result.unwrap_err(),
            ProtocolError::InvalidAddress(_)
        ));
    }
}
