// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge process entry point.
//!
//! Wires the collaborators together from environment configuration and
//! runs the relay loop until SIGINT/SIGTERM or a fatal transmit failure.

use aircon_relay::config::BridgeConfig;
use aircon_relay::notify::WebhookNotifier;
use aircon_relay::protocol::MqttBridge;
use aircon_relay::relay::RelayLoop;
use aircon_relay::signal::A75c4269Encoder;
use aircon_relay::transmit::LircTransmitter;

use dotenvy::dotenv;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> aircon_relay::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = BridgeConfig::from_env()?;
    info!(
        host = %config.mqtt_host,
        port = config.mqtt_port,
        client_id = %config.client_id,
        "Starting aircon relay bridge"
    );

    let bridge = {
        let mut builder = MqttBridge::builder()
            .host(&config.mqtt_host)
            .port(config.mqtt_port)
            .client_id(&config.client_id);
        if let Some((ref username, ref password)) = config.mqtt_credentials {
            builder = builder.credentials(username, password);
        }
        builder.build().await?
    };

    let inbound = bridge.commands(&config.command_topic).await?;
    let publisher = bridge.state_publisher(&config.state_topic);
    let transmitter = LircTransmitter::open(&config.lirc_device)?;

    let notifier = match config.webhook_url {
        Some(ref url) => Some(WebhookNotifier::new(url.clone())?),
        None => {
            info!("No webhook configured; notify stage disabled");
            None
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let relay = RelayLoop::new(
        A75c4269Encoder::new(),
        transmitter,
        publisher,
        notifier,
        inbound,
        shutdown_rx,
    );
    let result = relay.run().await;

    if let Err(e) = bridge.disconnect().await {
        tracing::warn!(error = %e, "MQTT disconnect failed during shutdown");
    }

    result
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,rumqttc=warn"))
        .unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
