// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the webhook notification sink using wiremock.

use aircon_relay::command::{AirVolume, Command, Mode, Power, WindDirection};
use aircon_relay::error::NotifyError;
use aircon_relay::notify::{NotificationPayload, Notifier, WebhookNotifier};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_command() -> Command {
    Command {
        power: Power::On,
        mode: Mode::Cooler,
        preset_temp: 26,
        air_volume: AirVolume::Auto,
        wind_direction: WindDirection::Auto,
    }
}

#[tokio::test]
async fn payload_is_posted_as_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "username": "エアコン",
            "icon_emoji": ":cyclone:",
            "text": "冷房, 26℃\n風量: 自動, 風向: 自動",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let notifier = WebhookNotifier::new(format!("{}/webhook", mock_server.uri())).unwrap();
    let payload = NotificationPayload::for_command(&sample_command());
    notifier.send(payload).await.unwrap();
}

#[tokio::test]
async fn empty_fields_are_omitted_from_the_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({ "text": "hello" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let notifier = WebhookNotifier::new(mock_server.uri()).unwrap();
    let payload = NotificationPayload {
        username: None,
        icon_emoji: None,
        text: Some("hello".to_string()),
    };
    notifier.send(payload).await.unwrap();
}

#[tokio::test]
async fn rejection_maps_to_notify_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let notifier = WebhookNotifier::new(mock_server.uri()).unwrap();
    let payload = NotificationPayload::for_command(&sample_command());
    let result = notifier.send(payload).await;
    assert!(matches!(
        result.unwrap_err(),
        NotifyError::Rejected(status) if status.as_u16() == 500
    ));
}

#[tokio::test]
async fn unreachable_sink_maps_to_http_error() {
    // Nothing listens on this port.
    let notifier = WebhookNotifier::new("http://127.0.0.1:1/webhook").unwrap();
    let payload = NotificationPayload::for_command(&sample_command());
    let result = notifier.send(payload).await;
    assert!(matches!(result.unwrap_err(), NotifyError::Http(_)));
}
