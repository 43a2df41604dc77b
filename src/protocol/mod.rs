// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Message-bus protocol layer.
//!
//! [`MqttBridge`] owns the broker connection: it feeds inbound command
//! payloads into a FIFO channel and publishes accepted state back out with
//! the retained flag set. The relay loop only sees the channel and the
//! [`StatePublisher`] seam.

mod mqtt;

pub use mqtt::{MqttBridge, MqttBridgeBuilder, RetainedStatePublisher};

use crate::error::ProtocolError;

/// Publishes the accepted state of a command to the status topic.
///
/// Publications are retained so late subscribers immediately see the last
/// known state.
pub trait StatePublisher: Send + Sync {
    /// Publishes one state payload.
    fn publish_state(
        &self,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}
