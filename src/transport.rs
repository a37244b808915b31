//! Transport boundary
//!
//! MQTT plumbing and the inbound reply envelope. The bridge publishes one
//! JSON object per reply on `info/<device>/rx`:
//!
//! ```text
//! {"dump": "<hex string>"}          raw frame, hex-encoded
//! {"ack": true, "cmd": "<code>"}    empty positive acknowledgement
//! {"nak": true, "cmd": "<code>"}    empty negative acknowledgement
//! ```
//!
//! Envelopes are decoded exactly once here into a tagged [`Reply`]; the
//! rest of the crate never sees JSON. Outbound commands are plain-text
//! wire codes on `command/<device>/send`.

use std::time::Duration;

use rumqttc::{Client, Connection, MqttOptions, QoS};
use serde::Deserialize;

use crate::config::Config;
use crate::error::{ProbeError, Result};
use crate::session::CommandSink;

// =============================================================================
// Inbound replies
// =============================================================================

/// One inbound reply, decoded at the transport boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Raw frame bytes (hex already decoded)
    Dump(Vec<u8>),

    /// Positive acknowledgement carrying the device-reported code
    Ack(String),

    /// Negative acknowledgement carrying the device-reported code
    Nak(String),
}

/// JSON envelope as published by the bridge
#[derive(Debug, Deserialize)]
struct ReplyEnvelope {
    dump: Option<String>,
    #[serde(default)]
    ack: bool,
    #[serde(default)]
    nak: bool,
    cmd: Option<String>,
}

impl Reply {
    /// Parse a reply envelope from raw topic payload bytes.
    ///
    /// A malformed envelope or bad hex fails the parse; callers discard
    /// such messages like uncorrelated replies.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let envelope: ReplyEnvelope = serde_json::from_slice(payload)?;

        if let Some(hex_str) = envelope.dump {
            let data = hex::decode(hex_str.trim())
                .map_err(|e| ProbeError::Reply(format!("bad hex in dump: {}", e)))?;
            return Ok(Reply::Dump(data));
        }

        let cmd = envelope
            .cmd
            .ok_or_else(|| ProbeError::Reply("ack/nak without cmd".to_string()))?;

        if envelope.ack {
            Ok(Reply::Ack(cmd))
        } else if envelope.nak {
            Ok(Reply::Nak(cmd))
        } else {
            Err(ProbeError::Reply(
                "reply is neither dump, ack nor nak".to_string(),
            ))
        }
    }
}

// =============================================================================
// Outbound commands
// =============================================================================

/// Publishes wire-encoded command codes to the device's send topic
pub struct MqttSink {
    client: Client,
    send_topic: String,
}

impl MqttSink {
    /// Subscribe to `topic`; called on every CONNACK so a broker
    /// reconnect renews the subscription
    pub fn subscribe(&mut self, topic: &str) -> Result<()> {
        self.client.subscribe(topic, QoS::AtMostOnce)?;
        Ok(())
    }
}

impl CommandSink for MqttSink {
    fn send(&mut self, wire_code: &str) -> Result<()> {
        self.client.publish(
            self.send_topic.as_str(),
            QoS::AtMostOnce,
            false,
            wire_code.as_bytes().to_vec(),
        )?;
        Ok(())
    }
}

// =============================================================================
// Connection
// =============================================================================

/// MQTT transport for one probe run
pub struct MqttTransport {
    /// Outbound half, handed to the session
    pub sink: MqttSink,

    /// Event source; drives the network and yields inbound publishes
    pub connection: Connection,

    /// Topic inbound reply envelopes arrive on
    pub reply_topic: String,
}

impl MqttTransport {
    /// Build the client and connection for `config`.
    ///
    /// Nothing is sent until the connection's event loop is driven;
    /// subscribe on CONNACK so a reconnect renews the subscription.
    pub fn connect(config: &Config) -> Result<Self> {
        if config.device.is_empty() {
            return Err(ProbeError::Config("device name is empty".to_string()));
        }

        let client_id = format!("unitprobe-{}", std::process::id());
        let mut options = MqttOptions::new(client_id, config.host.as_str(), config.port);
        options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));

        let (client, connection) = Client::new(options, 16);

        Ok(Self {
            sink: MqttSink {
                client,
                send_topic: config.send_topic(),
            },
            connection,
            reply_topic: config.reply_topic(),
        })
    }
}
