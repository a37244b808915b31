//! Configuration for unitprobe
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

/// Main configuration for a probe run
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Broker Configuration
    // -------------------------------------------------------------------------
    /// MQTT broker host
    pub host: String,

    /// MQTT broker port
    pub port: u16,

    /// MQTT keep-alive interval (seconds)
    pub keep_alive_secs: u64,

    // -------------------------------------------------------------------------
    // Device Configuration
    // -------------------------------------------------------------------------
    /// Device name; selects the per-device command and reply topics
    pub device: String,

    // -------------------------------------------------------------------------
    // Probe Configuration
    // -------------------------------------------------------------------------
    /// Pause between a correlated reply and the next command (milliseconds).
    /// Protects the unit's receive buffer from being overrun.
    pub settle_ms: u64,

    /// Re-send the outstanding command when no reply arrives within this
    /// window (milliseconds). `None` waits indefinitely.
    pub reply_timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 1883,
            keep_alive_secs: 60,
            device: "unit".to_string(),
            settle_ms: 500,
            reply_timeout_ms: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Topic the probe publishes wire-encoded command codes to
    pub fn send_topic(&self) -> String {
        format!("command/{}/send", self.device)
    }

    /// Topic the bridge publishes JSON reply envelopes to
    pub fn reply_topic(&self) -> String {
        format!("info/{}/rx", self.device)
    }

    /// Settle delay as a [`Duration`]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Reply timeout as a [`Duration`], if configured
    pub fn reply_timeout(&self) -> Option<Duration> {
        self.reply_timeout_ms.map(Duration::from_millis)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the MQTT broker host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the MQTT broker port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the MQTT keep-alive interval (seconds)
    pub fn keep_alive_secs(mut self, secs: u64) -> Self {
        self.config.keep_alive_secs = secs;
        self
    }

    /// Set the device name
    pub fn device(mut self, name: impl Into<String>) -> Self {
        self.config.device = name.into();
        self
    }

    /// Set the settle delay (in milliseconds)
    pub fn settle_ms(mut self, ms: u64) -> Self {
        self.config.settle_ms = ms;
        self
    }

    /// Set the optional reply timeout (in milliseconds)
    pub fn reply_timeout_ms(mut self, ms: Option<u64>) -> Self {
        self.config.reply_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
