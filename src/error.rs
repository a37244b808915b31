//! Error types for unitprobe
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using ProbeError
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Unified error type for unitprobe operations
#[derive(Debug, Error)]
pub enum ProbeError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("MQTT client error: {0}")]
    Mqtt(#[from] rumqttc::ClientError),

    #[error("MQTT connection error: {0}")]
    Connection(#[from] rumqttc::ConnectionError),

    #[error("Transport error: {0}")]
    Transport(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Frame error: {0}")]
    Frame(String),

    #[error("Reply parse error: {0}")]
    Reply(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
