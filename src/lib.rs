//! # unitprobe
//!
//! Probes a field unit speaking a compact binary command/response protocol
//! tunneled over MQTT, and collects the replies into a settings profile:
//! - Fixed, ordered catalog of query commands
//! - Frame decoder that recovers the answered command code per family
//! - Field interpreter for version, model, and error-flag replies
//! - Strictly sequential sequencer with single-command correlation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      MQTT Broker                            │
//! │        command/<name>/send  ↑   ↓  info/<name>/rx           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Transport Boundary                         │
//! │          (JSON envelope → tagged Reply variant)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Session                               │
//! │         (cursor, correlation, settle delay)                 │
//! └──────┬──────────────────────────────┬───────────────────────┘
//!        │                              │
//!        ▼                              ▼
//! ┌─────────────┐                ┌─────────────┐
//! │  Protocol   │                │   Profile   │
//! │ (frame +    │                │ (ordered    │
//! │  interpret) │                │  entries)   │
//! └─────────────┘                └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod catalog;
pub mod profile;
pub mod protocol;
pub mod session;
pub mod transport;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ProbeError, Result};
pub use config::Config;
pub use catalog::{Catalog, Command};
pub use profile::{Profile, ProfileEntry};
pub use session::{CommandSink, Session, Step};
pub use transport::{MqttSink, MqttTransport, Reply};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of unitprobe
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
