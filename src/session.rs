//! Probe session
//!
//! The sequencer/correlator: owns the cursor into the command catalog,
//! decides whether an inbound reply answers the outstanding command, and
//! either advances or discards. Exactly one command is in flight at any
//! time; the cursor never advances on a discarded message.
//!
//! The session runs on a single logical thread. Replies arrive through
//! [`Session::handle_reply`], outbound commands leave through a
//! [`CommandSink`], so the state machine is testable without a broker.

use std::thread;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::profile::Profile;
use crate::protocol::{decode_frame, hex_dump, interpret, Interpretation};
use crate::transport::Reply;

/// Outbound half of the transport, as seen by the session
pub trait CommandSink {
    /// Publish one wire-encoded command code
    fn send(&mut self, wire_code: &str) -> Result<()>;
}

/// What the caller should do after feeding the session an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep delivering inbound replies
    AwaitReply,

    /// Catalog exhausted; the profile is complete
    Finished,
}

/// One probe run over a command catalog
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    cursor: usize,
    settle: Duration,
    profile: Profile,
}

impl Session {
    /// Create a session over `catalog` with the given settle delay
    pub fn new(catalog: Catalog, settle: Duration) -> Self {
        Self {
            catalog,
            cursor: 0,
            settle,
            profile: Profile::new(),
        }
    }

    /// Code of the command currently awaited, or `None` once done
    pub fn awaiting(&self) -> Option<&'static str> {
        self.catalog.get(self.cursor).map(|cmd| cmd.code())
    }

    /// Current cursor position (equals the number of correlated commands)
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Profile accumulated so far
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Consume the session, yielding the accumulated profile
    pub fn into_profile(self) -> Profile {
        self.profile
    }

    /// Emit the first command. An empty catalog finishes immediately.
    pub fn start(&mut self, sink: &mut dyn CommandSink) -> Result<Step> {
        self.send_current(sink)
    }

    /// Re-emit the outstanding command.
    ///
    /// Used when the optional reply timeout fires and after a broker
    /// reconnect; a single fixed re-send, no backoff.
    pub fn handle_timeout(&mut self, sink: &mut dyn CommandSink) -> Result<Step> {
        if let Some(code) = self.awaiting() {
            tracing::warn!("no reply to {} yet, re-sending", code);
        }
        self.send_current(sink)
    }

    /// Feed one inbound reply through decode, interpretation, and
    /// correlation.
    ///
    /// Uncorrelated, malformed, or uninterpretable replies are routine
    /// noise: logged at debug, discarded, state unchanged. On a match the
    /// decoded field is recorded, the cursor advances, and after the
    /// settle delay the next command is emitted.
    pub fn handle_reply(&mut self, reply: Reply, sink: &mut dyn CommandSink) -> Result<Step> {
        let awaited = match self.awaiting() {
            Some(code) => code,
            None => return Ok(Step::Finished),
        };

        let correlated = match reply {
            Reply::Dump(data) => self.correlate_dump(awaited, &data),
            Reply::Ack(code) => correlate_empty(awaited, &code, "ACK"),
            Reply::Nak(code) => correlate_empty(awaited, &code, "NAK"),
        };

        if !correlated {
            return Ok(Step::AwaitReply);
        }

        self.cursor += 1;
        if self.cursor == self.catalog.len() {
            tracing::info!("catalog exhausted after {} commands", self.cursor);
            return Ok(Step::Finished);
        }

        // Deliberately serialized: the pause keeps the next command from
        // overrunning the unit's receive buffer.
        thread::sleep(self.settle);
        self.send_current(sink)
    }

    /// Decode a dump frame and record its fields when it answers `awaited`
    fn correlate_dump(&mut self, awaited: &str, data: &[u8]) -> bool {
        let frame = match decode_frame(data) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!("discarding undecodable frame: {}", e);
                return false;
            }
        };

        if frame.code != awaited {
            tracing::debug!(
                "discarding reply to {} while awaiting {}",
                frame.code,
                awaited
            );
            return false;
        }

        tracing::info!("{} replied: {}", frame.code, hex_dump(&frame.payload));

        match interpret(&frame.code, &frame.payload) {
            Ok(Interpretation::Version(version)) => {
                self.profile.set_version(version);
                true
            }
            Ok(Interpretation::Entry(entry)) => {
                self.profile.push(entry);
                true
            }
            Err(e) => {
                tracing::debug!("discarding uninterpretable {} reply: {}", frame.code, e);
                false
            }
        }
    }

    fn send_current(&mut self, sink: &mut dyn CommandSink) -> Result<Step> {
        match self.catalog.get(self.cursor) {
            Some(cmd) => {
                tracing::info!("sending {}", cmd.code());
                sink.send(&cmd.wire_code())?;
                Ok(Step::AwaitReply)
            }
            None => Ok(Step::Finished),
        }
    }
}

/// Correlate an ACK/NAK against the awaited command.
///
/// These frames carry only a 2-character code for longer commands, so the
/// awaited code is truncated to match before comparing.
fn correlate_empty(awaited: &str, reported: &str, marker: &str) -> bool {
    let sent = if awaited.len() > 2 && reported.len() == 2 {
        &awaited[..2]
    } else {
        awaited
    };

    if reported != sent {
        tracing::debug!(
            "discarding {} for {} while awaiting {}",
            marker,
            reported,
            awaited
        );
        return false;
    }

    tracing::info!("{} answered with <{}>", awaited, marker);
    true
}
