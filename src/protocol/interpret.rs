//! Field interpreter
//!
//! Turns a decoded payload into a profile entry or a protocol version
//! update, dispatching on the command code. Most replies are recorded as a
//! plain hex byte dump; a handful of codes carry structured fields.

use crate::error::{ProbeError, Result};
use crate::profile::ProfileEntry;

/// Latched unit-error bit in byte 2 of the F4 reply
const UNIT_ERROR_BIT: u8 = 1 << 5;

/// Result of interpreting one reply payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// Updates the run-wide protocol version
    Version(String),

    /// A key/value pair appended to the profile
    Entry(ProfileEntry),
}

/// Interpret a decoded payload for the given command code
///
/// Too-short payloads for the structured codes are errors; callers discard
/// the reply rather than aborting the run.
pub fn interpret(code: &str, payload: &[u8]) -> Result<Interpretation> {
    match code {
        "F8" => interpret_version(payload),
        "FY00" => interpret_version_string(payload),
        "FC" => interpret_model(payload),
        "F4" => {
            let mut bytes = payload.to_vec();
            clear_unit_error_flag(&mut bytes);
            Ok(Interpretation::Entry(ProfileEntry::new(code, hex_dump(&bytes))))
        }
        _ => Ok(Interpretation::Entry(ProfileEntry::new(code, hex_dump(payload)))),
    }
}

/// F8: version lives in payload byte 1, with two flag bits masked off
fn interpret_version(payload: &[u8]) -> Result<Interpretation> {
    let byte = payload.get(1).ok_or_else(|| {
        ProbeError::Frame(format!("F8 payload too short: {} bytes", payload.len()))
    })?;
    Ok(Interpretation::Version(format!("0x{:02X}", byte & !0x30)))
}

/// FY00: four ASCII digits `d0 d1 d2 d3` spell the version `d2.d1.d0`,
/// with `d3` prepended as an epoch marker when nonzero
fn interpret_version_string(payload: &[u8]) -> Result<Interpretation> {
    if payload.len() < 4 || !payload[..4].iter().all(|b| b.is_ascii_digit()) {
        return Err(ProbeError::Frame(format!(
            "FY00 payload is not 4 ASCII digits: {}",
            hex_dump(payload)
        )));
    }
    let d = &payload[..4];
    let mut version = format!("{}.{}.{}", d[2] as char, d[1] as char, d[0] as char);
    if d[3] != b'0' {
        version.insert(0, d[3] as char);
    }
    Ok(Interpretation::Version(version))
}

/// FC: the model string is transmitted byte-reversed
fn interpret_model(payload: &[u8]) -> Result<Interpretation> {
    if !payload.is_ascii() {
        return Err(ProbeError::Frame(format!(
            "FC model string is not ASCII: {}",
            hex_dump(payload)
        )));
    }
    let model: String = payload.iter().rev().map(|b| *b as char).collect();
    Ok(Interpretation::Entry(ProfileEntry::new("model", model)))
}

/// F4 carries a latching unit-error flag; report it and clear it locally so
/// the recorded profile reflects steady state rather than a transient fault.
fn clear_unit_error_flag(bytes: &mut [u8]) {
    if let Some(byte) = bytes.get_mut(2) {
        if *byte & UNIT_ERROR_BIT != 0 {
            tracing::warn!("unit error bit was detected in F4 reply and reset");
            *byte &= !UNIT_ERROR_BIT;
        }
    }
}

/// Render payload bytes as space-separated `0xHH` literals
pub fn hex_dump(payload: &[u8]) -> String {
    payload
        .iter()
        .map(|b| format!("0x{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
