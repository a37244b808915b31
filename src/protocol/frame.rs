//! Frame codec
//!
//! Recovers the answered command code and payload from a raw reply frame,
//! and builds synthetic frames for tests and simulators.
//!
//! Example frame (hex): `02 47 4B 71 73 35 31 DC 03` — `G K` decrements to
//! the code `FK`, payload `71 73 35 31`, checksum `DC`, ETX.

use crate::error::{ProbeError, Result};

/// Start-of-frame marker
pub const STX: u8 = 0x02;

/// End-of-frame marker
pub const ETX: u8 = 0x03;

/// Fixed trailing suffix: checksum byte + ETX
pub const SUFFIX_LEN: usize = 2;

/// Code the firmware reports without a matching request
const FIRMWARE_REPORT_CODE: &str = "VS000M";

/// Two-letter prefixes of the 4-character extended command families
const EXTENDED_FAMILIES: [&str; 3] = ["FU", "FX", "FY"];

/// A decoded reply frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command code this frame answers
    pub code: String,

    /// Payload bytes, trailing suffix stripped
    pub payload: Vec<u8>,
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a raw reply frame
///
/// Recovers the answered command code from the header echo and extracts the
/// payload. Matching the code against the outstanding command is the
/// session's job. Malformed frames are errors; callers treat them like
/// uncorrelated replies and discard.
pub fn decode_frame(data: &[u8]) -> Result<Frame> {
    // STX + 2 code characters + checksum + ETX
    if data.len() < 3 + SUFFIX_LEN {
        return Err(ProbeError::Frame(format!(
            "frame too short: {} bytes",
            data.len()
        )));
    }

    let (code, payload_offset) = if data[1] == b'V' && data[2] == b'S' {
        // Firmware report; no request code to undo
        (FIRMWARE_REPORT_CODE.to_string(), 3)
    } else if data[1] == b'M' || data[1] == b'V' {
        // Legacy single-character replies carry the code unincremented
        ((data[1] as char).to_string(), 2)
    } else {
        decode_generic_code(data)?
    };

    if payload_offset + SUFFIX_LEN > data.len() {
        return Err(ProbeError::Frame(format!(
            "frame truncated: {} bytes with payload at offset {}",
            data.len(),
            payload_offset
        )));
    }

    let payload = data[payload_offset..data.len() - SUFFIX_LEN].to_vec();
    Ok(Frame { code, payload })
}

/// Recover a generic 2- or 4-character code by undoing the echo-increment
/// on the first header byte
fn decode_generic_code(data: &[u8]) -> Result<(String, usize)> {
    let first = data[1].wrapping_sub(1);
    let short = [first, data[2]];
    let short_code = code_from_bytes(&short)?;

    if EXTENDED_FAMILIES.contains(&short_code.as_str()) {
        // Extended families use 4-character codes from the same offset
        if data.len() < 5 + SUFFIX_LEN {
            return Err(ProbeError::Frame(format!(
                "extended frame too short: {} bytes",
                data.len()
            )));
        }
        let long = [first, data[2], data[3], data[4]];
        Ok((code_from_bytes(&long)?, 5))
    } else {
        Ok((short_code, 3))
    }
}

fn code_from_bytes(bytes: &[u8]) -> Result<String> {
    if !bytes.iter().all(|b| b.is_ascii_graphic()) {
        return Err(ProbeError::Frame(format!(
            "unprintable code bytes: {}",
            hex::encode_upper(bytes)
        )));
    }
    // Safe: ASCII graphic bytes are valid UTF-8
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

// =============================================================================
// Encoding
// =============================================================================

/// Build a reply frame the way the unit would
///
/// Inverse of [`decode_frame`]: applies the echo-increment for generic
/// codes, the no-increment rule for `M`/`V`, and the `VS` header for the
/// firmware report. Used by tests and simulators.
pub fn encode_frame(code: &str, payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![STX];
    match code {
        FIRMWARE_REPORT_CODE => frame.extend_from_slice(b"VS"),
        "M" | "V" => frame.extend_from_slice(code.as_bytes()),
        _ => {
            let bytes = code.as_bytes();
            frame.push(bytes[0].wrapping_add(1));
            frame.extend_from_slice(&bytes[1..]);
        }
    }
    frame.extend_from_slice(payload);
    frame.push(checksum(&frame[1..]));
    frame.push(ETX);
    frame
}

/// Additive checksum over everything between STX and the checksum field.
/// A computed value of 0x03 is sent as 0x05 so it cannot clash with ETX.
fn checksum(body: &[u8]) -> u8 {
    let sum = body.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum == ETX {
        0x05
    } else {
        sum
    }
}
