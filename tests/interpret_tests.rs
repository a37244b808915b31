//! Field Interpreter Tests
//!
//! Tests for the semantic interpretation of decoded payloads.

use unitprobe::protocol::{hex_dump, interpret, Interpretation};
use unitprobe::ProfileEntry;

// =============================================================================
// Version Tests (F8)
// =============================================================================

#[test]
fn test_f8_version_masks_flag_bits() {
    let result = interpret("F8", &[0x00, 0x35, 0x00]).unwrap();
    assert_eq!(result, Interpretation::Version("0x05".to_string()));
}

#[test]
fn test_f8_payload_too_short() {
    assert!(interpret("F8", &[0x00]).is_err());
    assert!(interpret("F8", &[]).is_err());
}

// =============================================================================
// Version String Tests (FY00)
// =============================================================================

#[test]
fn test_fy00_version_string_reversed_digits() {
    let result = interpret("FY00", b"1320").unwrap();
    assert_eq!(result, Interpretation::Version("2.3.1".to_string()));
}

#[test]
fn test_fy00_zero_epoch_digit_not_prepended() {
    let result = interpret("FY00", b"0320").unwrap();
    assert_eq!(result, Interpretation::Version("2.3.0".to_string()));
}

#[test]
fn test_fy00_nonzero_epoch_digit_prepended() {
    let result = interpret("FY00", b"1321").unwrap();
    assert_eq!(result, Interpretation::Version("12.3.1".to_string()));
}

#[test]
fn test_fy00_rejects_non_digit_payload() {
    assert!(interpret("FY00", b"12a0").is_err());
    assert!(interpret("FY00", b"12").is_err());
}

// =============================================================================
// Model Name Tests (FC)
// =============================================================================

#[test]
fn test_fc_model_is_byte_reversed() {
    let result = interpret("FC", b"IKAF").unwrap();
    assert_eq!(
        result,
        Interpretation::Entry(ProfileEntry::new("model", "FAIK"))
    );
}

#[test]
fn test_fc_model_abcd() {
    let result = interpret("FC", b"ABCD").unwrap();
    assert_eq!(
        result,
        Interpretation::Entry(ProfileEntry::new("model", "DCBA"))
    );
}

#[test]
fn test_fc_rejects_non_ascii_model() {
    assert!(interpret("FC", &[0xC3, 0xA9, 0x41]).is_err());
}

// =============================================================================
// Error Flag Tests (F4)
// =============================================================================

#[test]
fn test_f4_unit_error_flag_cleared() {
    let result = interpret("F4", &[0x00, 0x00, 0x20, 0x00]).unwrap();
    assert_eq!(
        result,
        Interpretation::Entry(ProfileEntry::new("F4", "0x00 0x00 0x00 0x00"))
    );
}

#[test]
fn test_f4_other_bits_untouched() {
    let result = interpret("F4", &[0x01, 0x02, 0x2F, 0x04]).unwrap();
    assert_eq!(
        result,
        Interpretation::Entry(ProfileEntry::new("F4", "0x01 0x02 0x0F 0x04"))
    );
}

#[test]
fn test_f4_without_flag_recorded_verbatim() {
    let result = interpret("F4", &[0x01, 0x02, 0x03, 0x04]).unwrap();
    assert_eq!(
        result,
        Interpretation::Entry(ProfileEntry::new("F4", "0x01 0x02 0x03 0x04"))
    );
}

// =============================================================================
// Generic Dump Tests
// =============================================================================

#[test]
fn test_generic_code_hex_dump() {
    let result = interpret("FK", &[0x71, 0x73, 0x35, 0x31]).unwrap();
    assert_eq!(
        result,
        Interpretation::Entry(ProfileEntry::new("FK", "0x71 0x73 0x35 0x31"))
    );
}

#[test]
fn test_generic_empty_payload() {
    let result = interpret("FX00", &[]).unwrap();
    assert_eq!(result, Interpretation::Entry(ProfileEntry::new("FX00", "")));
}

#[test]
fn test_hex_dump_formatting() {
    assert_eq!(hex_dump(&[0x00, 0xAB, 0x05]), "0x00 0xAB 0x05");
    assert_eq!(hex_dump(&[]), "");
}
