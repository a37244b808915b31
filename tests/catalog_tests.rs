//! Catalog Tests
//!
//! Tests for the command catalog and wire encoding rule.

use unitprobe::protocol::decode_frame;
use unitprobe::protocol::encode_frame;
use unitprobe::Catalog;

// =============================================================================
// Wire Encoding Tests
// =============================================================================

#[test]
fn test_single_char_codes_are_doubled() {
    let catalog = Catalog::from_codes(&["M", "V"]);
    assert_eq!(catalog.get(0).unwrap().wire_code(), "MM");
    assert_eq!(catalog.get(1).unwrap().wire_code(), "VV");
}

#[test]
fn test_longer_codes_are_unchanged() {
    let catalog = Catalog::from_codes(&["F8", "FY00", "VS000M"]);
    assert_eq!(catalog.get(0).unwrap().wire_code(), "F8");
    assert_eq!(catalog.get(1).unwrap().wire_code(), "FY00");
    assert_eq!(catalog.get(2).unwrap().wire_code(), "VS000M");
}

// =============================================================================
// Standard Catalog Tests
// =============================================================================

#[test]
fn test_standard_catalog_probe_order() {
    let catalog = Catalog::standard();

    // The version and model queries lead the run
    assert_eq!(catalog.get(0).unwrap().code(), "F8");
    assert_eq!(catalog.get(1).unwrap().code(), "FC");

    // Legacy single-character and firmware-report commands are present
    let codes: Vec<&str> = catalog.iter().map(|c| c.code()).collect();
    assert!(codes.contains(&"M"));
    assert!(codes.contains(&"V"));
    assert!(codes.contains(&"VS000M"));
    assert!(codes.contains(&"FY00"));
}

#[test]
fn test_standard_catalog_reads_do_not_advance() {
    let catalog = Catalog::standard();
    let first = catalog.get(0).unwrap().code();
    assert_eq!(catalog.get(0).unwrap().code(), first);
    assert!(catalog.get(catalog.len()).is_none());
}

#[test]
fn test_standard_catalog_codes_unambiguous_under_recovery() {
    // Every catalog command, encoded as the unit would answer it, must
    // decode back to itself and to no other catalog entry.
    let catalog = Catalog::standard();
    for cmd in catalog.iter() {
        let frame = encode_frame(cmd.code(), b"xy");
        let decoded = decode_frame(&frame).unwrap();
        assert_eq!(decoded.code, cmd.code());
    }

    let codes: Vec<&str> = catalog.iter().map(|c| c.code()).collect();
    let mut unique = codes.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), codes.len());
}
