//! Profile Tests
//!
//! Tests for profile accumulation and rendering.

use unitprobe::{Profile, ProfileEntry};

// =============================================================================
// Accumulation Tests
// =============================================================================

#[test]
fn test_entries_keep_insertion_order() {
    let mut profile = Profile::new();
    profile.push(ProfileEntry::new("model", "FAIK"));
    profile.push(ProfileEntry::new("F2", "0x00 0x01"));
    profile.push(ProfileEntry::new("F3", "0xFE"));

    let keys: Vec<&str> = profile.entries().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["model", "F2", "F3"]);
}

#[test]
fn test_version_set_and_read() {
    let mut profile = Profile::new();
    assert_eq!(profile.version(), None);

    profile.set_version("0x05");
    assert_eq!(profile.version(), Some("0x05"));

    // A later version-bearing reply overwrites
    profile.set_version("2.3.1");
    assert_eq!(profile.version(), Some("2.3.1"));
}

// =============================================================================
// Rendering Tests
// =============================================================================

#[test]
fn test_render_delimited_block() {
    let mut profile = Profile::new();
    profile.set_version("0x05");
    profile.push(ProfileEntry::new("model", "FAIK"));

    let rendered = profile.render();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.first(), Some(&"--- unit profile begins here ---"));
    assert_eq!(lines[1], "protocol 0x05");
    assert_eq!(lines[2], "model FAIK");
    assert_eq!(lines.last(), Some(&"--- unit profile ends here ---"));
}

#[test]
fn test_render_defaults_version_to_zero() {
    let profile = Profile::new();
    let rendered = profile.render();
    assert!(rendered.lines().any(|line| line == "protocol 0"));
}

#[test]
fn test_render_matches_display() {
    let mut profile = Profile::new();
    profile.push(ProfileEntry::new("FB", "0x00"));
    assert_eq!(profile.render(), profile.to_string());
}
