//! Profile accumulator
//!
//! Append-only collection of decoded fields from one probe run, plus the
//! run-wide protocol version. Entry order equals command completion order
//! and is the documented output order.

use std::fmt;

/// One decoded key/value field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEntry {
    /// Field key (command code, or a semantic name like `model`)
    pub key: String,

    /// Rendered field value
    pub value: String,
}

impl ProfileEntry {
    /// Create a new entry
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Accumulated profile for one probe run
#[derive(Debug, Clone, Default)]
pub struct Profile {
    /// Protocol version, set at most once per version-bearing reply
    version: Option<String>,

    /// Decoded fields in completion order
    entries: Vec<ProfileEntry>,
}

impl Profile {
    /// Create an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the protocol version
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(version.into());
    }

    /// The recorded protocol version, if any reply carried one
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Append a decoded field
    pub fn push(&mut self, entry: ProfileEntry) {
        self.entries.push(entry);
    }

    /// Decoded fields in completion order
    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    /// Render the profile as a delimited block, one `key value` line per
    /// entry, version first. The block is directly consumable as a
    /// settings source by downstream tooling.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- unit profile begins here ---")?;
        writeln!(f, "protocol {}", self.version.as_deref().unwrap_or("0"))?;
        for entry in &self.entries {
            writeln!(f, "{} {}", entry.key, entry.value)?;
        }
        write!(f, "--- unit profile ends here ---")
    }
}
