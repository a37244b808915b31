//! Command catalog
//!
//! The ordered, immutable list of query commands sent during a probe run.
//! Catalog order defines the probe sequence and is the sole correlation key:
//! a reply is accepted only when its recovered code matches the command at
//! the session's cursor.

/// Codes probed during a standard run, in probe order.
const STANDARD_CODES: &[&str] = &[
    // Common commands
    "F8", "FC", "F2", "F3", "F4", "FB", "FG", "FK", "FN", "FP", "FQ", "FR", "FS", "FT", "FV",
    // 1-character commands
    "M", "V",
    // Firmware reports this one without a matching request code
    "VS000M",
    // v3 extended commands
    "FY00", "FY10", "FY20", "FU00", "FU02", "FU04",
    "FU05", "FU15", "FU25", "FU35", "FU45", "FU55", "FU65", "FU75", "FU85", "FU95",
    "FX00", "FX10", "FX20", "FX30", "FX40", "FX50", "FX60", "FX70", "FX80", "FX90",
    "FXA0", "FXB0", "FXC0", "FXD0", "FXE0", "FXF0",
    "FX01", "FX11", "FX21", "FX31", "FX41", "FX51", "FX61", "FX71", "FX81",
];

/// A single query command
///
/// Identity is the command's position in its catalog; the code itself is
/// 1, 2, or 4 printable characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    code: &'static str,
}

impl Command {
    /// The command code as listed in the catalog
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// The code as transmitted on the wire.
    ///
    /// The unit's receiver requires at least two characters, so 1-character
    /// codes are doubled; the unit ignores the excess. Longer codes are sent
    /// unchanged.
    pub fn wire_code(&self) -> String {
        if self.code.len() == 1 {
            self.code.repeat(2)
        } else {
            self.code.to_string()
        }
    }
}

/// An ordered, immutable command catalog
///
/// Fixed at construction; the session owns the cursor into it.
#[derive(Debug, Clone)]
pub struct Catalog {
    commands: Vec<Command>,
}

impl Catalog {
    /// The full standard probe catalog
    pub fn standard() -> Self {
        Self::from_codes(STANDARD_CODES)
    }

    /// Build a catalog from an explicit code list (probe order)
    pub fn from_codes(codes: &[&'static str]) -> Self {
        Self {
            commands: codes.iter().map(|code| Command { code }).collect(),
        }
    }

    /// Read the command at `index` without advancing anything
    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    /// Number of commands in the catalog
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the commands in probe order
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }
}
