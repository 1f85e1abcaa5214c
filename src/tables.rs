//! Label <-> code translation for charging mode and charging status.
//!
//! Both tables currently hold the same entries. They are kept apart so
//! either can change without touching the other.

/// Returned for codes the table does not know.
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Copy)]
pub struct CodeTable {
    entries: &'static [(&'static str, u8)],
}

impl CodeTable {
    pub const fn new(entries: &'static [(&'static str, u8)]) -> Self {
        Self { entries }
    }

    /// Label for `code`, or [`UNKNOWN_LABEL`].
    pub fn label(&self, code: u64) -> &'static str {
        self.entries
            .iter()
            .find(|(_, c)| u64::from(*c) == code)
            .map(|(label, _)| *label)
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Code for `label`. Unrecognised labels map to `0` (deactivated).
    pub fn code(&self, label: &str) -> u8 {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, code)| *code)
            .unwrap_or(0)
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(label, _)| *label)
    }
}

pub const CHARGING_MODES: CodeTable = CodeTable::new(&[
    ("Deactivated", 0),
    ("Activated", 1),
    ("Mppt", 2),
    ("Equalizing", 3),
    ("Boost", 4),
    ("Floating", 5),
    ("Current limiting", 6),
]);

pub const CHARGING_STATUSES: CodeTable = CodeTable::new(&[
    ("Deactivated", 0),
    ("Activated", 1),
    ("Mppt", 2),
    ("Equalizing", 3),
    ("Boost", 4),
    ("Floating", 5),
    ("Current limiting", 6),
]);
