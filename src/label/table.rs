//! Immutable label tables with a fallback entry.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Arabic names for the languages the app announces.
pub const ARABIC_LABELS: &[(&str, &str)] = &[
    ("en", "اللغة الإنجليزية"),
    ("fr", "اللغة الفرنسية"),
    ("es", "اللغة الإسبانية"),
    ("de", "اللغة الألمانية"),
    ("ar", "اللغة العربية"),
    ("it", "اللغة الإيطالية"),
];

/// Label used for any code missing from [`ARABIC_LABELS`].
pub const UNKNOWN_LANGUAGE_LABEL: &str = "لغة غير معروفة";

// ---------------------------------------------------------------------------
// LabelTable
// ---------------------------------------------------------------------------

/// Maps language codes to display labels.
///
/// Lookups are case-sensitive and never fail: unknown codes (including the
/// empty string) map to the table's fallback label.
#[derive(Debug, Clone)]
pub struct LabelTable {
    entries: HashMap<&'static str, &'static str>,
    fallback: &'static str,
}

impl LabelTable {
    /// Build a table from `(code, label)` pairs.  Later duplicates win.
    pub fn new(entries: &[(&'static str, &'static str)], fallback: &'static str) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
            fallback,
        }
    }

    /// The process-wide Arabic table, built on first use.
    pub fn arabic() -> &'static LabelTable {
        static TABLE: OnceLock<LabelTable> = OnceLock::new();
        TABLE.get_or_init(|| LabelTable::new(ARABIC_LABELS, UNKNOWN_LANGUAGE_LABEL))
    }

    /// Label for `code`, or the fallback label.
    pub fn get(&self, code: &str) -> &'static str {
        self.entries.get(code).copied().unwrap_or(self.fallback)
    }

    /// Returns `true` when `code` has its own entry.
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    /// Number of explicit entries (the fallback is not counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve `code` against [`LabelTable::arabic`].
pub fn resolve(code: &str) -> &'static str {
    LabelTable::arabic().get(code)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
