//! Language-code → localized label lookup.
//!
//! The spoken and displayed name of a detected language comes from a
//! [`LabelTable`]: an immutable map plus a fallback label for every code it
//! does not know.  [`resolve`] looks codes up in the process-wide Arabic
//! table.
//!
//! ```
//! use language_detector::label::{resolve, UNKNOWN_LANGUAGE_LABEL};
//!
//! assert_eq!(resolve("fr"), "اللغة الفرنسية");
//! assert_eq!(resolve("xx"), UNKNOWN_LANGUAGE_LABEL);
//! ```

pub mod table;

pub use table::{resolve, LabelTable, ARABIC_LABELS, UNKNOWN_LANGUAGE_LABEL};
