//! Cross-reference pointer parsing for `@<LETTERS><DIGITS>@` strings.
//!
//! Pointers name top-level records (`0 @I1@ INDI`) and reference them from
//! elsewhere (`1 HUSB @I1@`). The letter prefix encodes the record kind:
//! `I` person, `F` family, `N`/`NI` note, `SUBM` submitter.
//!
//! # Examples
//!
//! ```
//! use stamboom_gedcom::Pointer;
//!
//! let pointer = Pointer::parse("@I12@").unwrap();
//! assert!(pointer.is_person());
//! assert_eq!(pointer.number(), 12);
//!
//! let note = Pointer::parse("@NI4@").unwrap();
//! assert!(note.is_note());
//! assert_eq!(note.key(), "NI4");
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{GedcomError, Result};

/// Pointer pattern: uppercase kind letters, then optional digits, in `@..@`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static POINTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Z]+)([0-9]*)@$").expect("valid regex"));

/// A parsed cross-reference pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    /// Original pointer string (e.g. `@I1@`).
    raw: String,
    /// Kind prefix (e.g. `I`, `F`, `NI`, `SUBM`).
    letters: String,
    /// Numeric id; 0 when the digit run is empty (as in `@SUBM@`).
    number: u32,
}

impl Pointer {
    /// Parse a pointer string.
    ///
    /// # Errors
    /// Returns [`GedcomError::InvalidPointer`] when the string does not
    /// match the pointer grammar, or [`GedcomError::InvalidPointerNumber`]
    /// when the digit run overflows the id range.
    pub fn parse(raw: &str) -> Result<Self> {
        let captures = POINTER_PATTERN
            .captures(raw)
            .ok_or_else(|| GedcomError::InvalidPointer(raw.to_string()))?;

        let letters = captures
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let digits = captures.get(2).map(|m| m.as_str()).unwrap_or("");

        let number = if digits.is_empty() {
            0
        } else {
            digits
                .parse()
                .map_err(|_| GedcomError::InvalidPointerNumber(raw.to_string()))?
        };

        Ok(Self {
            raw: raw.to_string(),
            letters,
            number,
        })
    }

    /// The kind prefix letters.
    #[must_use]
    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// The numeric id.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Normalized lookup key: kind letters followed by the number
    /// (`@NI04@` and `@NI4@` both key as `NI4`).
    ///
    /// Used to key notes, whose two kinds (`N`, `NI`) share a numeric
    /// namespace but not an identifier namespace.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}{}", self.letters, self.number)
    }

    /// Whether this points at a person record.
    #[must_use]
    pub fn is_person(&self) -> bool {
        self.letters == "I"
    }

    /// Whether this points at a family record.
    #[must_use]
    pub fn is_family(&self) -> bool {
        self.letters == "F"
    }

    /// Whether this points at a note record (either note kind).
    #[must_use]
    pub fn is_note(&self) -> bool {
        self.letters == "N" || self.letters == "NI"
    }

    /// Whether this is the submitter pointer.
    #[must_use]
    pub fn is_submitter(&self) -> bool {
        self.letters == "SUBM"
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
