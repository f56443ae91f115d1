//! Error types for the GEDCOM reader.
//!
//! Errors here cover API misuse (handing a malformed pointer string to
//! [`crate::pointer::Pointer::parse`]). Trouble found while reading a file
//! never becomes an `Err`: it is reported to the [`crate::Diagnostics`]
//! sink and reading continues, so that as much of a partially-conforming
//! export as possible ends up in the model.

use thiserror::Error;

/// Main error type for the GEDCOM reader library.
#[derive(Debug, Error)]
pub enum GedcomError {
    /// Pointer string does not match the `@<LETTERS><DIGITS>@` grammar.
    #[error("Invalid pointer: '{0}'. Expected @<LETTERS><DIGITS>@ (e.g. @I1@)")]
    InvalidPointer(String),

    /// Pointer digits do not fit the numeric id range.
    #[error("Pointer number out of range: '{0}'")]
    InvalidPointerNumber(String),
}

/// Result type alias for GEDCOM reader operations.
pub type Result<T> = std::result::Result<T, GedcomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GedcomError::InvalidPointer("I1".to_string());
        assert!(err.to_string().contains("'I1'"));
        assert!(err.to_string().contains("@<LETTERS><DIGITS>@"));
    }

    #[test]
    fn test_number_error_display() {
        let err = GedcomError::InvalidPointerNumber("@I99999999999@".to_string());
        assert_eq!(
            err.to_string(),
            "Pointer number out of range: '@I99999999999@'"
        );
    }
}
