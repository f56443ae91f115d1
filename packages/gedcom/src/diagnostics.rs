//! Diagnostic sink for non-fatal parse problems.
//!
//! Every stage of the reader reports what it could not understand here and
//! keeps going. The collected entries are presented in batch, next to the
//! run summary, by whoever drives the reader.

use std::fmt;

/// A single diagnostic: an optional source line plus a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Zero-based line number in the input, if the problem is tied to one.
    pub line: Option<usize>,
    /// Human-readable description of the problem.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            // Stored zero-based, shown one-based to match editors.
            Some(line) => write!(f, "line {}: {}", line + 1, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Order-preserving collector of diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a new empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a problem that is not tied to a specific input line.
    pub fn report(&mut self, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            line: None,
            message: message.into(),
        });
    }

    /// Report a problem at a specific (zero-based) input line.
    pub fn report_at(&mut self, line: usize, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            line: Some(line),
            message: message.into(),
        });
    }

    /// Whether nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of reported diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The collected diagnostics, in report order.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Take ownership of the collected diagnostics.
    #[must_use]
    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
