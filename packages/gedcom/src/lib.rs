//! Stamboom GEDCOM reader - Parse genealogical GEDCOM exports into a
//! semantic model.
//!
//! This crate reads the line-oriented, level-prefixed GEDCOM format written
//! by desktop family-tree software and builds an in-memory model of
//! persons, families, notes and the document header. Malformed input is
//! reported to a diagnostic sink and skipped, never fatal: the reader
//! recovers as much of a partially-conforming export as it can.
//!
//! # Example
//!
//! ```
//! use stamboom_gedcom::{read_str, Diagnostics};
//!
//! let source = "0 HEAD\n\
//!               1 GEDC\n\
//!               2 VERS 5.5.5\n\
//!               0 @SUBM@ SUBM\n\
//!               0 @I1@ INDI\n\
//!               1 NAME John /Smith/\n\
//!               0 TRLR";
//! let mut diagnostics = Diagnostics::new();
//! let file = read_str(source, &mut diagnostics);
//!
//! assert!(diagnostics.is_empty());
//! assert_eq!(file.person_count(), 1);
//! assert_eq!(file.header.gedcom_version.as_deref(), Some("5.5.5"));
//! assert_eq!(file.unused_lines, 0);
//! ```
//!
//! # Architecture
//!
//! The reader is a three-stage pipeline, each stage fully materializing its
//! output before the next begins:
//!
//! - [`token`]: raw lines into level/tag/value tokens
//! - [`record`]: the token stream into the implicit record forest
//! - [`extract`]: the forest into typed entities with cross-linking
//!
//! Supporting modules:
//!
//! - [`pointer`]: `@I1@`-style cross-reference parsing
//! - [`types`]: the semantic model
//! - [`diagnostics`]: the non-fatal problem sink
//! - [`reader`]: stage orchestration
//! - [`error`]: API-level error types

pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod pointer;
pub mod reader;
pub mod record;
pub mod token;
pub mod types;

// Re-export commonly used items
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{GedcomError, Result};
pub use extract::extract;
pub use pointer::Pointer;
pub use reader::{read_lines, read_str};
pub use record::{build_forest, Forest, Record};
pub use token::{tokenize, validate_stream, Token, INVALID_LEVEL};
pub use types::{
    Child, Event, Family, GedcomFile, Header, Name, NameKind, Note, Pedigree, Person, Timestamp,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
