//! Stamboom report - Render family tree reports from GEDCOM exports.
//!
//! The reading itself lives in `stamboom-gedcom`; this crate holds the
//! surfaces around it: the command-line interface, file IO, and report
//! rendering (text and JSON).
//!
//! # Architecture
//!
//! - [`cli`]: clap command-line interface
//! - [`report`]: text report rendering from the semantic model
//! - [`error`]: error types and Result alias

pub mod cli;
pub mod error;
pub mod report;

pub use error::{ReportError, Result};
pub use report::{render_text, REPORT_WRAP_WIDTH};
