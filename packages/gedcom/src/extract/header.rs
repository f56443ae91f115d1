//! Header record extraction.
//!
//! The header is read more leniently than person/family records: lines the
//! model does not cover (character set, language, destination system, ...)
//! are tolerated silently rather than reported.

use crate::diagnostics::Diagnostics;
use crate::record::Record;
use crate::types::Header;

use super::event;

/// Walk the header record into a [`Header`].
pub(crate) fn extract_header(record: &mut Record, diag: &mut Diagnostics) -> Header {
    record.token.consumed = true;
    let mut header = Header::default();

    for child in &mut record.children {
        match child.token.tag.as_str() {
            "DATE" => {
                if header.exported.is_some() {
                    child.token.consumed = true;
                    diag.report_at(
                        child.token.line_no,
                        "attempt to overwrite export timestamp",
                    );
                } else {
                    header.exported = Some(event::read_date_time(child, diag));
                }
            }
            "SOUR" => read_source(child, &mut header, diag),
            "GEDC" => read_format(child, &mut header, diag),
            "FILE" => {
                child.token.consumed = true;
                if child.token.value.is_empty() {
                    diag.report_at(child.token.line_no, "FILE line without a file name");
                }
                if header.file_name.is_some() {
                    diag.report_at(child.token.line_no, "attempt to overwrite FILE name");
                } else {
                    header.file_name = Some(child.token.value.clone());
                }
            }
            _ => {}
        }
    }

    header
}

/// Read the `SOUR` subtree: producing software name and version.
fn read_source(node: &mut Record, header: &mut Header, diag: &mut Diagnostics) {
    node.token.consumed = true;
    for sub in &mut node.children {
        match sub.token.tag.as_str() {
            "NAME" => event::set_field(&mut header.software_name, sub, diag),
            "VERS" => event::set_field(&mut header.software_version, sub, diag),
            _ => {}
        }
    }
}

/// Read the `GEDC` subtree: the format version.
fn read_format(node: &mut Record, header: &mut Header, diag: &mut Diagnostics) {
    node.token.consumed = true;
    for sub in &mut node.children {
        match sub.token.tag.as_str() {
            "VERS" => event::set_field(&mut header.gedcom_version, sub, diag),
            _ => {}
        }
    }
}
