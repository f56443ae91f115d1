//! Family record extraction.

use crate::diagnostics::Diagnostics;
use crate::pointer::Pointer;
use crate::record::Record;
use crate::types::{Child, Event, Family};

use super::event;

/// `EVEN` type labels that describe how the family unit formed.
const BEGIN_STATUS_LABELS: [&str; 6] = [
    "Partners", "Friends", "Single", "Private", "Unknown", "Other",
];

/// `EVEN` type labels that describe how the family unit ended.
const END_STATUS_LABELS: [&str; 2] = ["Separation", "Annulment"];

/// `EVEN` type label for a family ended by a spouse's death.
const SPOUSE_DEATH_LABEL: &str = "Death of one spouse";

/// Walk a family record's lines into a [`Family`].
pub(crate) fn extract_family(id: u32, record: &mut Record, diag: &mut Diagnostics) -> Family {
    let mut family = Family {
        id,
        ..Family::default()
    };

    for child in &mut record.children {
        match child.token.tag.as_str() {
            "CHAN" => event::set_change(&mut family.change, child, diag),
            "HUSB" => read_spouse(&mut family.husband, child, diag),
            "WIFE" => read_spouse(&mut family.wife, child, diag),
            "CHIL" => read_child_entry(&mut family, child, diag),
            "MARR" => event::set_event(&mut family.marriage, child, diag),
            "DIV" => read_divorce(&mut family, child, diag),
            "EVEN" => read_family_event(&mut family, child, diag),
            _ => diag.report_at(
                child.token.line_no,
                format!("line ignored: '{}'", child.token.text),
            ),
        }
    }

    family
}

/// Read a `HUSB`/`WIFE` line into its single-valued slot, first write wins.
fn read_spouse(slot: &mut Option<u32>, line: &mut Record, diag: &mut Diagnostics) {
    line.token.consumed = true;
    let id = match Pointer::parse(&line.token.value) {
        Ok(pointer) if pointer.is_person() => pointer.number(),
        _ => {
            diag.report_at(
                line.token.line_no,
                format!(
                    "{} reference '{}' does not point to a person",
                    line.token.tag, line.token.value
                ),
            );
            return;
        }
    };
    if slot.is_some() {
        diag.report_at(
            line.token.line_no,
            format!("attempt to overwrite {}", line.token.tag),
        );
        return;
    }
    *slot = Some(id);
}

/// Read a `CHIL` line. Duplicate child ids within one family are dropped.
fn read_child_entry(family: &mut Family, line: &mut Record, diag: &mut Diagnostics) {
    line.token.consumed = true;
    let id = match Pointer::parse(&line.token.value) {
        Ok(pointer) if pointer.is_person() => pointer.number(),
        _ => {
            diag.report_at(
                line.token.line_no,
                format!(
                    "CHIL reference '{}' does not point to a person",
                    line.token.value
                ),
            );
            return;
        }
    };
    if family.children.iter().any(|child| child.id == id) {
        diag.report_at(
            line.token.line_no,
            format!("duplicate child @I{id}@ in family"),
        );
        return;
    }
    family.children.push(Child {
        id,
        ..Child::default()
    });
}

/// Read a `DIV` line: the end status becomes the fixed "Divorce" label, and
/// any date/place detail becomes the family's end event.
fn read_divorce(family: &mut Family, node: &mut Record, diag: &mut Diagnostics) {
    node.token.consumed = true;
    if !node.token.value.is_empty() && node.token.value != "Y" {
        diag.report_at(
            node.token.line_no,
            format!("unexpected DIV value '{}'", node.token.value),
        );
    }

    if family.end_status.is_some() {
        diag.report_at(node.token.line_no, "attempt to overwrite family end status");
    } else {
        family.end_status = Some("Divorce".to_string());
    }

    let line_no = node.token.line_no;
    let detail = event::read_event(node, diag);
    attach_end_event(family, detail, line_no, diag);
}

/// Read a generic `EVEN` wrapper. The first sub-line must carry a `TYPE`
/// label selecting the meaning; an unrecognized label leaves the whole node
/// unconsumed.
fn read_family_event(family: &mut Family, node: &mut Record, diag: &mut Diagnostics) {
    let label = match node.children.first() {
        Some(first) if first.token.tag == "TYPE" => first.token.value.clone(),
        Some(first) => {
            diag.report_at(
                first.token.line_no,
                format!("expected TYPE below EVEN, found '{}'", first.token.tag),
            );
            return;
        }
        None => {
            diag.report_at(node.token.line_no, "EVEN record without a TYPE line");
            return;
        }
    };

    if label == SPOUSE_DEATH_LABEL || END_STATUS_LABELS.contains(&label.as_str()) {
        consume_even_type(node);
        if family.end_status.is_some() {
            diag.report_at(
                node.token.line_no,
                format!("attempt to overwrite family end status with '{label}'"),
            );
        } else {
            family.end_status = Some(label);
        }
        let line_no = node.token.line_no;
        let detail = read_even_detail(node, diag);
        attach_end_event(family, detail, line_no, diag);
    } else if BEGIN_STATUS_LABELS.contains(&label.as_str()) {
        consume_even_type(node);
        if family.begin_status.is_some() {
            diag.report_at(
                node.token.line_no,
                format!("attempt to overwrite family begin status with '{label}'"),
            );
        } else {
            family.begin_status = Some(label);
        }
    } else {
        diag.report_at(
            node.token.line_no,
            format!("unknown family event type '{label}'"),
        );
    }
}

/// Mark the `EVEN` line and its `TYPE` sub-line consumed.
fn consume_even_type(node: &mut Record) {
    node.token.consumed = true;
    if let Some(first) = node.children.first_mut() {
        first.token.consumed = true;
    }
}

/// Read `DATE`/`PLAC` detail from an `EVEN` node, past the `TYPE` line.
fn read_even_detail(node: &mut Record, diag: &mut Diagnostics) -> Event {
    let mut detail = Event::default();
    for sub in node.children.iter_mut().skip(1) {
        match sub.token.tag.as_str() {
            "DATE" => event::set_field(&mut detail.date, sub, diag),
            "PLAC" => event::set_field(&mut detail.place, sub, diag),
            _ => {}
        }
    }
    detail
}

/// Attach non-empty detail as the family's end event, first write wins.
fn attach_end_event(family: &mut Family, detail: Event, line_no: usize, diag: &mut Diagnostics) {
    if detail.is_empty() {
        return;
    }
    if family.end_event.is_some() {
        diag.report_at(line_no, "attempt to overwrite family end event");
        return;
    }
    family.end_event = Some(detail);
}
