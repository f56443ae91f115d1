//! Shared field readers used by the person, family and header extractors.

use crate::diagnostics::Diagnostics;
use crate::record::Record;
use crate::types::{Event, Timestamp};

/// Store a line's value into a single-valued slot, first write wins.
///
/// The line is marked consumed either way: a rejected overwrite was still
/// recognized, it just carried data the model refuses to replace.
pub(crate) fn set_field(slot: &mut Option<String>, line: &mut Record, diag: &mut Diagnostics) {
    line.token.consumed = true;
    if slot.is_some() {
        diag.report_at(
            line.token.line_no,
            format!(
                "attempt to overwrite {} value with '{}'",
                line.token.tag, line.token.value
            ),
        );
        return;
    }
    *slot = Some(line.token.value.clone());
}

/// Read a `DATE`/`PLAC` event subtree into an [`Event`].
///
/// Sub-lines outside the fixed tag set are left unconsumed for the coverage
/// audit to flag.
pub(crate) fn read_event(node: &mut Record, diag: &mut Diagnostics) -> Event {
    node.token.consumed = true;
    let mut event = Event::default();
    for sub in &mut node.children {
        match sub.token.tag.as_str() {
            "DATE" => set_field(&mut event.date, sub, diag),
            "PLAC" => set_field(&mut event.place, sub, diag),
            _ => {}
        }
    }
    event
}

/// Store an event into a single-occurrence slot, first write wins.
///
/// On a duplicate the node's own line is consumed but its sub-lines are
/// not, so the dropped detail still shows up in the coverage audit.
pub(crate) fn set_event(slot: &mut Option<Event>, node: &mut Record, diag: &mut Diagnostics) {
    if slot.is_some() {
        node.token.consumed = true;
        diag.report_at(
            node.token.line_no,
            format!("attempt to overwrite {} event", node.token.tag),
        );
        return;
    }
    *slot = Some(read_event(node, diag));
}

/// Read a `DATE` line carrying a nested `TIME` line into a [`Timestamp`].
///
/// The caller guarantees the node is tagged `DATE`. A missing or misplaced
/// `TIME` is reported; whatever was present is kept.
pub(crate) fn read_date_time(node: &mut Record, diag: &mut Diagnostics) -> Timestamp {
    node.token.consumed = true;
    let mut stamp = Timestamp {
        date: Some(node.token.value.clone()),
        time: None,
    };
    match node.children.first_mut() {
        Some(first) if first.token.tag == "TIME" => {
            first.token.consumed = true;
            stamp.time = Some(first.token.value.clone());
        }
        Some(first) => diag.report_at(
            first.token.line_no,
            format!("expected TIME below DATE, found '{}'", first.token.tag),
        ),
        None => diag.report_at(node.token.line_no, "DATE record without a TIME line"),
    }
    stamp
}

/// Read a change-stamp subtree (`CHAN` → `DATE` → `TIME`).
pub(crate) fn read_change(node: &mut Record, diag: &mut Diagnostics) -> Timestamp {
    node.token.consumed = true;
    match node.children.first_mut() {
        Some(first) if first.token.tag == "DATE" => read_date_time(first, diag),
        Some(first) => {
            diag.report_at(
                first.token.line_no,
                format!(
                    "expected DATE below {}, found '{}'",
                    node.token.tag, first.token.tag
                ),
            );
            Timestamp::default()
        }
        None => {
            diag.report_at(
                node.token.line_no,
                format!("{} record without a DATE line", node.token.tag),
            );
            Timestamp::default()
        }
    }
}

/// Store a change stamp into a single-occurrence slot, first write wins.
pub(crate) fn set_change(slot: &mut Option<Timestamp>, node: &mut Record, diag: &mut Diagnostics) {
    if slot.is_some() {
        node.token.consumed = true;
        diag.report_at(
            node.token.line_no,
            format!("attempt to overwrite {} stamp", node.token.tag),
        );
        return;
    }
    *slot = Some(read_change(node, diag));
}
