//! Note record extraction.
//!
//! A note's text is assembled from the record's own value line (anything
//! after the `NOTE ` prefix) plus its continuation/concatenation sub-lines:
//! `CONT` starts a new paragraph, `CONC` appends to the current one without
//! a break.

use crate::diagnostics::Diagnostics;
use crate::record::Record;
use crate::types::Note;

/// Walk a note record into a [`Note`].
///
/// The caller has already checked that the record's value starts with
/// `NOTE` and marked the root line consumed.
pub(crate) fn extract_note(key: String, record: &mut Record, diag: &mut Diagnostics) -> Note {
    let mut paragraphs = Vec::new();
    let mut accumulator = String::new();

    if let Some(seed) = record.token.value.strip_prefix("NOTE ") {
        accumulator.push_str(seed);
    }

    for child in &mut record.children {
        match child.token.tag.as_str() {
            "CONT" => {
                child.token.consumed = true;
                paragraphs.push(std::mem::take(&mut accumulator));
                accumulator.push_str(&child.token.value);
            }
            "CONC" => {
                child.token.consumed = true;
                accumulator.push_str(&child.token.value);
            }
            _ => diag.report_at(
                child.token.line_no,
                format!("unexpected tag '{}' in note", child.token.tag),
            ),
        }
    }

    if !accumulator.is_empty() {
        paragraphs.push(accumulator);
    }

    Note {
        key,
        paragraphs,
        owner: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::build_forest;
    use crate::token::tokenize;
    use pretty_assertions::assert_eq;

    fn note_from(source: &str) -> (Note, Diagnostics, Record) {
        let mut diag = Diagnostics::new();
        let tokens = tokenize(source.lines(), &mut diag);
        let mut forest = build_forest(tokens);
        let mut record = forest.records.remove(0);
        let note = extract_note("N1".to_string(), &mut record, &mut diag);
        (note, diag, record)
    }

    #[test]
    fn test_extract_note_single_paragraph() {
        let (note, diag, _) = note_from("0 @N1@ NOTE First line of text");
        assert!(diag.is_empty());
        assert_eq!(note.paragraphs, vec!["First line of text".to_string()]);
    }

    #[test]
    fn test_extract_note_cont_starts_new_paragraph() {
        let source = "0 @N1@ NOTE First paragraph\n1 CONT Second paragraph";
        let (note, diag, _) = note_from(source);
        assert!(diag.is_empty());
        assert_eq!(
            note.paragraphs,
            vec!["First paragraph".to_string(), "Second paragraph".to_string()]
        );
    }

    #[test]
    fn test_extract_note_conc_appends_without_break() {
        let source = "0 @N1@ NOTE A sentence split ac\n1 CONC ross two lines";
        let (note, diag, _) = note_from(source);
        assert!(diag.is_empty());
        assert_eq!(
            note.paragraphs,
            vec!["A sentence split across two lines".to_string()]
        );
    }

    #[test]
    fn test_extract_note_cont_without_seed_keeps_blank_paragraph() {
        let source = "0 @N1@ NOTE\n1 CONT Text after a blank";
        let (note, _, _) = note_from(source);
        assert_eq!(
            note.paragraphs,
            vec![String::new(), "Text after a blank".to_string()]
        );
    }

    #[test]
    fn test_extract_note_empty_trailing_accumulator_not_flushed() {
        let source = "0 @N1@ NOTE Text\n1 CONT";
        let (note, _, _) = note_from(source);
        assert_eq!(note.paragraphs, vec!["Text".to_string()]);
    }

    #[test]
    fn test_extract_note_unexpected_tag() {
        let source = "0 @N1@ NOTE Text\n1 DATE 1 JAN 1900";
        let (note, diag, record) = note_from(source);
        assert_eq!(note.paragraphs, vec!["Text".to_string()]);
        assert_eq!(diag.len(), 1);
        assert!(diag.entries()[0].message.contains("unexpected tag 'DATE'"));
        assert!(!record.children[0].token.consumed);
    }

    #[test]
    fn test_extract_note_no_text_at_all() {
        let (note, diag, _) = note_from("0 @N1@ NOTE");
        assert!(diag.is_empty());
        assert!(note.paragraphs.is_empty());
    }
}
