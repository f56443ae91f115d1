//! Semantic extraction: walk the record forest into the typed model.
//!
//! The first forest root builds the header, the second is the submitter,
//! the last is the trailer; everything in between is dispatched on its
//! pointer kind. Two post-passes finish the model: pedigree relocation
//! (the source format records child-parent relations on the child, but the
//! family owns them) and note partitioning by elimination (notes claimed by
//! no person belong to the document). A final coverage audit reports every
//! line no handler consumed.

mod event;
mod family;
mod header;
mod note;
mod person;

use crate::diagnostics::Diagnostics;
use crate::pointer::Pointer;
use crate::record::{Forest, Record};
use crate::types::GedcomFile;

/// Extract the semantic model from the record forest.
///
/// Consumed flags are written on the forest's tokens as lines are
/// understood; this is the only mutation of parsed input after tokenizing.
pub fn extract(forest: &mut Forest, diag: &mut Diagnostics) -> GedcomFile {
    let mut file = GedcomFile::default();
    let count = forest.records.len();

    for (index, record) in forest.records.iter_mut().enumerate() {
        if index == 0 {
            file.header = header::extract_header(record, diag);
        } else if index + 1 == count {
            // Trailer, structurally checked by the tree builder.
        } else if index == 1 {
            // Submitter record, reserved.
        } else {
            dispatch_record(record, &mut file, diag);
        }
    }

    relocate_pedigrees(&mut file);
    partition_notes(&mut file);
    file.unused_lines = audit_coverage(forest, diag);

    file
}

/// Dispatch one body record on its pointer kind.
fn dispatch_record(record: &mut Record, file: &mut GedcomFile, diag: &mut Diagnostics) {
    let line_no = record.token.line_no;
    let pointer = match Pointer::parse(&record.token.tag) {
        Ok(pointer) => pointer,
        Err(_) => {
            diag.report_at(
                line_no,
                format!("record tag '{}' is not a pointer", record.token.tag),
            );
            return;
        }
    };

    match pointer.letters() {
        "I" => {
            if record.token.value != "INDI" {
                diag.report_at(
                    line_no,
                    format!(
                        "person record carries value '{}', expected INDI",
                        record.token.value
                    ),
                );
                return;
            }
            let id = pointer.number();
            if file.people.contains_key(&id) {
                diag.report_at(
                    line_no,
                    format!("duplicate person id {pointer}; keeping the first record"),
                );
                return;
            }
            record.token.consumed = true;
            let person = person::extract_person(id, record, diag);
            file.people.insert(id, person);
        }
        "F" => {
            if record.token.value != "FAM" {
                diag.report_at(
                    line_no,
                    format!(
                        "family record carries value '{}', expected FAM",
                        record.token.value
                    ),
                );
                return;
            }
            let id = pointer.number();
            if file.families.contains_key(&id) {
                diag.report_at(
                    line_no,
                    format!("duplicate family id {pointer}; keeping the first record"),
                );
                return;
            }
            record.token.consumed = true;
            let family = family::extract_family(id, record, diag);
            file.families.insert(id, family);
        }
        "N" | "NI" => {
            if !record.token.value.starts_with("NOTE") {
                diag.report_at(
                    line_no,
                    format!(
                        "note record carries value '{}', expected NOTE",
                        record.token.value
                    ),
                );
                return;
            }
            let key = pointer.key();
            if file.notes.contains_key(&key) {
                diag.report_at(
                    line_no,
                    format!("duplicate note id {pointer}; keeping the first record"),
                );
                return;
            }
            record.token.consumed = true;
            let note = note::extract_note(key.clone(), record, diag);
            file.note_order.push(key.clone());
            file.notes.insert(key, note);
        }
        _ => diag.report_at(line_no, format!("unknown tag '{}'", record.token.tag)),
    }
}

/// Post-pass 1: move parent relations from the child's record to the
/// family's child entries, then drop the transient maps.
fn relocate_pedigrees(file: &mut GedcomFile) {
    for family in file.families.values_mut() {
        for child in &mut family.children {
            if let Some(person) = file.people.get_mut(&child.id) {
                if let Some(pedigree) = person.pedigrees.remove(&family.id) {
                    child.father_relation = pedigree.father_relation;
                    child.mother_relation = pedigree.mother_relation;
                }
            }
        }
    }
    // Entries left over point at families that never listed the child.
    for person in file.people.values_mut() {
        person.pedigrees.clear();
    }
}

/// Post-pass 2: notes claimed by no person belong to the document header.
///
/// Each claim removes its key from the encounter-order list once; a key
/// already removed by an earlier claimant is left alone, so two persons may
/// legally share one note.
fn partition_notes(file: &mut GedcomFile) {
    let mut remaining = file.note_order.clone();
    for person in file.people.values() {
        for key in &person.notes {
            if let Some(position) = remaining.iter().position(|candidate| candidate == key) {
                remaining.remove(position);
                if let Some(note) = file.notes.get_mut(key) {
                    note.owner = Some(person.id);
                }
            }
        }
    }
    file.header.notes = remaining;
}

/// Report every token never consumed by a handler and return the total.
///
/// The header, submitter and trailer roots are exempt; for everything else
/// an unconsumed line means an unmodeled construct in the input.
fn audit_coverage(forest: &Forest, diag: &mut Diagnostics) -> usize {
    let count = forest.records.len();
    let mut unused = 0;
    for (index, record) in forest.records.iter().enumerate() {
        if index <= 1 || index + 1 == count {
            continue;
        }
        for token in record.tokens() {
            if !token.consumed {
                diag.report_at(token.line_no, format!("unused line: '{}'", token.text));
                unused += 1;
            }
        }
    }
    unused
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::build_forest;
    use crate::token::tokenize;
    use pretty_assertions::assert_eq;

    fn read(source: &str) -> (GedcomFile, Diagnostics) {
        let mut diag = Diagnostics::new();
        let tokens = tokenize(source.lines(), &mut diag);
        let mut forest = build_forest(tokens);
        let file = extract(&mut forest, &mut diag);
        (file, diag)
    }

    #[test]
    fn test_extract_end_to_end_example() {
        let source = "0 HEAD\n\
                      1 GEDC\n\
                      2 VERS 5.5.5\n\
                      0 @SUBM@ SUBM\n\
                      0 @I1@ INDI\n\
                      1 NAME John /Smith/\n\
                      0 @F1@ FAM\n\
                      1 HUSB @I1@\n\
                      0 TRLR";
        let (file, diag) = read(source);

        assert!(diag.is_empty());
        assert_eq!(file.person_count(), 1);
        assert_eq!(file.family_count(), 1);
        assert_eq!(file.note_count(), 0);
        assert_eq!(file.unused_lines, 0);
        assert_eq!(
            file.person(1).and_then(|p| p.preferred_name()).map(|n| n.base.as_str()),
            Some("John /Smith/")
        );
        assert_eq!(file.family(1).and_then(|f| f.husband), Some(1));
        assert_eq!(file.header.gedcom_version.as_deref(), Some("5.5.5"));
    }

    #[test]
    fn test_extract_duplicate_person_keeps_first() {
        let source = "0 HEAD\n\
                      0 @SUBM@ SUBM\n\
                      0 @I1@ INDI\n\
                      1 NAME First /Person/\n\
                      0 @I1@ INDI\n\
                      1 NAME Second /Person/\n\
                      0 TRLR";
        let (file, diag) = read(source);

        assert_eq!(file.person_count(), 1);
        assert_eq!(
            file.person(1).and_then(|p| p.preferred_name()).map(|n| n.base.as_str()),
            Some("First /Person/")
        );
        assert!(diag
            .entries()
            .iter()
            .any(|entry| entry.message.contains("duplicate person id @I1@")));
        // The rejected record's lines surface in the audit.
        assert_eq!(file.unused_lines, 2);
    }

    #[test]
    fn test_extract_duplicate_note_keeps_first() {
        let source = "0 HEAD\n\
                      0 @SUBM@ SUBM\n\
                      0 @N1@ NOTE first\n\
                      0 @N1@ NOTE second\n\
                      0 TRLR";
        let (file, diag) = read(source);
        assert_eq!(file.note_count(), 1);
        assert_eq!(
            file.note("N1").map(|n| n.paragraphs.clone()),
            Some(vec!["first".to_string()])
        );
        assert!(diag
            .entries()
            .iter()
            .any(|entry| entry.message.contains("duplicate note id")));
        assert_eq!(file.note_order, vec!["N1".to_string()]);
    }

    #[test]
    fn test_extract_unknown_root_kind() {
        let source = "0 HEAD\n0 @SUBM@ SUBM\n0 @X1@ XYZZY\n0 TRLR";
        let (file, diag) = read(source);
        assert!(diag
            .entries()
            .iter()
            .any(|entry| entry.message == "unknown tag '@X1@'"));
        assert_eq!(file.unused_lines, 1);
    }

    #[test]
    fn test_extract_malformed_root_tag() {
        let source = "0 HEAD\n0 @SUBM@ SUBM\n0 BOGUS INDI\n0 TRLR";
        let (file, diag) = read(source);
        assert!(diag
            .entries()
            .iter()
            .any(|entry| entry.message.contains("'BOGUS' is not a pointer")));
        assert_eq!(file.unused_lines, 1);
    }

    #[test]
    fn test_extract_person_with_wrong_value() {
        let source = "0 HEAD\n0 @SUBM@ SUBM\n0 @I1@ FAM\n0 TRLR";
        let (file, diag) = read(source);
        assert_eq!(file.person_count(), 0);
        assert!(diag
            .entries()
            .iter()
            .any(|entry| entry.message.contains("expected INDI")));
    }

    #[test]
    fn test_extract_unknown_person_line_counts_once() {
        let source = "0 HEAD\n\
                      0 @SUBM@ SUBM\n\
                      0 @I1@ INDI\n\
                      1 FOO bar\n\
                      0 TRLR";
        let (file, diag) = read(source);

        let ignored: Vec<_> = diag
            .entries()
            .iter()
            .filter(|entry| entry.message.contains("line ignored"))
            .collect();
        assert_eq!(ignored.len(), 1);
        assert_eq!(file.unused_lines, 1);
        assert!(diag
            .entries()
            .iter()
            .any(|entry| entry.message == "unused line: '1 FOO bar'"));
    }

    #[test]
    fn test_pedigree_relocation() {
        let source = "0 HEAD\n\
                      0 @SUBM@ SUBM\n\
                      0 @I3@ INDI\n\
                      1 FAMC @F1@\n\
                      2 _FREL Natural\n\
                      2 _MREL Adopted\n\
                      0 @F1@ FAM\n\
                      1 CHIL @I3@\n\
                      0 TRLR";
        let (file, diag) = read(source);

        assert!(diag.is_empty());
        assert_eq!(file.unused_lines, 0);
        let family = file.family(1).unwrap();
        assert_eq!(family.children[0].id, 3);
        assert_eq!(family.children[0].father_relation.as_deref(), Some("Natural"));
        assert_eq!(family.children[0].mother_relation.as_deref(), Some("Adopted"));
        // The transient map is drained.
        assert!(file.person(3).unwrap().pedigrees.is_empty());
    }

    #[test]
    fn test_pedigree_map_cleared_when_family_missing() {
        let source = "0 HEAD\n\
                      0 @SUBM@ SUBM\n\
                      0 @I3@ INDI\n\
                      1 FAMC @F9@\n\
                      2 PEDI adopted\n\
                      0 TRLR";
        let (file, _) = read(source);
        assert!(file.person(3).unwrap().pedigrees.is_empty());
    }

    #[test]
    fn test_note_partition_by_elimination() {
        let source = "0 HEAD\n\
                      0 @SUBM@ SUBM\n\
                      0 @N1@ NOTE about john\n\
                      0 @N2@ NOTE about the file\n\
                      0 @NI3@ NOTE shared\n\
                      0 @I1@ INDI\n\
                      1 NOTE @N1@\n\
                      1 NOTE @NI3@\n\
                      0 @I2@ INDI\n\
                      1 NOTE @NI3@\n\
                      0 TRLR";
        let (file, diag) = read(source);

        assert!(diag.is_empty());
        // N2 was claimed by nobody, so the document owns it.
        assert_eq!(file.header.notes, vec!["N2".to_string()]);
        assert_eq!(file.note("N2").and_then(|n| n.owner), None);
        assert_eq!(file.note("N1").and_then(|n| n.owner), Some(1));
        // The union of header notes and person claims covers every note seen.
        let mut covered: Vec<String> = file.header.notes.clone();
        for person in file.people.values() {
            covered.extend(person.notes.iter().cloned());
        }
        covered.sort();
        covered.dedup();
        let mut seen = file.note_order.clone();
        seen.sort();
        assert_eq!(covered, seen);
    }

    #[test]
    fn test_shared_note_claimed_without_error() {
        let source = "0 HEAD\n\
                      0 @SUBM@ SUBM\n\
                      0 @N1@ NOTE shared\n\
                      0 @I1@ INDI\n\
                      1 NOTE @N1@\n\
                      0 @I2@ INDI\n\
                      1 NOTE @N1@\n\
                      0 TRLR";
        let (file, diag) = read(source);
        assert!(diag.is_empty());
        assert!(file.header.notes.is_empty());
        assert_eq!(file.person(1).unwrap().notes, vec!["N1".to_string()]);
        assert_eq!(file.person(2).unwrap().notes, vec!["N1".to_string()]);
        // First claimant wins the owner slot; the second claim is a no-op.
        assert_eq!(file.note("N1").and_then(|n| n.owner), Some(1));
    }

    #[test]
    fn test_submitter_and_trailer_not_audited() {
        let source = "0 HEAD\n1 CHAR UTF-8\n0 @SUBM@ SUBM\n1 NAME Someone\n0 TRLR";
        let (file, diag) = read(source);
        assert!(diag.is_empty());
        assert_eq!(file.unused_lines, 0);
    }
}
