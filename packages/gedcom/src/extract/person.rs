//! Person record extraction.

use crate::diagnostics::Diagnostics;
use crate::pointer::Pointer;
use crate::record::Record;
use crate::types::{Name, NameKind, Pedigree, Person};

use super::event;

/// Walk a person record's lines into a [`Person`].
pub(crate) fn extract_person(id: u32, record: &mut Record, diag: &mut Diagnostics) -> Person {
    let mut person = Person {
        id,
        ..Person::default()
    };

    for child in &mut record.children {
        match child.token.tag.as_str() {
            "NAME" => read_name(child, &mut person, diag),
            "SEX" => event::set_field(&mut person.sex, child, diag),
            "TITL" => event::set_field(&mut person.title, child, diag),
            "CHAN" => event::set_change(&mut person.change, child, diag),
            "BIRT" => event::set_event(&mut person.birth, child, diag),
            "DEAT" => event::set_event(&mut person.death, child, diag),
            "BURI" => event::set_event(&mut person.burial, child, diag),
            "EMIG" => event::set_event(&mut person.emigration, child, diag),
            "NOTE" => read_note_reference(child, &mut person, diag),
            "FAMC" => read_child_membership(child, &mut person, diag),
            "FAMS" => read_spouse_membership(child, &mut person, diag),
            _ => diag.report_at(
                child.token.line_no,
                format!("line ignored: '{}'", child.token.text),
            ),
        }
    }

    person
}

/// Read one `NAME` line with its sub-fields into a name variant.
fn read_name(node: &mut Record, person: &mut Person, diag: &mut Diagnostics) {
    node.token.consumed = true;
    if node.token.value.is_empty() {
        diag.report_at(node.token.line_no, "NAME line without a name value");
    }

    let mut name = Name::new(node.token.value.as_str());
    let mut kind_seen = false;
    for sub in &mut node.children {
        match sub.token.tag.as_str() {
            "TYPE" => {
                sub.token.consumed = true;
                if kind_seen {
                    diag.report_at(
                        sub.token.line_no,
                        format!(
                            "attempt to overwrite name TYPE with '{}'",
                            sub.token.value
                        ),
                    );
                    continue;
                }
                kind_seen = true;
                if let Some(kind) = NameKind::from_type_value(&sub.token.value) {
                    name.kind = kind;
                }
            }
            "GIVN" => event::set_field(&mut name.given, sub, diag),
            "SURN" => event::set_field(&mut name.surname, sub, diag),
            "NPFX" => event::set_field(&mut name.prefix, sub, diag),
            "NICK" => event::set_field(&mut name.nickname, sub, diag),
            "SPFX" => event::set_field(&mut name.surname_prefix, sub, diag),
            "NSFX" => event::set_field(&mut name.suffix, sub, diag),
            _ => {}
        }
    }

    person.names.push(name);
}

/// Read a `NOTE` reference line; the value must point at a note.
fn read_note_reference(line: &mut Record, person: &mut Person, diag: &mut Diagnostics) {
    line.token.consumed = true;
    match Pointer::parse(&line.token.value) {
        Ok(pointer) if pointer.is_note() => person.notes.push(pointer.key()),
        Ok(_) => diag.report_at(
            line.token.line_no,
            format!(
                "NOTE reference '{}' does not point to a note",
                line.token.value
            ),
        ),
        Err(_) => diag.report_at(
            line.token.line_no,
            format!("NOTE reference '{}' is not a pointer", line.token.value),
        ),
    }
}

/// Read a `FAMC` line: membership as a child, plus the pedigree sub-record
/// the source format records here even though the family owns it.
fn read_child_membership(node: &mut Record, person: &mut Person, diag: &mut Diagnostics) {
    node.token.consumed = true;
    let family_id = match Pointer::parse(&node.token.value) {
        Ok(pointer) if pointer.is_family() => pointer.number(),
        _ => {
            diag.report_at(
                node.token.line_no,
                format!(
                    "FAMC reference '{}' does not point to a family",
                    node.token.value
                ),
            );
            return;
        }
    };
    person.child_of.push(family_id);

    let mut combined: Option<String> = None;
    let mut father: Option<String> = None;
    let mut mother: Option<String> = None;
    for sub in &mut node.children {
        match sub.token.tag.as_str() {
            "PEDI" => event::set_field(&mut combined, sub, diag),
            "_FREL" => event::set_field(&mut father, sub, diag),
            "_MREL" => event::set_field(&mut mother, sub, diag),
            _ => {}
        }
    }

    if combined.is_some() && (father.is_some() || mother.is_some()) {
        diag.report_at(
            node.token.line_no,
            "FAMC carries both PEDI and _FREL/_MREL; keeping PEDI",
        );
    }

    let pedigree = match (combined, father, mother) {
        (Some(both), _, _) => Pedigree {
            father_relation: Some(both.clone()),
            mother_relation: Some(both),
        },
        (None, None, None) => return,
        (None, father, mother) => Pedigree {
            father_relation: father,
            mother_relation: mother,
        },
    };

    if person.pedigrees.contains_key(&family_id) {
        diag.report_at(
            node.token.line_no,
            format!("attempt to overwrite pedigree for family {family_id}"),
        );
        return;
    }
    person.pedigrees.insert(family_id, pedigree);
}

/// Read a `FAMS` line: membership as a spouse/parent.
fn read_spouse_membership(line: &mut Record, person: &mut Person, diag: &mut Diagnostics) {
    line.token.consumed = true;
    match Pointer::parse(&line.token.value) {
        Ok(pointer) if pointer.is_family() => person.spouse_of.push(pointer.number()),
        _ => diag.report_at(
            line.token.line_no,
            format!(
                "FAMS reference '{}' does not point to a family",
                line.token.value
            ),
        ),
    }
}
