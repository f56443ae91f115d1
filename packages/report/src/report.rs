//! Text report rendering from the semantic model.
//!
//! The renderer only reads the model; all parsing decisions were made by
//! the reader. Sections: header block, persons, families, document notes.

use stamboom_gedcom::{Event, Family, GedcomFile, Person, Timestamp};

/// Wrap width for note paragraphs.
pub const REPORT_WRAP_WIDTH: usize = 80;

/// Render the full text report.
///
/// `generated_at` is stamped into the report head; the caller supplies it
/// so rendering stays deterministic under test.
#[must_use]
pub fn render_text(file: &GedcomFile, generated_at: &str) -> String {
    let mut out = String::new();

    render_head(&mut out, file, generated_at);
    render_persons(&mut out, file);
    render_families(&mut out, file);
    render_document_notes(&mut out, file);

    out
}

/// Render the report head from the document header.
fn render_head(out: &mut String, file: &GedcomFile, generated_at: &str) {
    push_title(out, "Stamboom report", '=');
    out.push_str(&format!("Generated: {generated_at}\n"));

    let header = &file.header;
    match (&header.software_name, &header.software_version) {
        (Some(name), Some(version)) => out.push_str(&format!("Source:    {name} {version}\n")),
        (Some(name), None) => out.push_str(&format!("Source:    {name}\n")),
        _ => {}
    }
    if let Some(version) = &header.gedcom_version {
        out.push_str(&format!("Format:    GEDCOM {version}\n"));
    }
    if let Some(exported) = &header.exported {
        out.push_str(&format!("Exported:  {}\n", format_timestamp(exported)));
    }
    if let Some(file_name) = &header.file_name {
        out.push_str(&format!("File:      {file_name}\n"));
    }
    out.push('\n');
}

/// Render one section per person.
fn render_persons(out: &mut String, file: &GedcomFile) {
    push_title(out, &format!("Persons ({})", file.person_count()), '-');

    for person in file.people.values() {
        out.push_str(&format!("{}\n", person_label(file, person.id)));
        render_person_body(out, file, person);
        out.push('\n');
    }
}

fn render_person_body(out: &mut String, file: &GedcomFile, person: &Person) {
    for name in person.names.iter().skip(1) {
        out.push_str(&format!(
            "  Name: {} [{}]\n",
            name.display(),
            name.kind.as_str()
        ));
    }
    if let Some(sex) = &person.sex {
        out.push_str(&format!("  Sex: {sex}\n"));
    }
    if let Some(title) = &person.title {
        out.push_str(&format!("  Title: {title}\n"));
    }
    push_event(out, "Born", person.birth.as_ref());
    push_event(out, "Emigrated", person.emigration.as_ref());
    push_event(out, "Died", person.death.as_ref());
    push_event(out, "Buried", person.burial.as_ref());

    if !person.child_of.is_empty() {
        out.push_str(&format!(
            "  Child in: {}\n",
            family_list(&person.child_of)
        ));
    }
    if !person.spouse_of.is_empty() {
        out.push_str(&format!(
            "  Spouse in: {}\n",
            family_list(&person.spouse_of)
        ));
    }
    for key in &person.notes {
        if let Some(note) = file.note(key) {
            push_note_paragraphs(out, &note.paragraphs);
        }
    }
    if let Some(change) = &person.change {
        out.push_str(&format!("  Last changed: {}\n", format_timestamp(change)));
    }
}

/// Render one section per family.
fn render_families(out: &mut String, file: &GedcomFile) {
    push_title(out, &format!("Families ({})", file.family_count()), '-');

    for family in file.families.values() {
        out.push_str(&format!("@F{}@\n", family.id));
        render_family_body(out, file, family);
        out.push('\n');
    }
}

fn render_family_body(out: &mut String, file: &GedcomFile, family: &Family) {
    if let Some(id) = family.husband {
        out.push_str(&format!("  Husband: {}\n", person_label(file, id)));
    }
    if let Some(id) = family.wife {
        out.push_str(&format!("  Wife: {}\n", person_label(file, id)));
    }
    push_event(out, "Married", family.marriage.as_ref());
    if let Some(status) = &family.begin_status {
        out.push_str(&format!("  Formed as: {status}\n"));
    }
    if let Some(status) = &family.end_status {
        match &family.end_event {
            Some(event) => out.push_str(&format!(
                "  Ended: {status} ({})\n",
                format_event(event)
            )),
            None => out.push_str(&format!("  Ended: {status}\n")),
        }
    }
    if !family.children.is_empty() {
        out.push_str("  Children:\n");
        for child in &family.children {
            let mut line = format!("    - {}", person_label(file, child.id));
            match (&child.father_relation, &child.mother_relation) {
                (Some(father), Some(mother)) => {
                    line.push_str(&format!(" (father: {father}, mother: {mother})"));
                }
                (Some(father), None) => line.push_str(&format!(" (father: {father})")),
                (None, Some(mother)) => line.push_str(&format!(" (mother: {mother})")),
                (None, None) => {}
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
}

/// Render notes owned by the document rather than any person.
fn render_document_notes(out: &mut String, file: &GedcomFile) {
    if file.header.notes.is_empty() {
        return;
    }
    push_title(
        out,
        &format!("Document notes ({})", file.header.notes.len()),
        '-',
    );
    for key in &file.header.notes {
        if let Some(note) = file.note(key) {
            out.push_str(&format!("{key}:\n"));
            push_note_paragraphs(out, &note.paragraphs);
            out.push('\n');
        }
    }
}

/// Section title with an underline.
fn push_title(out: &mut String, title: &str, underline: char) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&underline.to_string().repeat(title.chars().count()));
    out.push_str("\n\n");
}

/// Person reference with the preferred name resolved, when known.
fn person_label(file: &GedcomFile, id: u32) -> String {
    match file.person(id).and_then(|person| person.preferred_name()) {
        Some(name) => format!("@I{id}@ {}", name.display()),
        None => format!("@I{id}@"),
    }
}

fn family_list(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| format!("@F{id}@"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_event(out: &mut String, label: &str, event: Option<&Event>) {
    if let Some(event) = event {
        out.push_str(&format!("  {label}: {}\n", format_event(event)));
    }
}

fn push_note_paragraphs(out: &mut String, paragraphs: &[String]) {
    for paragraph in paragraphs {
        if paragraph.is_empty() {
            out.push('\n');
            continue;
        }
        let wrapped = textwrap::fill(paragraph, REPORT_WRAP_WIDTH);
        out.push_str(&textwrap::indent(&wrapped, "  "));
        out.push('\n');
    }
}

fn format_event(event: &Event) -> String {
    match (&event.date, &event.place) {
        (Some(date), Some(place)) => format!("{date}, {place}"),
        (Some(date), None) => date.clone(),
        (None, Some(place)) => place.clone(),
        (None, None) => "(no detail)".to_string(),
    }
}

fn format_timestamp(stamp: &Timestamp) -> String {
    match (&stamp.date, &stamp.time) {
        (Some(date), Some(time)) => format!("{date} {time}"),
        (Some(date), None) => date.clone(),
        (None, Some(time)) => time.clone(),
        (None, None) => "(unknown)".to_string(),
    }
}
