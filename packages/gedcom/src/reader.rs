//! Reader orchestration: raw lines through all three stages.

use crate::diagnostics::Diagnostics;
use crate::extract;
use crate::record;
use crate::token;
use crate::types::GedcomFile;

/// Read a GEDCOM export from its raw lines.
///
/// Runs the tokenizer, the tree builder and the extractor in sequence,
/// including the stream and structure checks between stages. Problems go to
/// `diag`; the model always comes back, holding whatever could be
/// recovered.
///
/// # Examples
/// ```
/// use stamboom_gedcom::{read_lines, Diagnostics};
///
/// let lines = ["0 HEAD", "0 @SUBM@ SUBM", "0 @I1@ INDI", "1 SEX F", "0 TRLR"];
/// let mut diag = Diagnostics::new();
/// let file = read_lines(lines, &mut diag);
/// assert!(diag.is_empty());
/// assert_eq!(file.person(1).and_then(|p| p.sex.as_deref()), Some("F"));
/// ```
pub fn read_lines<I, S>(lines: I, diag: &mut Diagnostics) -> GedcomFile
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens = token::tokenize(lines, diag);
    token::validate_stream(&tokens, diag);
    tracing::debug!(lines = tokens.len(), "tokenized input");

    let mut forest = record::build_forest(tokens);
    forest.validate_structure(diag);
    tracing::debug!(records = forest.records.len(), "built record forest");

    let file = extract::extract(&mut forest, diag);
    tracing::debug!(
        persons = file.person_count(),
        families = file.family_count(),
        notes = file.note_count(),
        unused_lines = file.unused_lines,
        diagnostics = diag.len(),
        "extracted semantic model"
    );

    file
}

/// Read a GEDCOM export from one string, splitting it on line breaks.
pub fn read_str(text: &str, diag: &mut Diagnostics) -> GedcomFile {
    read_lines(text.lines(), diag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = "0 HEAD\n\
                           1 GEDC\n\
                           2 VERS 5.5.5\n\
                           0 @SUBM@ SUBM\n\
                           0 @I1@ INDI\n\
                           1 NAME John /Smith/\n\
                           0 @F1@ FAM\n\
                           1 HUSB @I1@\n\
                           0 TRLR";

    #[test]
    fn test_read_str_clean_input() {
        let mut diag = Diagnostics::new();
        let file = read_str(MINIMAL, &mut diag);

        assert!(diag.is_empty());
        assert_eq!(file.person_count(), 1);
        assert_eq!(file.family_count(), 1);
        assert_eq!(file.header.gedcom_version.as_deref(), Some("5.5.5"));
        assert_eq!(file.unused_lines, 0);
    }

    #[test]
    fn test_read_str_level_jump_does_not_crash() {
        let source = "0 HEAD\n0 @SUBM@ SUBM\n0 @I1@ INDI\n2 GIVN John\n0 TRLR";
        let mut diag = Diagnostics::new();
        let file = read_str(source, &mut diag);

        let jumps: Vec<_> = diag
            .entries()
            .iter()
            .filter(|entry| entry.message.contains("level jump"))
            .collect();
        assert_eq!(jumps.len(), 1);
        // The stray line becomes its own root by the level rule, not a
        // special case; it is never consumed but extraction still finishes.
        assert_eq!(file.person_count(), 1);
    }

    #[test]
    fn test_read_str_empty_input() {
        let mut diag = Diagnostics::new();
        let file = read_str("", &mut diag);
        assert_eq!(file.person_count(), 0);
        assert!(!diag.is_empty());
    }

    #[test]
    fn test_read_lines_matches_read_str() {
        let mut diag_lines = Diagnostics::new();
        let mut diag_str = Diagnostics::new();
        let from_lines = read_lines(MINIMAL.lines(), &mut diag_lines);
        let from_str = read_str(MINIMAL, &mut diag_str);
        assert_eq!(from_lines.person_count(), from_str.person_count());
        assert_eq!(diag_lines.len(), diag_str.len());
    }
}
