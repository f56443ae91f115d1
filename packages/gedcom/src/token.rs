//! Line tokenizing: raw text lines into level/tag/value tokens.
//!
//! Every input line produces exactly one [`Token`], malformed or not, so
//! line numbers stay aligned for all downstream diagnostics.

use crate::diagnostics::Diagnostics;

/// Sentinel level for lines whose level field did not parse.
pub const INVALID_LEVEL: i32 = -1;

/// One tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Zero-based line number in the input.
    pub line_no: usize,
    /// The original line text, verbatim.
    pub text: String,
    /// Hierarchy level; [`INVALID_LEVEL`] when the level field was malformed.
    pub level: i32,
    /// Tag string (e.g. `NAME`, `@I1@`).
    pub tag: String,
    /// Free-form value; empty when the line ends after the tag.
    pub value: String,
    /// Set by the extractor once the line's content reached the model.
    /// Lines still unset after extraction surface in the coverage audit.
    pub consumed: bool,
}

/// Tokenize raw input lines.
///
/// Best-effort: malformed lines are reported to `diag` but still produce a
/// token, so the output length always equals the input length.
///
/// # Examples
/// ```
/// use stamboom_gedcom::{tokenize, Diagnostics};
///
/// let mut diag = Diagnostics::new();
/// let tokens = tokenize(["0 HEAD", "1 SOUR FTW"], &mut diag);
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[1].tag, "SOUR");
/// assert_eq!(tokens[1].value, "FTW");
/// assert!(diag.is_empty());
/// ```
pub fn tokenize<I, S>(lines: I, diag: &mut Diagnostics) -> Vec<Token>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(line_no, line)| tokenize_line(line_no, line.as_ref(), diag))
        .collect()
}

/// Tokenize a single line.
fn tokenize_line(line_no: usize, line: &str, diag: &mut Diagnostics) -> Token {
    if line.is_empty() {
        diag.report_at(line_no, "empty line");
        return Token {
            line_no,
            text: String::new(),
            level: INVALID_LEVEL,
            tag: String::new(),
            value: String::new(),
            consumed: false,
        };
    }

    let (level_field, rest) = line.split_once(' ').unwrap_or((line, ""));
    let level = match level_field.parse::<i32>() {
        Ok(level) if level >= 0 => level,
        _ => {
            diag.report_at(line_no, format!("bad level number '{level_field}'"));
            INVALID_LEVEL
        }
    };

    let (tag, value) = rest.split_once(' ').unwrap_or((rest, ""));

    Token {
        line_no,
        text: line.to_string(),
        level,
        tag: tag.to_string(),
        value: value.to_string(),
        consumed: false,
    }
}

/// Post-condition checks over the whole token stream.
///
/// Checks that the stream is bracketed by `0 HEAD` and `0 TRLR` and that no
/// line's level rises by more than one over its predecessor (dropping by any
/// amount is legal). Violations are reported, never fatal.
pub fn validate_stream(tokens: &[Token], diag: &mut Diagnostics) {
    let Some(first) = tokens.first() else {
        diag.report("input contains no lines");
        return;
    };

    if first.level != 0 || first.tag != "HEAD" || !first.value.is_empty() {
        diag.report_at(
            first.line_no,
            format!("expected '0 HEAD' on the first line, found '{}'", first.text),
        );
    }

    if let Some(last) = tokens.last() {
        if last.level != 0 || last.tag != "TRLR" || !last.value.is_empty() {
            diag.report_at(
                last.line_no,
                format!("expected '0 TRLR' on the last line, found '{}'", last.text),
            );
        }
    }

    for pair in tokens.windows(2) {
        if let [previous, current] = pair {
            if current.level > previous.level + 1 {
                diag.report_at(
                    current.line_no,
                    format!(
                        "unexpected level jump from {} to {}",
                        previous.level, current.level
                    ),
                );
            }
        }
    }
}
