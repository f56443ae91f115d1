//! Record-tree construction from the flat token stream.
//!
//! GEDCOM encodes its hierarchy in the level field alone: a line belongs
//! under the nearest preceding line whose level is exactly one lower. This
//! module rebuilds that implicit forest.

use std::iter::Peekable;
use std::vec;

use crate::diagnostics::Diagnostics;
use crate::pointer::Pointer;
use crate::token::Token;

/// One hierarchical record: a token and its nested sub-records.
#[derive(Debug, Clone)]
pub struct Record {
    /// The record's own line.
    pub token: Token,
    /// Sub-records, in input order.
    pub children: Vec<Record>,
}

impl Record {
    /// All tokens under this record, in pre-order.
    #[must_use]
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        out.push(&self.token);
        for child in &self.children {
            child.collect_tokens(out);
        }
    }

    /// Count tokens under this record not yet marked consumed.
    #[must_use]
    pub fn count_unconsumed(&self) -> usize {
        usize::from(!self.token.consumed)
            + self
                .children
                .iter()
                .map(Record::count_unconsumed)
                .sum::<usize>()
    }
}

/// The ordered sequence of top-level records in one input file.
///
/// There is no single root: a GEDCOM file is a forest whose roots are the
/// level-0 lines.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    /// Top-level records, in input order.
    pub records: Vec<Record>,
}

impl Forest {
    /// All tokens in the forest, in pre-order. Flattening reproduces the
    /// original token sequence.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Token> {
        self.records.iter().flat_map(Record::tokens).collect()
    }

    /// Count tokens not yet marked consumed.
    ///
    /// With `exclude_bookends` set, the header, submitter and trailer roots
    /// are skipped — the form the coverage audit uses.
    #[must_use]
    pub fn count_unconsumed(&self, exclude_bookends: bool) -> usize {
        let count = self.records.len();
        self.records
            .iter()
            .enumerate()
            .filter(|(index, _)| !exclude_bookends || (*index > 1 && index + 1 != count))
            .map(|(_, record)| record.count_unconsumed())
            .sum()
    }

    /// Structural checks on the forest bookends.
    ///
    /// The first root must be a bare `HEAD`, the second the submitter
    /// record, the last a childless bare `TRLR`. Violations are reported,
    /// never fatal.
    pub fn validate_structure(&self, diag: &mut Diagnostics) {
        if self.records.len() < 3 {
            diag.report(format!(
                "expected at least header, submitter and trailer records, found {}",
                self.records.len()
            ));
        }

        if let Some(first) = self.records.first() {
            let token = &first.token;
            if token.level != 0 || token.tag != "HEAD" || !token.value.is_empty() {
                diag.report_at(
                    token.line_no,
                    format!("first record is not a bare HEAD record: '{}'", token.text),
                );
            }
        }

        if self.records.len() > 1 {
            if let Some(second) = self.records.get(1) {
                let token = &second.token;
                let is_submitter = Pointer::parse(&token.tag)
                    .map(|pointer| pointer.is_submitter())
                    .unwrap_or(false);
                if !is_submitter || token.value != "SUBM" {
                    diag.report_at(
                        token.line_no,
                        format!("second record is not a submitter record: '{}'", token.text),
                    );
                }
            }

            if let Some(last) = self.records.last() {
                let token = &last.token;
                if token.level != 0
                    || token.tag != "TRLR"
                    || !token.value.is_empty()
                    || !last.children.is_empty()
                {
                    diag.report_at(
                        token.line_no,
                        format!("last record is not a bare TRLR record: '{}'", token.text),
                    );
                }
            }
        }
    }
}

/// Build the record forest from the token stream.
///
/// A record's children are the maximal contiguous run of following tokens
/// at its level + 1; any other level (lower, equal, or a jump past +1) ends
/// the run. Recursion depth equals the input's maximum hierarchy depth.
#[must_use]
pub fn build_forest(tokens: Vec<Token>) -> Forest {
    let mut cursor = tokens.into_iter().peekable();
    let mut records = Vec::new();
    while let Some(token) = cursor.next() {
        records.push(build_record(token, &mut cursor));
    }
    Forest { records }
}

/// Build one record from its own token and the cursor over what follows.
fn build_record(token: Token, cursor: &mut Peekable<vec::IntoIter<Token>>) -> Record {
    let mut children = Vec::new();
    while cursor
        .peek()
        .is_some_and(|next| next.level == token.level + 1)
    {
        if let Some(child) = cursor.next() {
            children.push(build_record(child, cursor));
        }
    }
    Record { token, children }
}
