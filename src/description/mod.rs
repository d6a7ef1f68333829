//! Rule descriptions
//!
//! A `Description` is the ordered list of statements a network was compiled
//! from. Statement order is significant: two descriptions are the same only
//! if their canonical renderings are equal element by element.

mod term;

pub use term::Term;

use crate::error::{PropnetError, PropnetResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Ordered, immutable sequence of statement terms
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description {
    statements: Vec<Term>,
}

impl Description {
    pub fn new(statements: Vec<Term>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Term] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Canonical renderings, in order
    pub fn canonical_strings(&self) -> impl Iterator<Item = String> + '_ {
        self.statements.iter().map(Term::canonical)
    }

    /// Compare against `other` by canonical rendering
    ///
    /// Returns the reason for the first difference found.
    pub fn verify_matches(&self, other: &Description) -> PropnetResult<()> {
        if self.len() != other.len() {
            return Err(PropnetError::DescriptionMismatch {
                reason: format!(
                    "length mismatch ({} statements, expected {})",
                    other.len(),
                    self.len()
                ),
            });
        }

        for (index, (ours, theirs)) in self
            .statements
            .iter()
            .zip(other.statements.iter())
            .enumerate()
        {
            if ours.canonical() != theirs.canonical() {
                return Err(PropnetError::DescriptionMismatch {
                    reason: format!("statement {} differs", index),
                });
            }
        }

        Ok(())
    }

    /// Parse a description from a rule-sheet file
    pub fn from_file(path: &Path) -> PropnetResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PropnetError::io(format!("reading description {}", path.display()), e))?;
        text.parse()
    }
}

impl FromStr for Description {
    type Err = PropnetError;

    /// Parse rule-sheet text: top-level s-expressions, `;` line comments
    fn from_str(text: &str) -> PropnetResult<Self> {
        let mut statements = Vec::new();
        // Open lists, each with the line it started on
        let mut stack: Vec<(usize, Vec<Term>)> = Vec::new();

        for (line_index, line) in text.lines().enumerate() {
            let line_no = line_index + 1;
            let code = line.split(';').next().unwrap_or("");
            let mut chars = code.char_indices().peekable();

            while let Some((start, ch)) = chars.next() {
                match ch {
                    c if c.is_whitespace() => {}
                    '(' => stack.push((line_no, Vec::new())),
                    ')' => {
                        let (_, items) = stack.pop().ok_or(PropnetError::DescriptionParse {
                            line: line_no,
                            reason: "unexpected ')'".to_string(),
                        })?;
                        let term = Term::List(items);
                        match stack.last_mut() {
                            Some((_, parent)) => parent.push(term),
                            None => statements.push(term),
                        }
                    }
                    _ => {
                        let mut end = start + ch.len_utf8();
                        while let Some(&(idx, next)) = chars.peek() {
                            if next.is_whitespace() || next == '(' || next == ')' {
                                break;
                            }
                            end = idx + next.len_utf8();
                            chars.next();
                        }
                        let atom = Term::atom(&code[start..end]);
                        match stack.last_mut() {
                            Some((_, parent)) => parent.push(atom),
                            None => statements.push(atom),
                        }
                    }
                }
            }
        }

        if let Some((line, _)) = stack.first() {
            return Err(PropnetError::DescriptionParse {
                line: *line,
                reason: "unclosed '('".to_string(),
            });
        }

        Ok(Self::new(statements))
    }
}
