//! Query string parser.
//!
//! The grammar is small:
//!
//! ```text
//! query     = clause ( WS+ "and" WS+ clause )*
//! clause    = qualifier | value
//! qualifier = name WS* "=" WS* value
//! name      = ( letter | digit )+
//! value     = '"' any-text '"' | any-text
//! ```
//!
//! The `and` keyword is lowercase only. A value is quoted when it starts
//! with `"` and a later `"` is followed by the end of input or by the next
//! keyword; inside a quoted value the keyword is plain text. Quotes elsewhere
//! are ordinary characters and never pair across clauses. Clauses fold
//! left-associatively, so `a and b and c` becomes `And(And(a, b), c)`.
//!
//! Parsing is total: every input produces a [`Query`]. Input that fits no
//! rule becomes a free-text term holding the whole clause.

use crate::query::{Query, Term};

const KEYWORD: &str = "and";

/// Parses a raw query string.
///
/// # Example
///
/// ```
/// use bibseek::{parse, Query};
///
/// assert_eq!(parse("Test"), Query::term("Test"));
/// assert_eq!(parse("author = Test"), Query::field_term("author", "Test"));
/// assert_eq!(parse("\"salt and pepper\""), Query::term("salt and pepper"));
/// ```
pub fn parse(input: &str) -> Query {
    let mut clauses = Clauses::new(input.trim()).map(parse_clause);

    let first = clauses
        .next()
        .unwrap_or_else(|| Query::Term(Term::free(String::new())));

    clauses.fold(first, Query::and)
}

/// Parses a single clause (no `and` keyword) into a term.
fn parse_clause(clause: &str) -> Query {
    let clause = clause.trim();

    match split_qualifier(clause) {
        Some((name, value)) => Query::field_term(name, unquote(value)),
        None => Query::term(unquote(clause)),
    }
}

/// Splits `name = value` into its parts, if the clause has that shape.
pub(crate) fn split_qualifier(clause: &str) -> Option<(&str, &str)> {
    let eq = clause.find('=')?;
    let name = clause[..eq].trim_end();

    if name.is_empty() || !name.chars().all(char::is_alphanumeric) {
        return None;
    }

    Some((name, clause[eq + 1..].trim_start()))
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Iterator over the clauses of a query string, split on the `and` keyword.
struct Clauses<'a> {
    input: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Clauses<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            done: false,
        }
    }

    /// If a keyword separator starts at byte `at`, returns the byte index
    /// just past it.
    fn separator_end(&self, at: usize) -> Option<usize> {
        let rest = &self.input[at..];
        let after_space = rest.trim_start();
        if after_space.len() == rest.len() {
            return None;
        }

        let after_keyword = after_space.strip_prefix(KEYWORD)?;
        let after_trailing = after_keyword.trim_start();
        if after_trailing.len() == after_keyword.len() || after_trailing.is_empty() {
            return None;
        }

        Some(self.input.len() - after_trailing.len())
    }

    /// Byte index where the value of the clause starting at `start` begins,
    /// past any leading whitespace and `name =` qualifier.
    fn value_start(&self, start: usize) -> usize {
        let rest = &self.input[start..];
        let trimmed = rest.trim_start();
        let offset = start + rest.len() - trimmed.len();

        match split_qualifier(trimmed) {
            Some((_, value)) => self.input.len() - value.len(),
            None => offset,
        }
    }

    /// Byte index of the quote closing a quoted value opened at `open`.
    /// `None` when no quote is followed by the end of input or a separator.
    fn closing_quote(&self, open: usize) -> Option<usize> {
        self.input[open + 1..]
            .match_indices('"')
            .map(|(i, _)| open + 1 + i)
            .find(|&close| {
                let next = close + 1;
                next == self.input.len() || self.separator_end(next).is_some()
            })
    }
}

impl<'a> Iterator for Clauses<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let start = self.pos;
        let value_start = self.value_start(start);
        let scan_from = if self.input[value_start..].starts_with('"') {
            self.closing_quote(value_start).map_or(start, |close| close + 1)
        } else {
            start
        };

        for (offset, c) in self.input[scan_from..].char_indices() {
            let at = scan_from + offset;
            if at == start || !c.is_whitespace() {
                continue;
            }

            if let Some(end) = self.separator_end(at) {
                self.pos = end;
                return Some(&self.input[start..at]);
            }
        }

        self.done = true;
        Some(&self.input[start..])
    }
}
