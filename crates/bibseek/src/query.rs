//! Query syntax tree.
//!
//! A [`Query`] is a tree of [`Term`] leaves joined by conjunctions. It is
//! produced by [`parse`](crate::parse) and consumed by the evaluator.

use std::fmt;

use crate::parser::split_qualifier;
use crate::record::FieldName;

/// A single match condition.
///
/// With `field` set, the term applies to that one field. Without it the
/// term is free text and applies to every field value of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    pub field: Option<FieldName>,
    pub value: String,
}

impl Term {
    /// Creates a free-text term.
    pub fn free(value: impl Into<String>) -> Self {
        Term {
            field: None,
            value: value.into(),
        }
    }

    /// Creates a field-qualified term.
    pub fn qualified(field: impl Into<FieldName>, value: impl Into<String>) -> Self {
        Term {
            field: Some(field.into()),
            value: value.into(),
        }
    }

    pub fn is_free_text(&self) -> bool {
        self.field.is_none()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "{}=", field)?;
        }
        if needs_quotes(&self.value, self.field.is_none()) {
            write!(f, "\"{}\"", self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

// Values that would not survive a reparse unquoted. A value holding a
// quote directly followed by the keyword cannot be written at all.
fn needs_quotes(value: &str, free_text: bool) -> bool {
    value.contains(" and ")
        || value
            .strip_suffix("and")
            .is_some_and(|head| head.ends_with(char::is_whitespace))
        || value.trim() != value
        || value.starts_with('"')
        || (free_text && split_qualifier(value).is_some())
}

/// A parsed query.
///
/// # Example
///
/// ```
/// use bibseek::{parse, Query};
///
/// let query = parse("author=Test and title=Case");
/// assert_eq!(
///     query,
///     Query::and(
///         Query::field_term("author", "Test"),
///         Query::field_term("title", "Case"),
///     )
/// );
/// assert_eq!(query.to_string(), "author=Test and title=Case");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    /// A leaf condition.
    Term(Term),
    /// Both sides must match.
    And(Box<Query>, Box<Query>),
}

impl Query {
    /// Creates a free-text term node.
    pub fn term(value: impl Into<String>) -> Self {
        Query::Term(Term::free(value))
    }

    /// Creates a field-qualified term node.
    pub fn field_term(field: impl Into<FieldName>, value: impl Into<String>) -> Self {
        Query::Term(Term::qualified(field, value))
    }

    /// Joins two queries with a conjunction.
    pub fn and(left: Query, right: Query) -> Self {
        Query::And(Box::new(left), Box::new(right))
    }

    /// Returns the leaf terms from left to right.
    pub fn terms(&self) -> Vec<&Term> {
        let mut terms = Vec::new();
        self.collect_terms(&mut terms);
        terms
    }

    fn collect_terms<'a>(&'a self, out: &mut Vec<&'a Term>) {
        match self {
            Query::Term(term) => out.push(term),
            Query::And(left, right) => {
                left.collect_terms(out);
                right.collect_terms(out);
            }
        }
    }

    /// Number of leaf terms. Never zero.
    pub fn term_count(&self) -> usize {
        match self {
            Query::Term(_) => 1,
            Query::And(left, right) => left.term_count() + right.term_count(),
        }
    }
}

impl From<Term> for Query {
    fn from(term: Term) -> Self {
        Query::Term(term)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Term(term) => write!(f, "{}", term),
            Query::And(left, right) => write!(f, "{} and {}", left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_in_order() {
        let query = Query::and(
            Query::and(Query::term("a"), Query::field_term("title", "b")),
            Query::term("c"),
        );

        let values: Vec<&str> = query.terms().iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["a", "b", "c"]);
        assert_eq!(query.term_count(), 3);
        assert_eq!(Query::term("x").term_count(), 1);
    }

    #[test]
    fn field_is_normalised() {
        let term = Term::qualified("AUTHOR", "Test");
        assert_eq!(term.field, Some(FieldName::new("author")));
        assert!(!term.is_free_text());
        assert!(Term::free("x").is_free_text());
    }

    #[test]
    fn display_plain() {
        let query = Query::and(Query::field_term("Author", "Test"), Query::term("Case"));
        assert_eq!(query.to_string(), "author=Test and Case");
    }

    #[test]
    fn display_quotes_ambiguous_values() {
        assert_eq!(Query::term("salt and pepper").to_string(), "\"salt and pepper\"");
        assert_eq!(Query::term(" padded").to_string(), "\" padded\"");
        assert_eq!(Query::term("plain").to_string(), "plain");
        assert_eq!(Query::term("rock and").to_string(), "\"rock and\"");
        assert_eq!(Query::term("and").to_string(), "and");
        assert_eq!(Query::term("a=b").to_string(), "\"a=b\"");
        assert_eq!(Query::term("\"open").to_string(), "\"\"open\"");
        assert_eq!(Query::field_term("note", "a=b").to_string(), "note=a=b");
    }
}
