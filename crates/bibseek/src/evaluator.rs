//! Query evaluation against single records.
//!
//! An [`Evaluator`] walks a [`Query`] for one record at a time. Compiled
//! term matchers are kept in a [`PatternCache`] owned by the evaluator, so
//! a regex is compiled once per search and never shared with another
//! search that may use different flags.

use std::collections::HashMap;

use crate::error::Result;
use crate::flags::SearchFlags;
use crate::matcher::TermMatcher;
use crate::query::{Query, Term};
use crate::record::Record;

/// Compiled matchers keyed by term value, for one flag set.
#[derive(Debug, Default)]
pub struct PatternCache {
    flags: SearchFlags,
    matchers: HashMap<String, TermMatcher>,
}

impl PatternCache {
    pub fn new(flags: SearchFlags) -> Self {
        PatternCache {
            flags,
            matchers: HashMap::new(),
        }
    }

    pub fn flags(&self) -> SearchFlags {
        self.flags
    }

    /// Returns the matcher for `value`, compiling it on first use.
    pub fn get(&mut self, value: &str) -> Result<&TermMatcher> {
        if !self.matchers.contains_key(value) {
            let matcher = TermMatcher::compile(value, self.flags)?;
            self.matchers.insert(value.to_string(), matcher);
        }
        Ok(&self.matchers[value])
    }

    /// Number of distinct compiled values.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

/// Evaluates one query against records under a fixed flag set.
///
/// # Example
///
/// ```
/// use bibseek::{parse, Entry, Evaluator, SearchFlags};
///
/// let query = parse("author=knuth and art");
/// let entry = Entry::new()
///     .with_field("author", "Donald Knuth")
///     .with_field("title", "The Art of Computer Programming");
///
/// let mut evaluator = Evaluator::new(&query, SearchFlags::empty());
/// assert!(evaluator.evaluate(&entry).unwrap());
/// ```
#[derive(Debug)]
pub struct Evaluator<'q> {
    query: &'q Query,
    cache: PatternCache,
}

impl<'q> Evaluator<'q> {
    pub fn new(query: &'q Query, flags: SearchFlags) -> Self {
        Evaluator {
            query,
            cache: PatternCache::new(flags),
        }
    }

    pub fn query(&self) -> &'q Query {
        self.query
    }

    pub fn flags(&self) -> SearchFlags {
        self.cache.flags()
    }

    /// Compiles every term of the query up front.
    ///
    /// Surfaces an invalid pattern even when no record would reach the
    /// offending term.
    pub fn prepare(&mut self) -> Result<()> {
        for term in self.query.terms() {
            self.cache.get(&term.value)?;
        }
        Ok(())
    }

    /// Returns `true` if the record satisfies the whole query.
    pub fn evaluate<R: Record + ?Sized>(&mut self, record: &R) -> Result<bool> {
        let query = self.query;
        self.eval_node(query, record)
    }

    fn eval_node<R: Record + ?Sized>(&mut self, node: &Query, record: &R) -> Result<bool> {
        match node {
            Query::Term(term) => self.eval_term(term, record),
            Query::And(left, right) => {
                Ok(self.eval_node(left, record)? && self.eval_node(right, record)?)
            }
        }
    }

    fn eval_term<R: Record + ?Sized>(&mut self, term: &Term, record: &R) -> Result<bool> {
        let matcher = self.cache.get(&term.value)?;

        let hit = match &term.field {
            Some(field) => record
                .field_value(field.as_str())
                .is_some_and(|value| matcher.is_match(value)),
            None => record.all_values().any(|value| matcher.is_match(value)),
        };
        Ok(hit)
    }
}

/// Evaluates a query against one record.
///
/// Builds a throwaway [`Evaluator`]; prefer the evaluator itself, or the
/// [`DatabaseSearcher`](crate::DatabaseSearcher), when checking many records.
pub fn evaluate<R: Record + ?Sized>(query: &Query, record: &R, flags: SearchFlags) -> Result<bool> {
    Evaluator::new(query, flags).evaluate(record)
}
