//! Searching record collections.
//!
//! A [`SearchQuery`] bundles the raw query text, its flags and the parsed
//! [`Query`]. A [`DatabaseSearcher`] runs it over a slice of records and
//! returns the matches in collection order.
//!
//! A search that cannot be evaluated (an invalid regular expression) yields
//! no matches from [`DatabaseSearcher::matches`]; use
//! [`DatabaseSearcher::try_matches`] to see the error.

use tracing::{debug, warn};

use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::flags::{SearchFlag, SearchFlags};
use crate::parser::parse;
use crate::query::Query;
use crate::record::Record;

/// A parsed query together with its flags.
///
/// # Example
///
/// ```
/// use bibseek::SearchQuery;
///
/// let query = SearchQuery::new(r"\bCase\b").regular_expression().case_sensitive();
/// assert!(query.flags().is_regular_expression());
/// assert!(query.validate().is_ok());
///
/// let broken = SearchQuery::new("(unclosed").regular_expression();
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SearchQuery {
    text: String,
    flags: SearchFlags,
    query: Query,
}

impl SearchQuery {
    /// Parses `text` with no flags set.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let query = parse(&text);
        SearchQuery {
            text,
            flags: SearchFlags::empty(),
            query,
        }
    }

    pub fn with_flags(mut self, flags: SearchFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn case_sensitive(self) -> Self {
        let flags = self.flags.with(SearchFlag::CaseSensitive);
        self.with_flags(flags)
    }

    pub fn regular_expression(self) -> Self {
        let flags = self.flags.with(SearchFlag::RegularExpression);
        self.with_flags(flags)
    }

    /// The raw query text as given.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn flags(&self) -> SearchFlags {
        self.flags
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Checks that every term compiles under this query's flags.
    pub fn validate(&self) -> Result<()> {
        Evaluator::new(&self.query, self.flags).prepare()
    }

    /// Tests a single record.
    pub fn is_match<R: Record + ?Sized>(&self, record: &R) -> Result<bool> {
        Evaluator::new(&self.query, self.flags).evaluate(record)
    }
}

/// Runs a [`SearchQuery`] over a record collection.
///
/// The searcher only reads the records. The caller must not mutate the
/// collection while a search is running; nothing here locks it.
///
/// # Example
///
/// ```
/// use bibseek::{DatabaseSearcher, Entry, SearchQuery};
///
/// let library = vec![
///     Entry::new().with_citation_key("a").with_field("author", "Test"),
///     Entry::new().with_citation_key("b").with_field("author", "User"),
/// ];
///
/// let query = SearchQuery::new("author=test");
/// let matches = DatabaseSearcher::new(&query, &library).matches();
/// assert_eq!(matches, vec![&library[0]]);
/// ```
#[derive(Debug)]
pub struct DatabaseSearcher<'q, 'a, R> {
    query: &'q SearchQuery,
    records: &'a [R],
}

impl<'q, 'a, R: Record> DatabaseSearcher<'q, 'a, R> {
    pub fn new(query: &'q SearchQuery, records: &'a [R]) -> Self {
        DatabaseSearcher { query, records }
    }

    /// Returns every matching record in collection order.
    ///
    /// Returns an empty list if the query cannot be evaluated.
    pub fn matches(&self) -> Vec<&'a R> {
        match self.try_matches() {
            Ok(matches) => matches,
            Err(e) => {
                warn!(query = %self.query.text(), error = %e, "search failed, returning no matches");
                Vec::new()
            }
        }
    }

    /// Returns every matching record in collection order, or the error
    /// that made the query unsatisfiable.
    pub fn try_matches(&self) -> Result<Vec<&'a R>> {
        let mut evaluator = self.evaluator()?;
        let mut matches = Vec::new();

        for record in self.records {
            if evaluator.evaluate(record)? {
                matches.push(record);
            }
        }

        debug!(
            query = %self.query.query(),
            flags = %self.query.flags(),
            scanned = self.records.len(),
            matched = matches.len(),
            "search finished"
        );
        Ok(matches)
    }

    /// Counts the matching records. Zero if the query cannot be evaluated.
    pub fn count(&self) -> usize {
        self.matches().len()
    }

    /// Returns the first matching record, if any.
    pub fn first(&self) -> Option<&'a R> {
        let mut evaluator = self.evaluator().ok()?;
        self.records
            .iter()
            .find(|record| evaluator.evaluate(*record).unwrap_or(false))
    }

    fn evaluator(&self) -> Result<Evaluator<'q>> {
        let mut evaluator = Evaluator::new(self.query.query(), self.query.flags());
        evaluator.prepare()?;
        Ok(evaluator)
    }
}

/// Searches `records` for `query` under `flags`.
///
/// Convenience wrapper over [`SearchQuery`] and [`DatabaseSearcher`];
/// returns no matches if the query cannot be evaluated.
///
/// ```
/// use bibseek::{search, Entry, SearchFlags};
///
/// let library = vec![Entry::new().with_field("title", "192? title.")];
/// assert_eq!(search("title", SearchFlags::empty(), &library).len(), 1);
/// assert!(search("", SearchFlags::empty(), &library).is_empty());
/// ```
pub fn search<'a, R: Record>(query: &str, flags: SearchFlags, records: &'a [R]) -> Vec<&'a R> {
    let query = SearchQuery::new(query).with_flags(flags);
    DatabaseSearcher::new(&query, records).matches()
}
