//! Bibseek - query language and search over bibliographic records.
//!
//! Bibseek parses a small user-facing query language and evaluates it
//! against in-memory record collections. It supports:
//!
//! - Free-text terms matched against every field value of a record
//! - Field-qualified terms (`author=Knuth`) matched against one field
//! - Conjunction with the lowercase `and` keyword
//! - Two independent modes: case sensitivity and regular expressions
//!
//! # Quick Start
//!
//! ```rust
//! use bibseek::{search, Entry, SearchFlag, SearchFlags};
//!
//! let library = vec![
//!     Entry::new()
//!         .with_citation_key("Knuth1984")
//!         .with_field("author", "Donald Knuth")
//!         .with_field("title", "Literate Programming"),
//!     Entry::new()
//!         .with_citation_key("Dijkstra1968")
//!         .with_field("author", "Edsger Dijkstra")
//!         .with_field("title", "Go To Statement Considered Harmful"),
//! ];
//!
//! let hits = search("author=knuth and programming", SearchFlags::empty(), &library);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].field("author"), Some("Donald Knuth"));
//!
//! let hits = search("knuth", SearchFlag::CaseSensitive.into(), &library);
//! assert!(hits.is_empty());
//! ```
//!
//! # Query Semantics
//!
//! ```text
//! "Test"                        free text, any field contains "test"
//! "author=Test"                 the author field contains "test"
//! "author=Test and title=Case"  both conditions hold
//! ```
//!
//! - Without `CaseSensitive`, both sides are case-folded before comparing.
//! - With `RegularExpression`, term values are patterns and match if they
//!   are *found* anywhere in the field value.
//! - An empty query matches nothing.
//! - An invalid pattern makes the whole search return no matches.
//!
//! # Records
//!
//! Anything implementing [`Record`] can be searched. [`Entry`] is a
//! map-backed record; with the `derive` feature, plain structs can derive
//! `Record`:
//!
//! ```ignore
//! use bibseek::Record;
//!
//! #[derive(Record)]
//! struct Paper {
//!     #[record(citation_key)]
//!     key: String,
//!     title: String,
//!     #[record(rename = "journaltitle")]
//!     journal: Option<String>,
//! }
//! ```

mod error;
mod evaluator;
mod flags;
mod matcher;
mod parser;
mod query;
mod record;
mod searcher;

// Re-export public API
pub use error::{Result, SearchError};
pub use evaluator::{evaluate, Evaluator, PatternCache};
pub use flags::{SearchFlag, SearchFlags};
pub use matcher::{matches, TermMatcher};
pub use parser::parse;
pub use query::{Query, Term};
pub use record::{Entry, FieldName, FieldText, Record};
pub use searcher::{search, DatabaseSearcher, SearchQuery};

#[cfg(feature = "derive")]
pub use bibseek_macros::Record;
