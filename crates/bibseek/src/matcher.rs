//! Term matching.
//!
//! A [`TermMatcher`] decides whether one candidate string satisfies one term
//! value under a given [`SearchFlags`] set:
//!
//! | Flags | Semantics |
//! |-------|-----------|
//! | none | case-folded substring |
//! | `CaseSensitive` | exact-case substring |
//! | `RegularExpression` | case-insensitive regex *find* (not full match) |
//! | both | case-sensitive regex find |
//!
//! An empty term value never matches anything.

use regex::{Regex, RegexBuilder};

use crate::error::{Result, SearchError};
use crate::flags::SearchFlags;

/// A term value compiled for repeated matching.
///
/// Compiling folds the needle or builds the regex once, so matching many
/// candidates only pays for the comparison.
///
/// # Example
///
/// ```
/// use bibseek::{SearchFlag, SearchFlags, TermMatcher};
///
/// let literal = TermMatcher::compile("test", SearchFlags::empty()).unwrap();
/// assert!(literal.is_match("A TeSt case"));
///
/// let pattern = TermMatcher::compile(r"\bCase\b", SearchFlag::RegularExpression | SearchFlag::CaseSensitive).unwrap();
/// assert!(pattern.is_match("Test Case"));
/// assert!(!pattern.is_match("Test case"));
/// ```
#[derive(Debug, Clone)]
pub enum TermMatcher {
    /// Substring containment; the needle is already folded when
    /// `case_sensitive` is false.
    Literal { needle: String, case_sensitive: bool },
    /// Compiled regular expression.
    Pattern(Regex),
    /// Matches nothing.
    Never,
}

impl TermMatcher {
    /// Compiles a term value under the given flags.
    ///
    /// Returns [`SearchError::InvalidPattern`] if regex mode is on and the
    /// value is not a valid regular expression.
    pub fn compile(value: &str, flags: SearchFlags) -> Result<Self> {
        if value.is_empty() {
            return Ok(TermMatcher::Never);
        }

        if flags.is_regular_expression() {
            let regex = RegexBuilder::new(value)
                .case_insensitive(!flags.is_case_sensitive())
                .build()
                .map_err(|e| SearchError::invalid_pattern(value, e))?;
            return Ok(TermMatcher::Pattern(regex));
        }

        let case_sensitive = flags.is_case_sensitive();
        let needle = if case_sensitive {
            value.to_string()
        } else {
            fold(value)
        };

        Ok(TermMatcher::Literal {
            needle,
            case_sensitive,
        })
    }

    /// Tests whether `candidate` satisfies this term.
    pub fn is_match(&self, candidate: &str) -> bool {
        match self {
            TermMatcher::Literal {
                needle,
                case_sensitive: true,
            } => candidate.contains(needle.as_str()),
            TermMatcher::Literal {
                needle,
                case_sensitive: false,
            } => fold(candidate).contains(needle.as_str()),
            TermMatcher::Pattern(regex) => regex.is_match(candidate),
            TermMatcher::Never => false,
        }
    }
}

fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// One-shot match of a candidate against a term value.
///
/// Compiles the value on every call; use [`TermMatcher`] when matching
/// the same value against many candidates.
///
/// ```
/// use bibseek::{matches, SearchFlag, SearchFlags};
///
/// assert!(matches("192? title.", "[/9]", SearchFlag::RegularExpression.into()).unwrap());
/// assert!(!matches("Test", "TesT", SearchFlag::CaseSensitive.into()).unwrap());
/// assert!(matches("Test", "TesT", SearchFlags::empty()).unwrap());
/// ```
pub fn matches(candidate: &str, pattern: &str, flags: SearchFlags) -> Result<bool> {
    Ok(TermMatcher::compile(pattern, flags)?.is_match(candidate))
}
