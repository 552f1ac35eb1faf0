//! Search modifiers.
//!
//! A [`SearchFlags`] set carries the independent [`SearchFlag`] options of a
//! single search. An empty set means case-insensitive literal substring
//! matching.

use std::fmt;
use std::ops::BitOr;

/// A single search modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchFlag {
    /// Match with exact case instead of folding both sides.
    CaseSensitive,
    /// Treat term values as regular expressions instead of literals.
    RegularExpression,
}

impl SearchFlag {
    /// All flags, in display order.
    pub const ALL: [SearchFlag; 2] = [SearchFlag::CaseSensitive, SearchFlag::RegularExpression];

    fn bit(self) -> u8 {
        match self {
            SearchFlag::CaseSensitive => 0b01,
            SearchFlag::RegularExpression => 0b10,
        }
    }

    /// Returns the display name of this flag.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchFlag::CaseSensitive => "case-sensitive",
            SearchFlag::RegularExpression => "regex",
        }
    }
}

impl fmt::Display for SearchFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An unordered set of [`SearchFlag`]s.
///
/// # Example
///
/// ```
/// use bibseek::{SearchFlag, SearchFlags};
///
/// let flags = SearchFlag::CaseSensitive | SearchFlag::RegularExpression;
/// assert!(flags.is_case_sensitive());
/// assert!(flags.is_regular_expression());
/// assert!(SearchFlags::empty().is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SearchFlags(u8);

impl SearchFlags {
    /// The empty set: case-insensitive literal matching.
    pub const fn empty() -> Self {
        SearchFlags(0)
    }

    /// Returns `true` if no flag is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, flag: SearchFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn insert(&mut self, flag: SearchFlag) {
        self.0 |= flag.bit();
    }

    pub fn remove(&mut self, flag: SearchFlag) {
        self.0 &= !flag.bit();
    }

    /// Returns a copy of this set with `flag` added.
    pub fn with(mut self, flag: SearchFlag) -> Self {
        self.insert(flag);
        self
    }

    /// Returns a copy of this set with `flag` set or cleared.
    pub fn set(mut self, flag: SearchFlag, enabled: bool) -> Self {
        if enabled {
            self.insert(flag);
        } else {
            self.remove(flag);
        }
        self
    }

    pub fn is_case_sensitive(self) -> bool {
        self.contains(SearchFlag::CaseSensitive)
    }

    pub fn is_regular_expression(self) -> bool {
        self.contains(SearchFlag::RegularExpression)
    }

    /// Iterates over the flags present in this set.
    pub fn iter(self) -> impl Iterator<Item = SearchFlag> {
        SearchFlag::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl From<SearchFlag> for SearchFlags {
    fn from(flag: SearchFlag) -> Self {
        SearchFlags::empty().with(flag)
    }
}

impl FromIterator<SearchFlag> for SearchFlags {
    fn from_iter<I: IntoIterator<Item = SearchFlag>>(iter: I) -> Self {
        iter.into_iter().fold(SearchFlags::empty(), SearchFlags::with)
    }
}

impl BitOr for SearchFlags {
    type Output = SearchFlags;

    fn bitor(self, rhs: SearchFlags) -> SearchFlags {
        SearchFlags(self.0 | rhs.0)
    }
}

impl BitOr<SearchFlag> for SearchFlags {
    type Output = SearchFlags;

    fn bitor(self, rhs: SearchFlag) -> SearchFlags {
        self.with(rhs)
    }
}

impl BitOr for SearchFlag {
    type Output = SearchFlags;

    fn bitor(self, rhs: SearchFlag) -> SearchFlags {
        SearchFlags::from(self).with(rhs)
    }
}

impl fmt::Display for SearchFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, flag) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", flag)?;
        }
        write!(f, "]")
    }
}
