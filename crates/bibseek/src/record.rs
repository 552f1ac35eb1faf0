//! The record capability and a map-backed record.
//!
//! The search core never looks at a concrete record layout. Anything that
//! implements [`Record`] can be searched: the map-backed [`Entry`] shipped
//! here, or any struct deriving `Record` with the `derive` feature.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Read-only access to the fields of one bibliographic record.
///
/// # Manual Implementation
///
/// ```
/// use bibseek::Record;
///
/// struct Paper {
///     key: String,
///     title: String,
///     year: String,
/// }
///
/// impl Record for Paper {
///     fn field_value(&self, name: &str) -> Option<&str> {
///         if name.eq_ignore_ascii_case("title") {
///             Some(self.title.as_str())
///         } else if name.eq_ignore_ascii_case("year") {
///             Some(self.year.as_str())
///         } else {
///             None
///         }
///     }
///
///     fn all_values(&self) -> Box<dyn Iterator<Item = &str> + '_> {
///         Box::new([self.title.as_str(), self.year.as_str()].into_iter())
///     }
///
///     fn citation_key(&self) -> Option<&str> {
///         Some(self.key.as_str())
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of the named field, or `None` if the record does
    /// not carry it.
    ///
    /// Field names are matched case-insensitively.
    fn field_value(&self, name: &str) -> Option<&str>;

    /// Returns every field value of the record. Used by free-text terms.
    fn all_values(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Returns the citation key, if the record has one.
    fn citation_key(&self) -> Option<&str> {
        None
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field_value(&self, name: &str) -> Option<&str> {
        (**self).field_value(name)
    }

    fn all_values(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        (**self).all_values()
    }

    fn citation_key(&self) -> Option<&str> {
        (**self).citation_key()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field_value(&self, name: &str) -> Option<&str> {
        (**self).field_value(name)
    }

    fn all_values(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        (**self).all_values()
    }

    fn citation_key(&self) -> Option<&str> {
        (**self).citation_key()
    }
}

/// Conversion of a struct member into optional field text.
///
/// This is what `#[derive(Record)]` calls on every field, so any member
/// type implementing it can be part of a derived record.
pub trait FieldText {
    /// Returns the text of this field, or `None` when the field is unset.
    fn field_text(&self) -> Option<&str>;
}

impl FieldText for String {
    fn field_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl FieldText for &str {
    fn field_text(&self) -> Option<&str> {
        Some(*self)
    }
}

impl FieldText for Box<str> {
    fn field_text(&self) -> Option<&str> {
        Some(&**self)
    }
}

impl FieldText for std::borrow::Cow<'_, str> {
    fn field_text(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

impl<T: FieldText> FieldText for Option<T> {
    fn field_text(&self) -> Option<&str> {
        self.as_ref().and_then(FieldText::field_text)
    }
}

/// A field name with case-insensitive identity.
///
/// Names are normalised to lowercase on construction, so `Author`,
/// `AUTHOR` and `author` are the same field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl AsRef<str>) -> Self {
        FieldName(name.as_ref().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `other` names this field, ignoring case.
    pub fn matches(&self, other: &str) -> bool {
        self.0 == other.to_lowercase()
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        FieldName::new(name)
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        FieldName::new(name)
    }
}

impl From<FieldName> for String {
    fn from(name: FieldName) -> Self {
        name.0
    }
}

impl Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A map-backed bibliographic record.
///
/// # Example
///
/// ```
/// use bibseek::{Entry, Record};
///
/// let entry = Entry::new()
///     .with_citation_key("Smith2020")
///     .with_field("Author", "Jane Smith")
///     .with_field("title", "On Searching");
///
/// assert_eq!(entry.field_value("AUTHOR"), Some("Jane Smith"));
/// assert_eq!(entry.citation_key(), Some("Smith2020"));
/// assert_eq!(entry.all_values().count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    citation_key: Option<String>,
    #[serde(default)]
    fields: BTreeMap<FieldName, String>,
}

impl Entry {
    pub fn new() -> Self {
        Entry::default()
    }

    pub fn with_citation_key(mut self, key: impl Into<String>) -> Self {
        self.citation_key = Some(key.into());
        self
    }

    pub fn with_field(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_field(name, value);
        self
    }

    pub fn set_citation_key(&mut self, key: Option<String>) {
        self.citation_key = key;
    }

    /// Sets a field, returning the previous value if there was one.
    pub fn set_field(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(FieldName::new(name), value.into())
    }

    /// Removes a field, returning its value if it was present.
    pub fn clear_field(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name.to_lowercase().as_str())
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name.to_lowercase().as_str()).map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs in field-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldName, &str)> {
        self.fields.iter().map(|(name, value)| (name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Record for Entry {
    fn field_value(&self, name: &str) -> Option<&str> {
        self.field(name)
    }

    fn all_values(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.fields.values().map(String::as_str))
    }

    fn citation_key(&self) -> Option<&str> {
        self.citation_key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_is_case_insensitive() {
        assert_eq!(FieldName::new("Author"), FieldName::new("AUTHOR"));
        assert_eq!(FieldName::new("Author").as_str(), "author");
        assert!(FieldName::new("title").matches("TiTlE"));
        assert!(!FieldName::new("title").matches("titles"));
    }

    #[test]
    fn entry_lookup_ignores_case() {
        let entry = Entry::new().with_field("JournalTitle", "Nature");
        assert_eq!(entry.field_value("journaltitle"), Some("Nature"));
        assert_eq!(entry.field_value("JOURNALTITLE"), Some("Nature"));
        assert_eq!(entry.field_value("journal"), None);
    }

    #[test]
    fn entry_set_and_clear() {
        let mut entry = Entry::new();
        assert!(entry.is_empty());
        assert_eq!(entry.set_field("year", "2019"), None);
        assert_eq!(entry.set_field("YEAR", "2020"), Some("2019".to_string()));
        assert_eq!(entry.len(), 1);
        assert_eq!(entry.clear_field("Year"), Some("2020".to_string()));
        assert!(entry.is_empty());
    }

    #[test]
    fn entry_citation_key() {
        assert_eq!(Entry::new().citation_key(), None);
        let mut entry = Entry::new().with_citation_key("Knuth1984");
        assert_eq!(entry.citation_key(), Some("Knuth1984"));
        entry.set_citation_key(None);
        assert_eq!(entry.citation_key(), None);
    }

    #[test]
    fn all_values_excludes_names_and_key() {
        let entry = Entry::new()
            .with_citation_key("key")
            .with_field("author", "Test")
            .with_field("title", "Case");
        let values: Vec<&str> = entry.all_values().collect();
        assert_eq!(values, vec!["Test", "Case"]);
    }

    #[test]
    fn borrowed_and_boxed_records() {
        let entry = Entry::new().with_field("author", "Test");
        let borrowed: &Entry = &entry;
        let boxed: Box<dyn Record> = Box::new(entry.clone());

        assert_eq!(Record::field_value(&borrowed, "author"), Some("Test"));
        assert_eq!(boxed.field_value("author"), Some("Test"));
        assert_eq!(boxed.all_values().count(), 1);
    }

    #[test]
    fn field_text_impls() {
        assert_eq!(String::from("a").field_text(), Some("a"));
        assert_eq!(Some(String::from("b")).field_text(), Some("b"));
        assert_eq!(None::<String>.field_text(), None);
        assert_eq!("c".field_text(), Some("c"));
    }

    #[test]
    fn entry_serde_shape() {
        let entry = Entry::new()
            .with_citation_key("Knuth1984")
            .with_field("Author", "Donald Knuth");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "citation_key": "Knuth1984",
                "fields": { "author": "Donald Knuth" }
            })
        );

        let unkeyed: Entry = serde_yaml::from_str("fields:\n  TITLE: Case\n").unwrap();
        assert_eq!(unkeyed.citation_key(), None);
        assert_eq!(unkeyed.field("title"), Some("Case"));
        assert!(!serde_json::to_string(&unkeyed).unwrap().contains("citation_key"));
    }
}
