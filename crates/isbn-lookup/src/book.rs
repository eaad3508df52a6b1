use serde::Serialize;
use serde_json::{Map, Value};

/// A book document as returned by Open Library.
///
/// The document is kept as is, the accessors only offer a read-only view of the fields used
/// when displaying a book. Some editions keep their publishing information in a nested
/// `details` object, the accessors fall back to it when the top level field is missing.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Book(Map<String, Value>);

/// An author reference from a [`Book`].
///
/// Open Library usually only includes the `key` of the author (`/authors/OL1A`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Author<'a> {
    /// The display name of the author, when included.
    pub name: Option<&'a str>,
    /// The Open Library key of the author.
    pub key: Option<&'a str>,
}

impl Book {
    pub(crate) const fn new(document: Map<String, Value>) -> Self {
        Self(document)
    }

    /// The raw Open Library document.
    #[must_use]
    pub const fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the [`Book`] returning the raw Open Library document.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// The title of the book.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// The authors of the book, entries with neither a name or key are skipped.
    #[must_use]
    pub fn authors(&self) -> Vec<Author<'_>> {
        self.0
            .get("authors")
            .and_then(Value::as_array)
            .map(|authors| {
                authors
                    .iter()
                    .map(|a| Author {
                        name: a.get("name").and_then(Value::as_str),
                        key: a.get("key").and_then(Value::as_str),
                    })
                    .filter(|a| a.name.is_some() || a.key.is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The publish date as written by Open Library, e.g. "2004" or "June 2009".
    #[must_use]
    pub fn publish_date(&self) -> Option<&str> {
        self.field("publish_date").and_then(Value::as_str)
    }

    /// The number of pages, Open Library stores this as a number but some older records use a
    /// string.
    #[must_use]
    pub fn number_of_pages(&self) -> Option<String> {
        match self.field("number_of_pages")? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// The publishers of the book.
    #[must_use]
    pub fn publishers(&self) -> Vec<&str> {
        self.field("publishers")
            .and_then(Value::as_array)
            .map(|p| p.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name).or_else(|| {
            self.0
                .get("details")
                .and_then(Value::as_object)
                .and_then(|details| details.get(name))
        })
    }
}
