//! Field entries attached to log records

// Standard library
use std::collections::HashMap;

// External dependencies
use serde::Serialize;
use serde_json::Value;

/// A single field entry: a key paired with either a scalar value or a named
/// nested group of further entries.
///
/// This is the typed replacement for loosely structured key/value argument
/// lists: build entries with [`Attr::new`] / [`Attr::group`] or the
/// [`attrs!`](crate::attrs) macro.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    key: String,
    value: AttrValue,
}

/// The value side of an [`Attr`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// An arbitrary structured value
    Scalar(Value),
    /// A nested group of further entries; the group's name is the attr key
    Group(Vec<Attr>),
}

impl Attr {
    /// Create a scalar entry.
    ///
    /// Values that cannot be serialized degrade to JSON `null`; construction
    /// never fails.
    pub fn new(key: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        Self {
            key: key.into(),
            value: AttrValue::Scalar(value),
        }
    }

    /// Create a named group of entries.
    pub fn group(name: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) -> Self {
        Self {
            key: name.into(),
            value: AttrValue::Group(attrs.into_iter().collect()),
        }
    }

    /// The entry's key. A group's name is its key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The entry's value.
    #[must_use]
    pub fn value(&self) -> &AttrValue {
        &self.value
    }
}

/// Merge `new` over `base`, keyed by attr name.
///
/// Entries from `new` replace same-named entries from `base`; duplicates
/// within either sequence collapse to the last occurrence. The result keeps
/// first-seen order, which makes the merge deterministic, but callers must
/// only rely on the resulting key/value set.
pub(crate) fn merge_overwrite(base: &[Attr], new: &[Attr]) -> Vec<Attr> {
    let mut merged: Vec<Attr> = Vec::with_capacity(base.len() + new.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(base.len() + new.len());

    for attr in base.iter().chain(new) {
        match index.get(attr.key()) {
            Some(&slot) => merged[slot] = attr.clone(),
            None => {
                index.insert(attr.key().to_owned(), merged.len());
                merged.push(attr.clone());
            }
        }
    }

    merged
}
