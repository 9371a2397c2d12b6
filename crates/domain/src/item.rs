//! Stored-item representation
//!
//! Records persist as items: maps from attribute names to typed attribute
//! values. The type tags mirror the single-letter convention of key-value
//! document stores, so serialized items read as `{"Subject": {"S": "hi"}}`
//! and stay portable across backends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A stored item: attribute names mapped to typed values
pub type Item = BTreeMap<String, AttrValue>;

/// A single typed attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttrValue {
    /// Scalar string
    S(String),
    /// Number, carried as its decimal string to avoid precision loss
    N(String),
    /// Boolean flag
    Bool(bool),
    /// Set of strings; insertion order is preserved
    Ss(Vec<String>),
    /// List of nested values
    L(Vec<AttrValue>),
    /// Map of nested values
    M(BTreeMap<String, AttrValue>),
}

impl AttrValue {
    /// Build a string value
    pub fn s(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    /// Build a string set from any iterator of strings
    pub fn ss<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::Ss(values.into_iter().map(Into::into).collect())
    }

    /// View as a string, if this is an `S` value
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// View as a number string, if this is an `N` value
    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            _ => None,
        }
    }

    /// View as a boolean, if this is a `Bool` value
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// View as a string set, if this is an `Ss` value
    pub fn as_ss(&self) -> Option<&[String]> {
        match self {
            Self::Ss(values) => Some(values),
            _ => None,
        }
    }

    /// View as a list, if this is an `L` value
    pub fn as_l(&self) -> Option<&[AttrValue]> {
        match self {
            Self::L(values) => Some(values),
            _ => None,
        }
    }

    /// View as a map, if this is an `M` value
    pub const fn as_m(&self) -> Option<&BTreeMap<String, AttrValue>> {
        match self {
            Self::M(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::S(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::S(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
