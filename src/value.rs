//! Generic container types produced by XML conversion

use std::hash::{Hash, Hasher};
use std::ops::Index;

use indexmap::{Equivalent, IndexMap};

use crate::error::{Error, Result};

/// Case-insensitive key equality used for all container lookups.
pub(crate) fn key_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn key_hash<H: Hasher>(key: &str, state: &mut H) {
    for c in key.chars().flat_map(char::to_lowercase) {
        state.write_u32(u32::from(c));
    }
}

/// Container key preserving its first-seen casing while hashing and
/// comparing case-insensitively.
#[derive(Clone, Debug)]
pub(crate) struct Name(String);

impl Name {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn into_string(self) -> String {
        self.0
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        key_eq(&self.0, &other.0)
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        key_hash(&self.0, state);
    }
}

/// Borrowed lookup key hashing the same way as [`Name`].
struct Fold<'a>(&'a str);

impl Hash for Fold<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        key_hash(self.0, state);
    }
}

impl Equivalent<Name> for Fold<'_> {
    fn equivalent(&self, key: &Name) -> bool {
        key_eq(self.0, &key.0)
    }
}

/// A converted XML value
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Element text content or an attribute value
    Text(String),
    /// Ordered sequence of same-named element values
    Sequence(Sequence),
    /// Nested element container
    Container(Container),
}

impl Value {
    /// Returns true if this value is a text string
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns true if this value is a sequence
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Returns true if this value is a container
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    /// Returns the text if this is a text string, None otherwise
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the sequence if this is a sequence, None otherwise
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the container if this is a container, None otherwise
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Self::Container(c) => Some(c),
            _ => None,
        }
    }

    /// Case-insensitive member read.
    ///
    /// Fails with [`Error::MissingMember`] when the key is absent or this
    /// value is not a container.
    pub fn get(&self, key: &str) -> Result<&Self> {
        match self {
            Self::Container(container) => container.get(key),
            _ => Err(Error::MissingMember(key.to_string())),
        }
    }

    /// Case-insensitive membership test; false when this value is not a
    /// container.
    pub fn contains_key(&self, key: &str) -> bool {
        self.as_container().is_some_and(|c| c.contains_key(key))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Sequence> for Value {
    fn from(value: Sequence) -> Self {
        Self::Sequence(value)
    }
}

impl From<Container> for Value {
    fn from(value: Container) -> Self {
        Self::Container(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::Sequence(Sequence(values))
    }
}

impl Index<&str> for Value {
    type Output = Self;

    /// Panicking member read; the failable form is [`Value::get`].
    #[allow(clippy::panic)]
    fn index(&self, key: &str) -> &Self::Output {
        match self.get(key) {
            Ok(value) => value,
            Err(_) => panic!("no such member: '{key}'"),
        }
    }
}

impl Index<usize> for Value {
    type Output = Self;

    /// Panicking positional read into a sequence value.
    #[allow(clippy::panic)]
    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Self::Sequence(sequence) => match sequence.get(index) {
                Some(value) => value,
                None => panic!("sequence index {index} out of bounds"),
            },
            _ => panic!("value is not a sequence"),
        }
    }
}

/// An ordered sequence of converted values
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sequence(pub(crate) Vec<Value>);

impl Sequence {
    /// Creates a new empty sequence
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of elements in the sequence
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the sequence contains no elements
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a reference to the element at the given index.
    ///
    /// Repeated reads at the same index return the same stored value.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Appends an element to the end of the sequence
    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    /// Returns an iterator over the sequence in document order
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }
}

impl Index<usize> for Sequence {
    type Output = Value;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Sequence {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(Vec::from_iter(iter))
    }
}

/// Storage slot: a value of its own, or a key alias sharing another
/// entry's value.
#[derive(Clone, Debug, PartialEq)]
enum Slot {
    Value(Value),
    Alias(String),
}

/// A converted XML element: an ordered, case-insensitive mapping from
/// names to values.
///
/// Insertion order is preserved for iteration and key casing is kept
/// verbatim from the first insertion; lookups accept any casing. Built once
/// per element during conversion and never mutated afterward.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Container {
    entries: IndexMap<Name, Slot>,
}

impl Container {
    /// Creates a new empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys in the container, aliases included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the container has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive read.
    ///
    /// An absent key is an [`Error::MissingMember`] failure, not a default.
    /// Alias keys resolve to the value stored under their target key.
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.entries
            .get(&Fold(key))
            .and_then(|slot| self.resolve(slot))
            .ok_or_else(|| Error::MissingMember(key.to_string()))
    }

    /// Reports whether a case-insensitive key exists, without reading it
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&Fold(key))
    }

    /// Insert a value under `key`.
    ///
    /// Re-inserting an existing key (any casing) replaces the value in
    /// place, keeping the first insertion's casing and position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(Name::new(key), Slot::Value(value.into()));
    }

    /// Insert `alias` as an alternate key for the entry stored at `target`.
    /// Both keys resolve to the same value; no data is duplicated.
    pub(crate) fn insert_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.entries.insert(Name::new(alias), Slot::Alias(target.into()));
    }

    /// Returns an iterator over the keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(Name::as_str)
    }

    /// Returns an iterator over entries in insertion order; alias keys
    /// yield the shared value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter_map(|(name, slot)| self.resolve(slot).map(|value| (name.as_str(), value)))
    }

    fn resolve<'a>(&'a self, slot: &'a Slot) -> Option<&'a Value> {
        match slot {
            Slot::Value(value) => Some(value),
            Slot::Alias(target) => match self.entries.get(&Fold(target)) {
                Some(Slot::Value(value)) => Some(value),
                _ => None,
            },
        }
    }
}

impl Index<&str> for Container {
    type Output = Value;

    /// Panicking member read; the failable form is [`Container::get`].
    #[allow(clippy::panic)]
    fn index(&self, key: &str) -> &Self::Output {
        match self.get(key) {
            Ok(value) => value,
            Err(_) => panic!("no such member: '{key}'"),
        }
    }
}
