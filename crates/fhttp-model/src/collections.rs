//! Set-valued fields.
//!
//! Repeated header values come in three shapes: [`ValueSet`] (unordered,
//! deduplicated), plain `Vec` (ordered, duplicates kept, used for
//! `Warning`), and [`HeaderFields`](crate::HeaderFields) (case-insensitive
//! last-write-wins mapping).

use std::collections::HashSet;
use std::hash::Hash;

/// An unordered collection deduplicated by value equality.
///
/// Iteration order is unspecified. Two sets are equal when they hold the
/// same elements, whatever order they were built in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSet<T: Eq + Hash> {
    items: HashSet<T>,
}

impl<T: Eq + Hash> Default for ValueSet<T> {
    fn default() -> Self {
        Self {
            items: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash> ValueSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value. Returns `false` if an equal value was already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.items.insert(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Eq + Hash> FromIterator<T> for ValueSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: Eq + Hash> From<Vec<T>> for ValueSet<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Eq + Hash, const N: usize> From<[T; N]> for ValueSet<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T: Eq + Hash> IntoIterator for &'a ValueSet<T> {
    type Item = &'a T;
    type IntoIter = std::collections::hash_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Eq + Hash> IntoIterator for ValueSet<T> {
    type Item = T;
    type IntoIter = std::collections::hash_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
