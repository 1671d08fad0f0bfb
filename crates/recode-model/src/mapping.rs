use indexmap::IndexMap;
use serde::Serialize;

use crate::cell::{CellValue, format_number};

/// Substitution table for a single column: raw value to replacement.
///
/// Iteration follows first insertion. When the same raw value is inserted
/// twice it keeps its original position and takes the later replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MappingDict {
    entries: IndexMap<String, String>,
}

impl MappingDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries = IndexMap::new();
        for (value, key) in pairs {
            entries.insert(value.into(), key.into());
        }
        Self { entries }
    }

    pub fn get(&self, value: &str) -> Option<&str> {
        self.entries.get(value).map(String::as_str)
    }

    /// Looks up a cell by its lookup key. Empty cells never match.
    pub fn lookup(&self, cell: &CellValue) -> Option<&str> {
        match cell {
            CellValue::Text(value) => self.get(value),
            CellValue::Number(value) => self.get(&format_number(*value)),
            CellValue::Empty => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MappingDict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Column name to [`MappingDict`], fixed once built.
///
/// A column with an empty dictionary still participates in mapping: it just
/// has nothing to rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MappingSet {
    dicts: IndexMap<String, MappingDict>,
}

impl MappingSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Exact, case-sensitive match on the column name.
    pub fn get(&self, column: &str) -> Option<&MappingDict> {
        self.dicts.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.dicts.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.dicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dicts.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.dicts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingDict)> {
        self.dicts.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, MappingDict)> for MappingSet {
    fn from_iter<I: IntoIterator<Item = (K, MappingDict)>>(iter: I) -> Self {
        Self {
            dicts: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
