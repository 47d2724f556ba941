// ============================================================
// ROSTER ROW TYPES
// ============================================================
// Schema-less representation of one parsed CSV line

use serde::{Deserialize, Serialize};

use super::VALUE_SEPARATOR;

/// Value of a single field
///
/// A column name that appears once in the header yields `Text`; a repeated
/// column name collects every value into `List`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// All values joined with `separator`
    pub fn joined(&self, separator: &str) -> String {
        match self {
            FieldValue::Text(value) => value.clone(),
            FieldValue::List(values) => values.join(separator),
        }
    }

    /// Borrow the raw values in order
    pub fn parts(&self) -> Vec<&str> {
        match self {
            FieldValue::Text(value) => vec![value.as_str()],
            FieldValue::List(values) => values.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldValue::List(_))
    }

    /// Add another value, promoting `Text` to `List`
    pub fn push(&mut self, value: String) {
        match self {
            FieldValue::Text(existing) => {
                let first = std::mem::take(existing);
                *self = FieldValue::List(vec![first, value]);
            }
            FieldValue::List(values) => values.push(value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// A single row of the roster
///
/// Fields keep their column order, so every scan over the row is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    /// 1-based line of the record in the source file
    pub line: usize,

    fields: Vec<(String, FieldValue)>,
}

impl Row {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            fields: Vec::new(),
        }
    }

    /// Build a row from `(name, value)` pairs, collecting repeated names
    pub fn with_fields<I, K, V>(line: usize, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new(line);
        for (name, value) in fields {
            row.append(name, value);
        }
        row
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Field value as a single string; list values are joined with `/`,
    /// absent fields read as empty
    pub fn text(&self, name: &str) -> String {
        self.get(name)
            .map(|value| value.joined(VALUE_SEPARATOR))
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Replace the value of `name`, or append it as the last column
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Add a value under `name`, turning a repeated name into a list
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => existing.push(value),
            None => self.fields.push((name, FieldValue::Text(value))),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let position = self.fields.iter().position(|(field, _)| field == name)?;
        Some(self.fields.remove(position).1)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Fields whose name satisfies `predicate`, in column order
    pub fn fields_matching<'a, P>(
        &'a self,
        predicate: P,
    ) -> impl Iterator<Item = (&'a str, &'a FieldValue)> + 'a
    where
        P: Fn(&str) -> bool + 'a,
    {
        self.fields().filter(move |&(name, _)| predicate(name))
    }

    /// Remove and return the fields whose name satisfies `predicate`
    pub fn take_matching<P>(&mut self, predicate: P) -> Vec<(String, FieldValue)>
    where
        P: Fn(&str) -> bool,
    {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.fields)
            .into_iter()
            .partition(|(name, _)| predicate(name.as_str()));
        self.fields = kept;
        taken
    }

    /// Collapse every list value into a `/`-joined string
    pub fn join_lists(&mut self) {
        for (_, value) in self.fields.iter_mut() {
            if value.is_list() {
                *value = FieldValue::Text(value.joined(VALUE_SEPARATOR));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
