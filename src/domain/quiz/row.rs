// ============================================================
// QUIZ ROW TYPES
// ============================================================
// Header-keyed row maps produced by CSV parsing, plus the value
// cleaning and field lookup rules shared by the whole pipeline

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type FieldMap = HashMap<String, String>;

/// Trim incidental whitespace padding from a cell value.
///
/// Total and side-effect-free; trimming twice is the same as trimming once.
pub fn clean_value(value: &str) -> &str {
    value.trim()
}

/// A single row as parsed from the CSV, values untouched.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    /// Row index (0-based, header row excluded)
    pub index: usize,

    /// Cell values keyed by original header
    pub fields: FieldMap,
}

impl RawRow {
    pub fn new(index: usize, fields: FieldMap) -> Self {
        Self { index, fields }
    }

    /// Exact-key lookup. Base fields and the difficulty column probes are
    /// matched against the header spelling as-is.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Case- and whitespace-tolerant lookup, used for question-block
    /// fields ("Question 2  option 3" resolves to "question 2 option 3").
    pub fn get_tolerant(&self, key: &str) -> Option<&str> {
        let want = normalize_key(key);
        self.fields
            .iter()
            .find(|(k, _)| normalize_key(k) == want)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            0,
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A validated row: every value trimmed, question blocks either complete
/// (all six fields) or absent entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanedRow {
    pub fields: FieldMap,
}

impl CleanedRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    /// Whether the key already carries a non-empty value. Mirrors the
    /// copy-if-unset rule of the validator's passthrough step.
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }
}

/// Rows with a blank or absent `title` are dropped at the dataset level
/// before validation ever runs.
pub fn is_empty_row(row: &RawRow) -> bool {
    row.get("title").map_or(true, str::is_empty)
}

/// Canonical header for question N's text.
pub fn question_key(n: u32) -> String {
    format!("question {}", n)
}

/// Canonical header for option I of question N.
pub fn option_key(n: u32, i: u32) -> String {
    format!("question {} option {}", n, i)
}

/// Canonical header for question N's answer.
pub fn answer_key(n: u32) -> String {
    format!("question {} answer", n)
}

fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
