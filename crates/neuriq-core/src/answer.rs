//! Answer values and the per-session answer store.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Value carried by a selectable option.
///
/// Numeric values double as the option's score contribution; text values
/// contribute nothing when a field is scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum OptionValue {
    Number(f64),
    Text(String),
}

impl OptionValue {
    /// Score contribution of this option when selected.
    pub fn score(&self) -> f64 {
        match self {
            OptionValue::Number(n) => *n,
            OptionValue::Text(_) => 0.0,
        }
    }
}

/// A captured answer for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Date(jiff::civil::Date),
    /// Multiselect selections. Unordered for scoring, insertion-stable for
    /// display.
    Selected(Vec<OptionValue>),
}

impl AnswerValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Scalar equality against an option value (choice, number and text
    /// answers). Multiselect answers never match; use [`contains_option`].
    ///
    /// [`contains_option`]: AnswerValue::contains_option
    pub fn matches_option(&self, value: &OptionValue) -> bool {
        match (self, value) {
            (AnswerValue::Number(a), OptionValue::Number(b)) => a == b,
            (AnswerValue::Text(a), OptionValue::Text(b)) => a == b,
            _ => false,
        }
    }

    /// Whether a multiselect answer includes the option value.
    pub fn contains_option(&self, value: &OptionValue) -> bool {
        match self {
            AnswerValue::Selected(values) => values.contains(value),
            _ => false,
        }
    }
}

/// Ordered field-id to answer mapping.
///
/// Iteration follows insertion order; overwriting an answer keeps its
/// original position. Only the form engine and the dialogue machine write
/// into the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerStore {
    entries: Vec<(String, AnswerValue)>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite an answer. Overwrites keep the entry's position.
    pub fn set(&mut self, field_id: impl Into<String>, value: AnswerValue) {
        let field_id = field_id.into();
        match self.entries.iter_mut().find(|(id, _)| *id == field_id) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((field_id, value)),
        }
    }

    pub fn get(&self, field_id: &str) -> Option<&AnswerValue> {
        self.entries
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, field_id: &str) -> Option<AnswerValue> {
        let index = self.entries.iter().position(|(id, _)| id == field_id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
