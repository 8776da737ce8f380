use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Structural fault in a scale definition.
///
/// All of these are load-time errors. A definition that passes validation
/// never produces a reference error while being evaluated.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to parse definition: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate field id '{field_id}'")]
    DuplicateFieldId { field_id: String },

    #[error("field '{field_id}' condition references '{target}' which appears later in the same section")]
    ForwardReference { field_id: String, target: String },

    #[error("field '{field_id}' condition references '{target}' in another section")]
    CrossSectionReference { field_id: String, target: String },

    #[error("field '{field_id}' condition references unknown field '{target}'")]
    UnknownReference { field_id: String, target: String },

    #[error("field '{field_id}' takes a selection but defines no options")]
    MissingOptions { field_id: String },

    #[error("field '{field_id}' has child fields but is not a group")]
    ChildrenOutsideGroup { field_id: String },

    #[error("field '{field_id}' has min {min} above max {max}")]
    InvalidBounds { field_id: String, min: f64, max: f64 },
}

/// Why an answer failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FailureKind {
    Required,
    OutOfRange,
    TypeMismatch,
    InvalidSelection,
}

/// A single validation failure, surfaced to the patient next to the field.
///
/// Invalid input is reported through these; it never aborts evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[error("{field_id}: {message}")]
#[ts(export)]
pub struct ValidationFailure {
    pub field_id: String,
    pub kind: FailureKind,
    /// Patient-facing message, in product language.
    pub message: String,
}

impl ValidationFailure {
    pub fn required(field_id: &str, label: &str) -> Self {
        ValidationFailure {
            field_id: field_id.to_string(),
            kind: FailureKind::Required,
            message: format!("{label}为必填项"),
        }
    }

    pub fn out_of_range(field_id: &str, label: &str, min: Option<f64>, max: Option<f64>) -> Self {
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("{label}应在{min}到{max}之间"),
            (Some(min), None) => format!("{label}不应小于{min}"),
            (None, Some(max)) => format!("{label}不应大于{max}"),
            (None, None) => format!("{label}超出范围"),
        };
        ValidationFailure {
            field_id: field_id.to_string(),
            kind: FailureKind::OutOfRange,
            message,
        }
    }

    pub fn type_mismatch(field_id: &str, label: &str, expected: &str) -> Self {
        ValidationFailure {
            field_id: field_id.to_string(),
            kind: FailureKind::TypeMismatch,
            message: format!("{label}需填写{expected}"),
        }
    }

    pub fn invalid_selection(field_id: &str, label: &str) -> Self {
        ValidationFailure {
            field_id: field_id.to_string(),
            kind: FailureKind::InvalidSelection,
            message: format!("{label}的选择无效"),
        }
    }
}
