//! Declarative scale definitions.
//!
//! A definition is pure data: sections of typed fields, visibility
//! predicates, validation rules, and option weights. Definitions are
//! immutable once loaded and versioned so captured answers are never
//! reinterpreted under a different revision.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use neuriq_core::answer::OptionValue;

use crate::error::DefinitionError;

/// What kind of input a field takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    /// Display-only text. Never answered, validated, or scored.
    Info,
    Choice,
    MultiSelect,
    Number,
    Text,
    Date,
    /// Container for nested fields. Carries no value of its own.
    Group,
}

/// A selectable option on a choice or multiselect field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldOption {
    pub label: String,
    pub value: OptionValue,
    /// Mutually exclusive with every other selection on the same field.
    #[serde(default)]
    pub exclusion: bool,
}

/// Per-field validation rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationRules {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// A single visibility predicate.
///
/// A field's `visible_if` list is a conjunction. Comparators are explicit
/// variants; definitions name the operator rather than encoding it in a
/// value string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "op", rename_all = "snake_case")]
#[ts(export)]
pub enum Condition {
    /// The referenced answer equals the value.
    Equals { field: String, value: OptionValue },
    /// The referenced multiselect answer contains the value.
    Contains { field: String, value: OptionValue },
    /// The referenced numeric answer is strictly below the bound.
    LessThan { field: String, value: f64 },
    /// The referenced numeric answer is at or above the bound.
    AtLeast { field: String, value: f64 },
}

impl Condition {
    /// Id of the field this predicate reads.
    pub fn field(&self) -> &str {
        match self {
            Condition::Equals { field, .. }
            | Condition::Contains { field, .. }
            | Condition::LessThan { field, .. }
            | Condition::AtLeast { field, .. } => field,
        }
    }
}

/// A form field, possibly a group with nested children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Field {
    pub id: String,
    pub kind: FieldKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    /// Conjunction of predicates; empty means always visible.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visible_if: Vec<Condition>,
    /// Nested fields, groups only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Field>,
}

/// An ordered group of fields scored as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<Field>,
}

/// A complete assessment scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormDefinition {
    pub id: String,
    pub title: String,
    /// Definition revision. Answer stores are captured against exactly one
    /// revision.
    pub version: String,
    pub sections: Vec<Section>,
}

impl FormDefinition {
    /// Parse a definition from JSON and validate its structure.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let definition: FormDefinition = serde_json::from_str(json)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Structural validation.
    ///
    /// Field ids must be unique across the whole definition. A condition
    /// may only reference a field declared earlier in its own section, so
    /// forward, cross-section, unknown and self references (which covers
    /// cycles) are all rejected here rather than surfacing at evaluation
    /// time.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        let mut all_ids: HashSet<&str> = HashSet::new();
        for section in &self.sections {
            for field in flatten(&section.fields) {
                if !all_ids.insert(&field.id) {
                    return Err(DefinitionError::DuplicateFieldId {
                        field_id: field.id.clone(),
                    });
                }
                check_shape(field)?;
            }
        }

        for section in &self.sections {
            let section_ids: HashSet<&str> =
                flatten(&section.fields).map(|f| f.id.as_str()).collect();
            let mut earlier: HashSet<&str> = HashSet::new();
            for field in flatten(&section.fields) {
                for condition in &field.visible_if {
                    let target = condition.field();
                    if earlier.contains(target) {
                        continue;
                    }
                    if section_ids.contains(target) {
                        return Err(DefinitionError::ForwardReference {
                            field_id: field.id.clone(),
                            target: target.to_string(),
                        });
                    }
                    if all_ids.contains(target) {
                        return Err(DefinitionError::CrossSectionReference {
                            field_id: field.id.clone(),
                            target: target.to_string(),
                        });
                    }
                    return Err(DefinitionError::UnknownReference {
                        field_id: field.id.clone(),
                        target: target.to_string(),
                    });
                }
                earlier.insert(&field.id);
            }
        }
        Ok(())
    }

    /// Every field in declaration order, groups flattened.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|s| flatten(&s.fields))
    }

    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields().find(|f| f.id == field_id)
    }
}

fn check_shape(field: &Field) -> Result<(), DefinitionError> {
    let selectable = matches!(field.kind, FieldKind::Choice | FieldKind::MultiSelect);
    if selectable && field.options.is_empty() {
        return Err(DefinitionError::MissingOptions {
            field_id: field.id.clone(),
        });
    }
    if field.kind != FieldKind::Group && !field.children.is_empty() {
        return Err(DefinitionError::ChildrenOutsideGroup {
            field_id: field.id.clone(),
        });
    }
    if let Some(rules) = field.validation
        && let (Some(min), Some(max)) = (rules.min, rules.max)
        && min > max
    {
        return Err(DefinitionError::InvalidBounds {
            field_id: field.id.clone(),
            min,
            max,
        });
    }
    Ok(())
}

/// Depth-first walk in declaration order, each group before its children.
fn flatten(fields: &[Field]) -> impl Iterator<Item = &Field> {
    let mut out = Vec::new();
    collect(fields, &mut out);
    out.into_iter()
}

fn collect<'a>(fields: &'a [Field], out: &mut Vec<&'a Field>) {
    for field in fields {
        out.push(field);
        collect(&field.children, out);
    }
}
