//! The form engine.
//!
//! Evaluates a definition against an answer store in one pass: visibility,
//! validation, and scoring. Evaluation is pure; the only mutating entry
//! point is [`toggle_selection`], which enforces exclusion groups at write
//! time.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use neuriq_core::answer::{AnswerStore, AnswerValue, OptionValue};

use crate::definition::{Condition, Field, FieldKind, FormDefinition, ValidationRules};
use crate::error::ValidationFailure;

/// Score contributed by one section's visible fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SectionScore {
    pub section_id: String,
    pub title: String,
    pub score: f64,
}

/// Result of evaluating a definition against an answer store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormEvaluation {
    /// Ids of currently visible fields, in declaration order.
    pub visible_fields: Vec<String>,
    /// Validation failures across visible fields. Hidden fields are exempt.
    pub failures: Vec<ValidationFailure>,
    pub section_scores: Vec<SectionScore>,
    pub total_score: f64,
}

impl FormEvaluation {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn is_visible(&self, field_id: &str) -> bool {
        self.visible_fields.iter().any(|id| id == field_id)
    }
}

/// Evaluate a definition against an answer store.
///
/// Conditions read the raw store, so an answer captured while its field was
/// visible keeps driving visibility after the field itself is hidden.
/// Hidden fields contribute no score and raise no failures; their stored
/// answers are retained for restore-on-reveal.
pub fn evaluate(definition: &FormDefinition, answers: &AnswerStore) -> FormEvaluation {
    let mut visible_fields = Vec::new();
    let mut failures = Vec::new();
    let mut section_scores = Vec::new();
    let mut total_score = 0.0;

    for section in &definition.sections {
        let mut score = 0.0;
        eval_fields(
            &section.fields,
            true,
            answers,
            &mut visible_fields,
            &mut failures,
            &mut score,
        );
        total_score += score;
        section_scores.push(SectionScore {
            section_id: section.id.clone(),
            title: section.title.clone(),
            score,
        });
    }

    debug!(
        definition_id = %definition.id,
        total_score,
        failures = failures.len(),
        "form evaluated"
    );

    FormEvaluation {
        visible_fields,
        failures,
        section_scores,
        total_score,
    }
}

fn eval_fields(
    fields: &[Field],
    parent_visible: bool,
    answers: &AnswerStore,
    visible_fields: &mut Vec<String>,
    failures: &mut Vec<ValidationFailure>,
    score: &mut f64,
) {
    for field in fields {
        let visible = parent_visible && conditions_hold(&field.visible_if, answers);
        if visible {
            visible_fields.push(field.id.clone());
        }
        if field.kind == FieldKind::Group {
            eval_fields(
                &field.children,
                visible,
                answers,
                visible_fields,
                failures,
                score,
            );
            continue;
        }
        if visible {
            validate_field(field, answers.get(&field.id), failures);
            *score += field_score(field, answers.get(&field.id));
        }
    }
}

fn conditions_hold(conditions: &[Condition], answers: &AnswerStore) -> bool {
    conditions.iter().all(|c| condition_holds(c, answers))
}

/// An unanswered referenced field fails every predicate kind.
pub fn condition_holds(condition: &Condition, answers: &AnswerStore) -> bool {
    match condition {
        Condition::Equals { field, value } => answers
            .get(field)
            .is_some_and(|answer| answer.matches_option(value)),
        Condition::Contains { field, value } => answers
            .get(field)
            .is_some_and(|answer| answer.contains_option(value)),
        Condition::LessThan { field, value } => answers
            .get(field)
            .and_then(AnswerValue::as_number)
            .is_some_and(|n| n < *value),
        Condition::AtLeast { field, value } => answers
            .get(field)
            .and_then(AnswerValue::as_number)
            .is_some_and(|n| n >= *value),
    }
}

fn validate_field(
    field: &Field,
    answer: Option<&AnswerValue>,
    failures: &mut Vec<ValidationFailure>,
) {
    if matches!(field.kind, FieldKind::Info | FieldKind::Group) {
        return;
    }
    let rules = field.validation.unwrap_or_default();
    let Some(answer) = answer else {
        if rules.required {
            failures.push(ValidationFailure::required(&field.id, &field.label));
        }
        return;
    };

    // An empty answer counts as missing for the required rule.
    let empty = match answer {
        AnswerValue::Text(text) => text.trim().is_empty(),
        AnswerValue::Selected(values) => values.is_empty(),
        _ => false,
    };
    if empty {
        if rules.required {
            failures.push(ValidationFailure::required(&field.id, &field.label));
        }
        return;
    }

    if field.kind == FieldKind::Number {
        match answer.as_number() {
            Some(n) => check_bounds(field, rules, n, failures),
            None => failures.push(ValidationFailure::type_mismatch(
                &field.id,
                &field.label,
                "数字",
            )),
        }
    }
}

fn check_bounds(
    field: &Field,
    rules: ValidationRules,
    n: f64,
    failures: &mut Vec<ValidationFailure>,
) {
    let below = rules.min.is_some_and(|min| n < min);
    let above = rules.max.is_some_and(|max| n > max);
    if below || above {
        failures.push(ValidationFailure::out_of_range(
            &field.id,
            &field.label,
            rules.min,
            rules.max,
        ));
    }
}

/// Score of one answered field. Only selections carry weight; number, text
/// and date answers score zero. Values not present among the field's
/// options score zero as well.
fn field_score(field: &Field, answer: Option<&AnswerValue>) -> f64 {
    match field.kind {
        FieldKind::Choice => {
            let Some(answer) = answer else { return 0.0 };
            field
                .options
                .iter()
                .find(|option| answer.matches_option(&option.value))
                .map(|option| option.value.score())
                .unwrap_or(0.0)
        }
        FieldKind::MultiSelect => {
            let Some(AnswerValue::Selected(values)) = answer else {
                return 0.0;
            };
            // Iterates options, not selections, so a duplicated selection
            // cannot double count.
            field
                .options
                .iter()
                .filter(|option| values.contains(&option.value))
                .map(|option| option.value.score())
                .sum()
        }
        _ => 0.0,
    }
}

/// Toggle one option on a multiselect field.
///
/// Selecting an option flagged `exclusion` replaces every co-selection;
/// selecting any ordinary option removes a selected exclusion option first.
/// Toggling a selected value removes it.
pub fn toggle_selection(
    field: &Field,
    answers: &mut AnswerStore,
    value: &OptionValue,
) -> Result<(), ValidationFailure> {
    if field.kind != FieldKind::MultiSelect {
        return Err(ValidationFailure::invalid_selection(&field.id, &field.label));
    }
    let Some(option) = field.options.iter().find(|o| &o.value == value) else {
        return Err(ValidationFailure::invalid_selection(&field.id, &field.label));
    };

    let mut selected = match answers.get(&field.id) {
        Some(AnswerValue::Selected(values)) => values.clone(),
        _ => Vec::new(),
    };

    if let Some(position) = selected.iter().position(|v| v == value) {
        selected.remove(position);
    } else if option.exclusion {
        selected = vec![value.clone()];
    } else {
        selected.retain(|v| !is_exclusion(field, v));
        selected.push(value.clone());
    }

    answers.set(field.id.clone(), AnswerValue::Selected(selected));
    Ok(())
}

fn is_exclusion(field: &Field, value: &OptionValue) -> bool {
    field
        .options
        .iter()
        .any(|option| option.exclusion && &option.value == value)
}

/// Render the visible, answered fields as a structured text block for an
/// analysis prompt. Follows the definition's section and field order.
pub fn structured_input(definition: &FormDefinition, answers: &AnswerStore) -> String {
    let evaluation = evaluate(definition, answers);
    let visible: HashSet<&str> = evaluation.visible_fields.iter().map(String::as_str).collect();

    let mut out = format!("## {}（{}）\n", definition.title, definition.version);
    for section in &definition.sections {
        let mut lines = Vec::new();
        render_fields(&section.fields, &visible, answers, &mut lines);
        if lines.is_empty() {
            continue;
        }
        out.push_str(&format!("\n### {}\n", section.title));
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn render_fields(
    fields: &[Field],
    visible: &HashSet<&str>,
    answers: &AnswerStore,
    lines: &mut Vec<String>,
) {
    for field in fields {
        if field.kind == FieldKind::Group {
            render_fields(&field.children, visible, answers, lines);
            continue;
        }
        if matches!(field.kind, FieldKind::Info) || !visible.contains(field.id.as_str()) {
            continue;
        }
        if let Some(answer) = answers.get(&field.id) {
            lines.push(format!("- {}：{}", field.label, render_answer(field, answer)));
        }
    }
}

/// Choice and multiselect answers render as their option labels; anything
/// else renders as the raw value.
fn render_answer(field: &Field, answer: &AnswerValue) -> String {
    let label_of = |value: &OptionValue| -> String {
        field
            .options
            .iter()
            .find(|option| &option.value == value)
            .map(|option| option.label.clone())
            .unwrap_or_else(|| match value {
                OptionValue::Number(n) => n.to_string(),
                OptionValue::Text(text) => text.clone(),
            })
    };
    match answer {
        AnswerValue::Selected(values) => values
            .iter()
            .map(|value| label_of(value))
            .collect::<Vec<_>>()
            .join("、"),
        AnswerValue::Number(n) if field.kind == FieldKind::Choice => {
            label_of(&OptionValue::Number(*n))
        }
        AnswerValue::Text(text) if field.kind == FieldKind::Choice => {
            label_of(&OptionValue::Text(text.clone()))
        }
        AnswerValue::Number(n) => n.to_string(),
        AnswerValue::Text(text) => text.clone(),
        AnswerValue::Date(date) => date.to_string(),
    }
}
