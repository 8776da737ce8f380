//! HIT-6 headache impact scale.
//!
//! Six frequency items with the published weights 6/8/10/11/13, totals
//! 36..=78. Sixty and above marks severe impact, which lands in the same
//! band as the engine's high-risk threshold.

use std::sync::LazyLock;

use neuriq_core::answer::OptionValue;

use crate::definition::{Field, FieldKind, FieldOption, FormDefinition, Section, ValidationRules};

pub fn definition() -> &'static FormDefinition {
    static DEFINITION: LazyLock<FormDefinition> = LazyLock::new(|| FormDefinition {
        id: "headache_hit6".to_string(),
        title: "头痛影响测评".to_string(),
        version: "1.1".to_string(),
        sections: vec![Section {
            id: "impact".to_string(),
            title: "头痛影响".to_string(),
            description: Some("请根据最近四周的实际情况作答".to_string()),
            fields: vec![
                item("hit6_pain_severe", "头痛发作时，疼痛剧烈的情况有多常见？"),
                item(
                    "hit6_limit_daily",
                    "头痛妨碍您进行日常活动（家务、工作、学习或社交）的情况有多常见？",
                ),
                item("hit6_wish_lie_down", "头痛发作时，您想躺下休息的情况有多常见？"),
                item(
                    "hit6_too_tired",
                    "因为头痛而感到过度疲劳、无法工作或活动的情况有多常见？",
                ),
                item("hit6_fed_up", "因为头痛而感到厌烦或恼怒的情况有多常见？"),
                item(
                    "hit6_limit_focus",
                    "头痛影响您集中注意力工作或处理日常事务的情况有多常见？",
                ),
            ],
        }],
    });
    &DEFINITION
}

fn item(id: &str, label: &str) -> Field {
    Field {
        id: id.to_string(),
        kind: FieldKind::Choice,
        label: label.to_string(),
        hint: None,
        options: vec![
            weighted("从不", 6.0),
            weighted("很少", 8.0),
            weighted("有时", 10.0),
            weighted("经常", 11.0),
            weighted("总是", 13.0),
        ],
        validation: Some(ValidationRules {
            required: true,
            min: None,
            max: None,
        }),
        visible_if: Vec::new(),
        children: Vec::new(),
    }
}

fn weighted(label: &str, weight: f64) -> FieldOption {
    FieldOption {
        label: label.to_string(),
        value: OptionValue::Number(weight),
        exclusion: false,
    }
}
