//! Epilepsy deep-intake form.
//!
//! The richest built-in definition: conditional detail fields, a
//! multiselect trigger list with a mutually exclusive "none" option, and a
//! perinatal group gated on birth weight below 2500 grams.

use std::sync::LazyLock;

use neuriq_core::answer::OptionValue;

use crate::definition::{
    Condition, Field, FieldKind, FieldOption, FormDefinition, Section, ValidationRules,
};

pub fn definition() -> &'static FormDefinition {
    static DEFINITION: LazyLock<FormDefinition> = LazyLock::new(|| FormDefinition {
        id: "epilepsy_intake".to_string(),
        title: "癫痫专项问询".to_string(),
        version: "1.3".to_string(),
        sections: vec![seizure_section(), trigger_section(), perinatal_section()],
    });
    &DEFINITION
}

fn seizure_section() -> Section {
    Section {
        id: "seizure".to_string(),
        title: "发作情况".to_string(),
        description: Some("以下信息帮助医生判断发作类型，请尽量准确填写".to_string()),
        fields: vec![
            Field {
                id: "seizure_intro".to_string(),
                kind: FieldKind::Info,
                label: "若发作时本人无法回忆，请由目击家属协助填写。".to_string(),
                hint: None,
                options: Vec::new(),
                validation: None,
                visible_if: Vec::new(),
                children: Vec::new(),
            },
            // Option values are selection identity as well as weight, so
            // they stay distinct within a field.
            choice(
                "seizure_type",
                "发作时的主要表现",
                vec![
                    weighted("全身强直阵挛（四肢抽搐、意识丧失）", 8.0),
                    weighted("局部肢体抽动，意识保留", 5.0),
                    weighted("短暂愣神、动作停止", 4.0),
                    weighted("不能确定", 2.0),
                ],
                required(),
            ),
            Field {
                id: "first_seizure_date".to_string(),
                kind: FieldKind::Date,
                label: "首次发作日期".to_string(),
                hint: Some("记不清可留空".to_string()),
                options: Vec::new(),
                validation: None,
                visible_if: Vec::new(),
                children: Vec::new(),
            },
            Field {
                id: "monthly_count".to_string(),
                kind: FieldKind::Number,
                label: "近三个月平均每月发作次数".to_string(),
                hint: Some("次".to_string()),
                options: Vec::new(),
                validation: Some(ValidationRules {
                    required: true,
                    min: Some(0.0),
                    max: Some(90.0),
                }),
                visible_if: Vec::new(),
                children: Vec::new(),
            },
            choice(
                "has_aura",
                "发作前是否有先兆",
                vec![weighted("有", 2.0), weighted("无", 0.0)],
                required(),
            ),
            Field {
                id: "aura_detail".to_string(),
                kind: FieldKind::Text,
                label: "先兆的具体表现".to_string(),
                hint: Some("如心慌、胃气上涌、幻嗅等".to_string()),
                options: Vec::new(),
                validation: Some(required()),
                visible_if: vec![Condition::Equals {
                    field: "has_aura".to_string(),
                    value: OptionValue::Number(2.0),
                }],
                children: Vec::new(),
            },
            choice(
                "seizure_duration",
                "单次发作一般持续多久",
                vec![
                    weighted("一分钟以内", 2.0),
                    weighted("一到五分钟", 5.0),
                    weighted("超过五分钟", 10.0),
                ],
                required(),
            ),
        ],
    }
}

fn trigger_section() -> Section {
    Section {
        id: "triggers".to_string(),
        title: "诱发因素".to_string(),
        description: None,
        fields: vec![Field {
            id: "trigger_factors".to_string(),
            kind: FieldKind::MultiSelect,
            label: "哪些情况容易诱发发作（可多选）".to_string(),
            hint: None,
            options: vec![
                weighted("熬夜或睡眠不足", 2.0),
                weighted("饮酒", 2.5),
                weighted("闪光刺激", 1.5),
                weighted("情绪激动", 1.0),
                weighted("漏服药物", 3.0),
                FieldOption {
                    label: "无".to_string(),
                    value: OptionValue::Number(0.0),
                    exclusion: true,
                },
            ],
            validation: Some(required()),
            visible_if: Vec::new(),
            children: Vec::new(),
        }],
    }
}

fn perinatal_section() -> Section {
    Section {
        id: "perinatal".to_string(),
        title: "围产期史".to_string(),
        description: Some("围产期异常与部分癫痫类型相关".to_string()),
        fields: vec![
            choice(
                "preterm_birth",
                "是否早产",
                vec![weighted("是", 2.0), weighted("否", 0.0)],
                ValidationRules::default(),
            ),
            Field {
                id: "birth_weight".to_string(),
                kind: FieldKind::Number,
                label: "出生体重（克）".to_string(),
                hint: Some("例如 3200".to_string()),
                options: Vec::new(),
                validation: Some(ValidationRules {
                    required: false,
                    min: Some(500.0),
                    max: Some(6000.0),
                }),
                visible_if: Vec::new(),
                children: Vec::new(),
            },
            Field {
                id: "low_weight_detail".to_string(),
                kind: FieldKind::Group,
                label: "低出生体重相关".to_string(),
                hint: None,
                options: Vec::new(),
                validation: None,
                visible_if: vec![Condition::LessThan {
                    field: "birth_weight".to_string(),
                    value: 2500.0,
                }],
                children: vec![
                    choice(
                        "nicu_stay",
                        "出生后是否入住新生儿监护室",
                        vec![weighted("是", 3.0), weighted("否", 0.0)],
                        ValidationRules::default(),
                    ),
                    Field {
                        id: "low_weight_note".to_string(),
                        kind: FieldKind::Text,
                        label: "低体重的可能原因".to_string(),
                        hint: Some("如早产、双胎等".to_string()),
                        options: Vec::new(),
                        validation: None,
                        visible_if: Vec::new(),
                        children: Vec::new(),
                    },
                ],
            },
            choice(
                "febrile_history",
                "幼年是否有热性惊厥史",
                vec![weighted("有", 3.0), weighted("无", 0.0), weighted("不详", 1.0)],
                ValidationRules::default(),
            ),
        ],
    }
}

fn choice(id: &str, label: &str, options: Vec<FieldOption>, rules: ValidationRules) -> Field {
    Field {
        id: id.to_string(),
        kind: FieldKind::Choice,
        label: label.to_string(),
        hint: None,
        options,
        validation: Some(rules),
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

fn required() -> ValidationRules {
    ValidationRules {
        required: true,
        min: None,
        max: None,
    }
}
