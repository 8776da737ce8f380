//! AD8 informant-based cognitive screen.
//!
//! Eight change items, one point per "有变化" answer and half a point for
//! "无法判断". Two or more points suggests cognitive impairment and
//! warrants full assessment.

use std::sync::LazyLock;

use neuriq_core::answer::OptionValue;

use crate::definition::{Field, FieldKind, FieldOption, FormDefinition, Section, ValidationRules};

pub fn definition() -> &'static FormDefinition {
    static DEFINITION: LazyLock<FormDefinition> = LazyLock::new(|| FormDefinition {
        id: "cognitive_ad8".to_string(),
        title: "认知功能筛查".to_string(),
        version: "1.0".to_string(),
        sections: vec![Section {
            id: "change".to_string(),
            title: "与几年前相比的变化".to_string(),
            description: Some("由了解患者的家属作答；若患者独自作答，请按自身感受选择".to_string()),
            fields: vec![
                item("ad8_judgment", "判断力出现问题（例如做决定困难、财务决定失误）"),
                item("ad8_interest", "对业余爱好和活动的兴趣下降"),
                item("ad8_repeat", "不断重复同一件事（反复问相同问题、讲同一个故事）"),
                item("ad8_tools", "学习使用日常工具或家电有困难（遥控器、微波炉等）"),
                item("ad8_orientation", "记不清当前的年份或月份"),
                item("ad8_finance", "处理个人财务有困难（对账、缴纳水电费等）"),
                item("ad8_appointment", "记不住与别人的约定"),
                item("ad8_memory", "日常记忆和思考能力出现问题"),
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
            FieldOption {
                label: "是，有变化".to_string(),
                value: OptionValue::Number(1.0),
                exclusion: false,
            },
            FieldOption {
                label: "无变化".to_string(),
                value: OptionValue::Number(0.0),
                exclusion: false,
            },
            FieldOption {
                label: "无法判断".to_string(),
                value: OptionValue::Number(0.5),
                exclusion: false,
            },
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
