//! Per-disease pathway scripts.
//!
//! Each pathway is a fixed sequence of collecting questions with weighted
//! options. Routing options carry zero weight; the score only accumulates
//! during collection. Critical options mark red-flag presentations that
//! cut collection short.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use neuriq_core::disease::Disease;

use crate::router::{ROUTE_COGNITIVE, ROUTE_HEADACHE, ROUTE_OTHER, ROUTE_SEIZURE};

/// A selectable option at a triage step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageOption {
    /// Text shown as a quick reply.
    pub label: String,
    /// Stored value; also matched against raw input.
    pub value: String,
    /// Added to the session score when selected.
    pub risk_weight: f64,
    /// Red flag. Ends collection immediately when selected.
    #[serde(default)]
    pub is_critical: bool,
}

/// A scripted triage step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageStep {
    pub id: String,
    pub question: String,
    pub options: Vec<TriageOption>,
}

/// The fixed collecting sequence for one disease pathway.
#[derive(Debug, Clone)]
pub struct Pathway {
    pub disease: Disease,
    pub steps: Vec<TriageStep>,
}

impl Pathway {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&TriageStep> {
        self.steps.get(index)
    }
}

/// The opening question, identical for every session.
pub fn opening_step() -> &'static TriageStep {
    static STEP: LazyLock<TriageStep> = LazyLock::new(|| TriageStep {
        id: "routing".to_string(),
        question: "您好，我是神经内科预检助手。请问您这次主要想咨询哪方面的问题？"
            .to_string(),
        options: vec![
            route("记忆力下降或健忘", ROUTE_COGNITIVE),
            route("肢体抽搐或意识丧失", ROUTE_SEIZURE),
            route("头痛", ROUTE_HEADACHE),
            route("其他不适", ROUTE_OTHER),
        ],
    });
    &STEP
}

/// Closing text delivered on the edge into the terminal state. The caller
/// attaches the analyze action when rendering it.
pub fn closing_text() -> &'static str {
    "感谢您的配合，信息已收集完毕。我会根据您的回答生成初步评估，请稍候。"
}

/// Script for a disease pathway.
pub fn pathway_for(disease: Disease) -> &'static Pathway {
    match disease {
        Disease::Migraine => &MIGRAINE,
        Disease::Epilepsy => &EPILEPSY,
        Disease::Cognitive => &COGNITIVE,
        Disease::General => &GENERAL,
    }
}

static MIGRAINE: LazyLock<Pathway> = LazyLock::new(|| Pathway {
    disease: Disease::Migraine,
    steps: vec![
        step(
            "headache_frequency",
            "您的头痛多久发作一次？",
            vec![
                option("每月少于一次", "monthly_or_less", 5.0),
                option("每月数次", "several_monthly", 10.0),
                option("每周数次", "several_weekly", 15.0),
                option("几乎每天", "daily", 20.0),
            ],
        ),
        step(
            "headache_character",
            "头痛发作时是怎样的感觉？",
            vec![
                option("单侧搏动性跳痛", "unilateral_throbbing", 15.0),
                option("双侧紧箍样胀痛", "bilateral_pressing", 8.0),
                option("说不清楚", "unclear", 5.0),
            ],
        ),
        step(
            "headache_accompany",
            "头痛时是否伴有恶心、呕吐或者怕光怕声？",
            vec![
                option("经常伴有", "often", 15.0),
                option("偶尔伴有", "sometimes", 8.0),
                option("没有", "none", 0.0),
            ],
        ),
        step(
            "headache_onset",
            "是否出现过突然发生、像炸裂一样的剧烈头痛？",
            vec![
                critical("是，突然剧烈如雷击", "thunderclap", 30.0),
                option("没有，都是逐渐加重", "gradual", 5.0),
            ],
        ),
    ],
});

static EPILEPSY: LazyLock<Pathway> = LazyLock::new(|| Pathway {
    disease: Disease::Epilepsy,
    steps: vec![
        step(
            "seizure_frequency",
            "类似的发作大约多久出现一次？",
            vec![
                option("仅发作过一次", "single", 8.0),
                option("每年数次", "yearly", 12.0),
                option("每月数次", "monthly", 18.0),
                option("每周甚至更频繁", "weekly_or_more", 25.0),
            ],
        ),
        step(
            "seizure_awareness",
            "发作时是否伴随意识丧失或事后无法回忆？",
            vec![
                option("是，完全没有记忆", "loss_complete", 20.0),
                option("意识模糊但有部分记忆", "loss_partial", 12.0),
                option("意识一直清醒", "aware", 5.0),
            ],
        ),
        step(
            "seizure_duration",
            "单次发作一般持续多长时间？",
            vec![
                option("一分钟以内", "under_minute", 8.0),
                option("一到五分钟", "one_to_five", 12.0),
                critical("超过5分钟仍未缓解", "status_epilepticus", 30.0),
            ],
        ),
        step(
            "seizure_injury",
            "发作时是否发生过跌倒受伤、咬破舌头或大小便失禁？",
            vec![
                option("有", "injury_yes", 15.0),
                option("没有", "injury_no", 0.0),
            ],
        ),
    ],
});

static COGNITIVE: LazyLock<Pathway> = LazyLock::new(|| Pathway {
    disease: Disease::Cognitive,
    steps: vec![
        step(
            "memory_course",
            "记忆力的变化是从什么时候开始的？",
            vec![
                option("半年以内", "under_half_year", 8.0),
                option("半年到两年", "half_to_two_years", 12.0),
                option("两年以上，逐渐加重", "over_two_years", 18.0),
            ],
        ),
        step(
            "memory_daily",
            "是否影响到日常生活，比如忘记关火、付错钱或忘记服药？",
            vec![
                option("经常发生", "daily_often", 20.0),
                option("偶尔发生", "daily_sometimes", 10.0),
                option("基本没有", "daily_none", 3.0),
            ],
        ),
        step(
            "memory_orientation",
            "是否出现过在熟悉的地方迷路，或记不清年月日？",
            vec![
                critical("在熟悉的地方迷过路", "lost_familiar", 30.0),
                option("偶尔记不清日期", "date_confusion", 10.0),
                option("没有", "orientation_none", 0.0),
            ],
        ),
        step(
            "memory_mood",
            "情绪或性格最近是否有明显变化？",
            vec![
                option("有，变得淡漠或易怒", "mood_changed", 12.0),
                option("没有明显变化", "mood_stable", 0.0),
            ],
        ),
    ],
});

static GENERAL: LazyLock<Pathway> = LazyLock::new(|| Pathway {
    disease: Disease::General,
    steps: vec![
        step(
            "general_complaint",
            "请选择最接近您情况的描述。",
            vec![
                option("头晕或行走不稳", "dizziness", 12.0),
                option("肢体麻木或无力", "numbness", 15.0),
                option("睡眠问题", "sleep", 8.0),
                option("其他", "other_complaint", 5.0),
            ],
        ),
        step(
            "general_course",
            "这种情况持续多久了？",
            vec![
                option("一周以内", "under_week", 10.0),
                option("一周到一个月", "week_to_month", 8.0),
                option("一个月以上", "over_month", 5.0),
            ],
        ),
        step(
            "general_sudden",
            "症状是否突然出现并迅速加重？",
            vec![
                critical("是，突然出现且在加重", "sudden_worsening", 30.0),
                option("否，比较平稳", "stable", 0.0),
            ],
        ),
    ],
});

fn step(id: &str, question: &str, options: Vec<TriageOption>) -> TriageStep {
    TriageStep {
        id: id.to_string(),
        question: question.to_string(),
        options,
    }
}

fn option(label: &str, value: &str, risk_weight: f64) -> TriageOption {
    TriageOption {
        label: label.to_string(),
        value: value.to_string(),
        risk_weight,
        is_critical: false,
    }
}

fn critical(label: &str, value: &str, risk_weight: f64) -> TriageOption {
    TriageOption {
        label: label.to_string(),
        value: value.to_string(),
        risk_weight,
        is_critical: true,
    }
}

fn route(label: &str, value: &str) -> TriageOption {
    TriageOption {
        label: label.to_string(),
        value: value.to_string(),
        risk_weight: 0.0,
        is_critical: false,
    }
}
