//! Keyword routing.
//!
//! Maps the routing-step input onto a disease pathway via an ordered
//! first-match-wins keyword table. No match falls back to the general
//! pathway; the caller decides whether a pathway hint replaces that
//! fallback.

use tracing::debug;

use neuriq_core::disease::Disease;

/// Stored values of the opening step's routing options.
pub const ROUTE_COGNITIVE: &str = "cognitive";
pub const ROUTE_SEIZURE: &str = "seizure";
pub const ROUTE_HEADACHE: &str = "headache";
pub const ROUTE_OTHER: &str = "other";

static EPILEPSY_KEYWORDS: &[&str] = &[
    "抽搐",
    "癫痫",
    "意识丧失",
    "口吐白沫",
    "惊厥",
    "抽风",
    "愣神",
    "肢体抽动",
    "seizure",
    "convulsion",
    "epilep",
];

static MIGRAINE_KEYWORDS: &[&str] = &[
    "头痛",
    "头疼",
    "偏头痛",
    "胀痛",
    "跳痛",
    "headache",
    "migraine",
];

static COGNITIVE_KEYWORDS: &[&str] = &[
    "记忆",
    "健忘",
    "记不住",
    "痴呆",
    "认知",
    "阿尔茨海默",
    "迷路",
    "memory",
    "dementia",
    "cognitive",
    "forgetful",
];

/// Ordered, first match wins. Seizure presentations are checked first, so
/// a complaint mentioning both convulsions and headache routes to the
/// epilepsy pathway.
static ROUTES: &[(&[&str], Disease)] = &[
    (EPILEPSY_KEYWORDS, Disease::Epilepsy),
    (MIGRAINE_KEYWORDS, Disease::Migraine),
    (COGNITIVE_KEYWORDS, Disease::Cognitive),
];

/// Classify a routing-step input.
///
/// Routing option values map directly; anything else is scanned against
/// the keyword table case-insensitively.
pub fn classify(input: &str) -> Disease {
    match input.trim() {
        ROUTE_COGNITIVE => return Disease::Cognitive,
        ROUTE_SEIZURE => return Disease::Epilepsy,
        ROUTE_HEADACHE => return Disease::Migraine,
        ROUTE_OTHER => return Disease::General,
        _ => {}
    }

    let lowered = input.to_lowercase();
    for (keywords, disease) in ROUTES {
        if let Some(hit) = keywords.iter().find(|kw| lowered.contains(*kw)) {
            debug!(keyword = hit, disease = disease.as_str(), "complaint matched");
            return *disease;
        }
    }
    Disease::General
}
