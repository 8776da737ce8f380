use std::collections::HashMap;

use neuriq_core::disease::Disease;
use neuriq_core::risk::RiskLevel;
use neuriq_core::summary::{ExtractedProfile, PatientProfile, TriageSummary};

fn extracted(disease: Disease, pairs: &[(&str, &str)]) -> ExtractedProfile {
    let entries: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ExtractedProfile { disease, entries }
}

#[test]
fn merge_namespaces_entries_by_pathway() {
    let mut profile = PatientProfile::default();
    profile.merge(&extracted(Disease::Migraine, &[("发作频率", "每周数次")]));
    profile.merge(&extracted(Disease::Epilepsy, &[("发作频率", "每月一次")]));

    assert_eq!(profile.entries.len(), 2);
    assert_eq!(profile.get(Disease::Migraine, "发作频率"), Some("每周数次"));
    assert_eq!(profile.get(Disease::Epilepsy, "发作频率"), Some("每月一次"));
}

#[test]
fn remerge_overwrites_within_a_pathway() {
    let mut profile = PatientProfile::default();
    profile.merge(&extracted(Disease::Cognitive, &[("起病时间", "半年")]));
    profile.merge(&extracted(Disease::Cognitive, &[("起病时间", "两年")]));

    assert_eq!(profile.entries.len(), 1);
    assert_eq!(profile.get(Disease::Cognitive, "起病时间"), Some("两年"));
}

#[test]
fn summary_level_uses_the_shared_bands() {
    let summary = TriageSummary {
        risk_score: 72.0,
        disease: Disease::Epilepsy,
        summary: "发作频繁，建议尽快就诊。".to_string(),
        critical: false,
        profile: None,
        referral: None,
    };

    assert_eq!(summary.risk_level(), RiskLevel::High);
}
