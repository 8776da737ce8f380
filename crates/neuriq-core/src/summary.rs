//! Triage summaries and the accumulated patient profile.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::disease::Disease;
use crate::risk::{Referral, RiskLevel};

/// Structured output of a completed triage.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TriageSummary {
    /// Final risk score on the 0..=100 scale.
    pub risk_score: f64,
    /// The pathway the session was routed into. Never the analyzer's own
    /// guess; classification is fixed at routing time.
    pub disease: Disease,
    /// Patient-facing summary text.
    pub summary: String,
    /// Red-flag option seen during collection. Set by the orchestrator,
    /// independent of the numeric score.
    #[serde(default)]
    pub critical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ExtractedProfile>,
    /// Present exactly when `risk_score` reaches the high-risk band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral: Option<Referral>,
}

impl TriageSummary {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}

/// Disease-specific history points extracted from a completed triage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractedProfile {
    pub disease: Disease,
    pub entries: HashMap<String, String>,
}

/// The caller's accumulated profile, merged across completed pathways.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientProfile {
    pub entries: HashMap<String, String>,
}

impl PatientProfile {
    /// Merge an extracted profile. Keys are namespaced by pathway so one
    /// disease's entries never clobber another's.
    pub fn merge(&mut self, profile: &ExtractedProfile) {
        for (key, value) in &profile.entries {
            self.entries
                .insert(format!("{}.{key}", profile.disease.as_str()), value.clone());
        }
    }

    pub fn get(&self, disease: Disease, key: &str) -> Option<&str> {
        self.entries
            .get(&format!("{}.{key}", disease.as_str()))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
