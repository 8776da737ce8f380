//! Disease pathway classification.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Pathway assigned to a session at the routing step.
///
/// Fixed for the rest of the session once routing completes. Downstream
/// analysis may disagree with it but never overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Disease {
    Migraine,
    Epilepsy,
    Cognitive,
    /// Fallback pathway when no specific presentation is recognized.
    General,
}

impl Disease {
    /// Stable identifier used in store keys and persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Disease::Migraine => "migraine",
            Disease::Epilepsy => "epilepsy",
            Disease::Cognitive => "cognitive",
            Disease::General => "general",
        }
    }

    /// Display name used in patient-facing summaries and referrals.
    pub fn display_name(&self) -> &'static str {
        match self {
            Disease::Migraine => "偏头痛",
            Disease::Epilepsy => "癫痫",
            Disease::Cognitive => "认知障碍",
            Disease::General => "神经内科综合",
        }
    }
}

impl FromStr for Disease {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "migraine" => Ok(Disease::Migraine),
            "epilepsy" => Ok(Disease::Epilepsy),
            "cognitive" => Ok(Disease::Cognitive),
            "general" => Ok(Disease::General),
            other => Err(CoreError::UnknownDisease(other.to_string())),
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
