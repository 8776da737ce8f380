//! Risk bands and referral synthesis.
//!
//! The thresholds are fixed product constants, not configuration. Every
//! place a score is rendered goes through [`RiskLevel::from_score`] so the
//! bands cannot drift between surfaces.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::disease::Disease;

/// Score at or above which a session is high risk and earns a referral.
pub const HIGH_RISK_THRESHOLD: f64 = 60.0;

/// Score at or above which a session is moderate risk.
pub const MODERATE_RISK_THRESHOLD: f64 = 30.0;

/// Risk classification band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    /// The single conversion point from a numeric score to a band.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if score >= MODERATE_RISK_THRESHOLD {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RiskLevel::High => "高风险",
            RiskLevel::Moderate => "中度风险",
            RiskLevel::Low => "低风险",
        }
    }
}

/// Referral payload attached to high-risk triage summaries.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Referral {
    /// Receiving department.
    pub facility: String,
    /// Recommended studies for the pathway.
    pub studies: Vec<String>,
    /// Short opaque code quoted at check-in.
    pub reference_code: String,
}

const REFERRAL_FACILITY: &str = "神经内科专科门诊";

impl Referral {
    /// Build the referral for a pathway. Studies come from the fixed
    /// per-disease table below.
    pub fn for_disease(disease: Disease) -> Self {
        Referral {
            facility: REFERRAL_FACILITY.to_string(),
            studies: recommended_studies(disease)
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            reference_code: reference_code(),
        }
    }
}

/// Recommended studies keyed by disease pathway.
pub fn recommended_studies(disease: Disease) -> &'static [&'static str] {
    match disease {
        Disease::Migraine => &["头颅MRI平扫", "经颅多普勒超声", "眼底检查"],
        Disease::Epilepsy => &["视频脑电图", "头颅MRI平扫加海马薄层", "血药浓度监测"],
        Disease::Cognitive => &["神经心理量表测评", "头颅MRI海马成像", "甲状腺功能与维生素B12"],
        Disease::General => &["头颅MRI平扫", "血常规与生化全套"],
    }
}

/// Eight uppercase hex characters from a v4 UUID. Opaque, not sequential.
fn reference_code() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}
