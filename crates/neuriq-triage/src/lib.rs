//! neuriq-triage
//!
//! The triage orchestrator: wires the dialogue machine to the analysis
//! call, serializes turns per session, synthesizes referrals, merges
//! extracted profiles, and owns session persistence and resume.

pub mod error;
pub mod service;
pub mod store;

use neuriq_core::disease::Disease;
use neuriq_scales::definition::FormDefinition;

/// The deep-assessment scale to offer once a pathway's triage completes.
pub fn deep_scale(disease: Disease) -> Option<&'static FormDefinition> {
    neuriq_scales::scale_for(disease)
}
