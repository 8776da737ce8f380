//! neuriq-scales
//!
//! Declarative assessment scale definitions and the form engine that
//! evaluates them: conditional visibility, per-field validation, and
//! section scoring. Pure data and logic, no I/O.

pub mod definition;
pub mod engine;
pub mod error;
pub mod scales;

use crate::definition::FormDefinition;
use neuriq_core::disease::Disease;

/// All built-in scale definitions.
pub fn all_scales() -> Vec<&'static FormDefinition> {
    vec![
        scales::hit6::definition(),
        scales::epilepsy_intake::definition(),
        scales::ad8::definition(),
    ]
}

/// Look up a built-in scale by id.
pub fn get_scale(id: &str) -> Option<&'static FormDefinition> {
    all_scales().into_iter().find(|def| def.id == id)
}

/// The deep-assessment scale offered after triage on a pathway, if any.
pub fn scale_for(disease: Disease) -> Option<&'static FormDefinition> {
    match disease {
        Disease::Migraine => Some(scales::hit6::definition()),
        Disease::Epilepsy => Some(scales::epilepsy_intake::definition()),
        Disease::Cognitive => Some(scales::ad8::definition()),
        Disease::General => None,
    }
}
