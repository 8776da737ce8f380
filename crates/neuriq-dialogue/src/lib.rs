//! neuriq-dialogue
//!
//! The option-driven triage dialogue: reply parsing, keyword routing,
//! per-disease pathway scripts, and the bounded session state machine.

pub mod error;
pub mod pathway;
pub mod reply;
pub mod router;
pub mod session;
