//! neuriq-bedrock
//!
//! Bedrock-backed triage analysis: Converse invocation, prompt assembly,
//! and structured summary parsing.

pub mod analyzer;
pub mod error;
pub mod prompt;
