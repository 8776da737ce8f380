//! neuriq-core
//!
//! Pure domain types shared across the neuriq engine: answer values, disease
//! pathways, risk bands, conversation turns, and the analysis interface.
//! No I/O and no AWS dependency; every other crate builds on this vocabulary.

pub mod analyzer;
pub mod answer;
pub mod disease;
pub mod error;
pub mod risk;
pub mod summary;
pub mod turn;
