//! Built-in scale definitions.

pub mod ad8;
pub mod epilepsy_intake;
pub mod hit6;
