//! Crate-level integration and determinism tests.
//!
//! - `determinism.rs`: same seed and snapshot produce identical command lines
//! - `integration.rs`: snapshot → fleet → command line, end to end
//! - `helpers.rs`: board builders and snapshot rendering

mod helpers;

// Re-export for convenience
pub use helpers::*;
