//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the claim assessment workspace.
//!
//! # Modules
//!
//! - `stubs`: Deterministic completion ports
//! - `fixtures`: Canned completion answers and queries
//! - `builders`: Builder patterns for domain values
//! - `assertions`: Invariant checks for assessments and envelopes
//! - `generators`: Property-based generators for upstream answers

pub mod stubs;
pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use stubs::*;
pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
