//! Core Kernel - Foundational types shared by the claim assessment crates
//!
//! This crate provides the building blocks used across the workspace:
//! - Monetary amounts parsed leniently from model output
//! - Bounded scores for relevance and confidence
//! - The completion service credential
//! - The completion port that every pipeline stage calls through

pub mod money;
pub mod score;
pub mod credential;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{parse_amount, positive_amount};
pub use score::{parse_score, Score};
pub use credential::Credential;
pub use identifiers::AssessmentId;
pub use ports::{
    CompletionError, CompletionPort, CompletionRequest, DomainPort, ResponseFormat,
};
pub use error::CoreError;
