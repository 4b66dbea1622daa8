//! Claim Assessment Domain
//!
//! This crate turns a free-text insurance query into a decision by running
//! three stages in order, each backed by one call to the completion service.
//!
//! # Pipeline
//!
//! ```text
//! query text -> QueryInterpreter -> ClauseRetriever -> DecisionEvaluator -> Assessment
//! ```
//!
//! Every stage owns its prompt and validates the upstream JSON into the
//! domain types below. The first failure aborts the run; no partial
//! assessment is ever returned.

pub mod query;
pub mod clause;
pub mod decision;
pub mod prompts;
pub mod interpreter;
pub mod retriever;
pub mod evaluator;
pub mod pipeline;
pub mod error;

pub use query::{ParsedQuery, QueryType};
pub use clause::Clause;
pub use decision::Decision;
pub use interpreter::QueryInterpreter;
pub use retriever::ClauseRetriever;
pub use evaluator::DecisionEvaluator;
pub use pipeline::{Assessment, AssessmentPipeline};
pub use error::{AssessmentError, ErrorKind, Stage};
