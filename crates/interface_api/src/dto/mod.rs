//! Request/response data transfer objects

mod insurance;

pub use insurance::{AssessmentEnvelope, InsuranceQueryRequest};
