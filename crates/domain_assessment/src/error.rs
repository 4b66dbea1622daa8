//! Assessment domain errors

use std::fmt;
use thiserror::Error;

use core_kernel::CompletionError;

/// Pipeline stage an error originated in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Interpret,
    Retrieve,
    Evaluate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Interpret => "query interpretation",
            Stage::Retrieve => "clause retrieval",
            Stage::Evaluate => "decision evaluation",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while assessing a query
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Completion service API key is not configured")]
    ConfigurationMissing,

    #[error("Query is required")]
    EmptyQuery,

    #[error("{stage} failed: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: CompletionError,
    },

    #[error("{stage} returned a malformed response: {message}")]
    MalformedResponse { stage: Stage, message: String },
}

/// Caller-facing classification of an [`AssessmentError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigurationMissing,
    InvalidQuery,
    Unauthorized,
    QuotaExceeded,
    MalformedUpstreamResponse,
    Unknown,
}

impl AssessmentError {
    /// Wraps a completion failure raised during `stage`
    pub fn upstream(stage: Stage, source: CompletionError) -> Self {
        match source {
            CompletionError::MalformedResponse { message } => {
                AssessmentError::MalformedResponse { stage, message }
            }
            source => AssessmentError::Upstream { stage, source },
        }
    }

    /// Reports a response that does not fit the stage's shape
    pub fn malformed(stage: Stage, message: impl Into<String>) -> Self {
        AssessmentError::MalformedResponse {
            stage,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AssessmentError::ConfigurationMissing => ErrorKind::ConfigurationMissing,
            AssessmentError::EmptyQuery => ErrorKind::InvalidQuery,
            AssessmentError::MalformedResponse { .. } => ErrorKind::MalformedUpstreamResponse,
            AssessmentError::Upstream { source, .. } => match source {
                CompletionError::Unauthorized { .. } => ErrorKind::Unauthorized,
                CompletionError::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
                CompletionError::MalformedResponse { .. } => ErrorKind::MalformedUpstreamResponse,
                CompletionError::Unknown { .. } => ErrorKind::Unknown,
            },
        }
    }

    /// Stage the error was raised in, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AssessmentError::Upstream { stage, .. }
            | AssessmentError::MalformedResponse { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
