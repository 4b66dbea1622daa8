//! Ports and Adapters Infrastructure
//!
//! Every stage of the assessment pipeline talks to the completion service
//! through [`CompletionPort`]. The production adapter lives in `infra_llm`;
//! tests substitute deterministic stubs from `test_utils`.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │   Interpreter  ->  Retriever  ->  Evaluator   │
//! └──────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌───────────────────┐
//!              │  CompletionPort   │
//!              └───────────────────┘
//!                ▲               ▲
//!     ┌──────────┴──────┐  ┌─────┴──────────┐
//!     │ OpenAI adapter  │  │ Scripted stub  │
//!     └─────────────────┘  └────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for completion calls
///
/// Adapters classify upstream failures into these variants so the HTTP
/// layer can map them to status codes without inspecting messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// The upstream rejected the API key
    #[error("Upstream rejected the API key: {message}")]
    Unauthorized { message: String },

    /// The upstream account has no quota left
    #[error("Upstream quota exceeded: {message}")]
    QuotaExceeded { message: String },

    /// The upstream answered, but not with the requested JSON
    #[error("Upstream response was malformed: {message}")]
    MalformedResponse { message: String },

    /// Anything else, including transport failures
    #[error("Upstream request failed: {message}")]
    Unknown { message: String },
}

impl CompletionError {
    /// Classifies an upstream failure
    ///
    /// A 401 status, an `invalid_api_key` code or a message containing
    /// `API key` means the credential was rejected. An `insufficient_quota`
    /// code or a message containing `quota` means the account is exhausted.
    /// Message matching is case-sensitive. Everything else is unknown.
    pub fn classify(status: Option<u16>, code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();

        if status == Some(401) || code == Some("invalid_api_key") || message.contains("API key") {
            CompletionError::Unauthorized { message }
        } else if code == Some("insufficient_quota") || message.contains("quota") {
            CompletionError::QuotaExceeded { message }
        } else {
            CompletionError::Unknown { message }
        }
    }

    /// Creates a MalformedResponse error
    pub fn malformed(message: impl Into<String>) -> Self {
        CompletionError::MalformedResponse {
            message: message.into(),
        }
    }

    /// Creates an Unknown error
    pub fn unknown(message: impl Into<String>) -> Self {
        CompletionError::Unknown {
            message: message.into(),
        }
    }

    /// Returns true if the failure is about the credential
    pub fn is_credential_problem(&self) -> bool {
        matches!(self, CompletionError::Unauthorized { .. })
    }
}

/// Shape the completion service is asked to answer in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// A single JSON object
    #[default]
    Json,
    /// Free text
    Text,
}

/// A single completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Standing instructions for the model
    pub system: Option<String>,
    /// The prompt proper
    pub prompt: String,
    pub response_format: ResponseFormat,
}

impl CompletionRequest {
    /// Creates a request that expects a JSON object back
    pub fn json(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            response_format: ResponseFormat::Json,
        }
    }

    /// Adds standing instructions
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared across concurrent requests behind an `Arc`, so they
/// must be thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

/// The external text-completion service
#[async_trait]
pub trait CompletionPort: DomainPort {
    /// Sends one prompt and returns the parsed JSON answer
    ///
    /// Implementations perform exactly one outbound call and never retry.
    async fn complete(&self, request: CompletionRequest) -> Result<serde_json::Value, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_unauthorized() {
        let by_status = CompletionError::classify(Some(401), None, "denied");
        assert!(by_status.is_credential_problem());

        let by_message = CompletionError::classify(
            Some(400),
            None,
            "Incorrect API key provided: sk-abc***",
        );
        assert!(matches!(by_message, CompletionError::Unauthorized { .. }));
    }

    #[test]
    fn test_classify_quota() {
        let by_code = CompletionError::classify(Some(429), Some("insufficient_quota"), "limit");
        assert!(matches!(by_code, CompletionError::QuotaExceeded { .. }));

        let by_message = CompletionError::classify(
            None,
            None,
            "You exceeded your current quota, please check your plan",
        );
        assert!(matches!(by_message, CompletionError::QuotaExceeded { .. }));
    }

    #[test]
    fn test_classify_unknown() {
        let error = CompletionError::classify(Some(500), None, "The server had an error");
        assert_eq!(
            error,
            CompletionError::Unknown {
                message: "The server had an error".to_string()
            }
        );

        let rate_limited = CompletionError::classify(Some(429), Some("rate_limit_exceeded"), "Rate limit reached");
        assert!(matches!(rate_limited, CompletionError::Unknown { .. }));
    }

    #[test]
    fn test_classify_message_match_is_case_sensitive() {
        let lowercase = CompletionError::classify(Some(400), None, "missing api key header");
        assert!(matches!(lowercase, CompletionError::Unknown { .. }));

        let exact = CompletionError::classify(Some(400), None, "No API key provided");
        assert!(matches!(exact, CompletionError::Unauthorized { .. }));

        let capitalised = CompletionError::classify(Some(403), None, "Quota policy violated");
        assert!(matches!(capitalised, CompletionError::Unknown { .. }));
    }

    #[test]
    fn test_unauthorized_display_mentions_api_key() {
        let error = CompletionError::classify(Some(401), None, "denied");
        assert!(error.to_string().contains("API key"));
    }

    #[test]
    fn test_json_request_builder() {
        let request = CompletionRequest::json("extract").with_system("be terse");
        assert_eq!(request.response_format, ResponseFormat::Json);
        assert_eq!(request.system.as_deref(), Some("be terse"));
        assert_eq!(request.prompt, "extract");
    }
}
