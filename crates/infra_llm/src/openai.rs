//! OpenAI-compatible Completion Adapter
//!
//! Sends each `CompletionRequest` to a `/chat/completions` endpoint as a
//! system message plus a user message, in JSON mode when the request asks
//! for JSON. Any server speaking the same wire format works by pointing
//! `base_url` at it.
//!
//! # Error Handling
//!
//! Non-2xx answers are classified with `CompletionError::classify` using the
//! status, the error `code` (or `type`) and the error message:
//! - 401 or "API key" in the message -> `Unauthorized`
//! - `insufficient_quota` or "quota" in the message -> `QuotaExceeded`
//! - anything else, including transport failures -> `Unknown`
//!
//! A 2xx answer whose content is not JSON is `MalformedResponse`.
//!
//! The adapter makes exactly one HTTP request per call. It does not retry
//! and sets no timeout of its own.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use core_kernel::{
    CompletionError, CompletionPort, CompletionRequest, Credential, DomainPort, ResponseFormat,
};

use crate::wire::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ErrorEnvelope, ResponseFormatSpec,
};

const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Longest slice of a non-JSON error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

/// Configuration for the OpenAI-compatible adapter
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Base URL of the API, without the `/chat/completions` suffix
    pub base_url: String,
    pub credential: Credential,
    pub model: String,
    pub temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            credential: Credential::missing(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
        }
    }
}

/// Completion adapter for OpenAI-style chat-completions APIs
#[derive(Debug, Clone)]
pub struct OpenAiCompletionAdapter {
    client: Client,
    config: OpenAiConfig,
    endpoint: String,
}

impl OpenAiCompletionAdapter {
    /// Creates an adapter with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: OpenAiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Creates an adapter sharing an existing HTTP client
    pub fn with_client(client: Client, config: OpenAiConfig) -> Self {
        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        Self {
            client,
            config,
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl DomainPort for OpenAiCompletionAdapter {}

#[async_trait]
impl CompletionPort for OpenAiCompletionAdapter {
    async fn complete(&self, request: CompletionRequest) -> Result<Value, CompletionError> {
        let key = self.config.credential.usable_key().ok_or_else(|| {
            CompletionError::classify(Some(401), None, "API key is not configured")
        })?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            response_format: match request.response_format {
                ResponseFormat::Json => Some(ResponseFormatSpec::json_object()),
                ResponseFormat::Text => None,
            },
        };

        debug!(
            endpoint = %self.endpoint,
            model = %self.config.model,
            prompt_chars = request.prompt.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let error = upstream_error(status.as_u16(), &text);
            warn!(status = status.as_u16(), error = %error, "Completion request rejected");
            return Err(error);
        }

        parse_completion(&text, request.response_format)
    }
}

fn transport_error(err: reqwest::Error) -> CompletionError {
    warn!(error = %err, "Completion transport failure");
    CompletionError::unknown(err.to_string())
}

/// Classifies a non-2xx answer
fn upstream_error(status: u16, body: &str) -> CompletionError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let code = envelope.error.code.or(envelope.error.kind);
            CompletionError::classify(Some(status), code.as_deref(), envelope.error.message)
        }
        Err(_) => {
            let excerpt: String = body.chars().take(MAX_ERROR_BODY).collect();
            CompletionError::classify(Some(status), None, format!("HTTP {}: {}", status, excerpt))
        }
    }
}

/// Extracts the first choice's content and decodes it
fn parse_completion(body: &str, format: ResponseFormat) -> Result<Value, CompletionError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::malformed(format!("unexpected completion body: {}", e)))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CompletionError::malformed("completion had no content"))?;

    match format {
        ResponseFormat::Text => Ok(Value::String(content)),
        ResponseFormat::Json => serde_json::from_str(strip_code_fence(&content))
            .map_err(|e| CompletionError::malformed(format!("content is not JSON: {}", e))),
    }
}

/// Removes a surrounding Markdown code fence, if any
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let adapter = OpenAiCompletionAdapter::with_client(
            Client::new(),
            OpenAiConfig {
                base_url: "http://localhost:9000/v1/".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(adapter.endpoint(), "http://localhost:9000/v1/chat/completions");
        assert_eq!(adapter.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_upstream_error_classification() {
        let invalid_key = r#"{"error":{"message":"Incorrect API key provided: sk-abc***","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert!(matches!(upstream_error(401, invalid_key), CompletionError::Unauthorized { .. }));

        let quota = r#"{"error":{"message":"You exceeded your current quota, please check your plan and billing details.","type":"insufficient_quota","code":"insufficient_quota"}}"#;
        assert!(matches!(upstream_error(429, quota), CompletionError::QuotaExceeded { .. }));

        let overloaded = r#"{"error":{"message":"The engine is currently overloaded","type":"server_error","code":null}}"#;
        assert!(matches!(upstream_error(503, overloaded), CompletionError::Unknown { .. }));
    }

    #[test]
    fn test_upstream_error_non_json_body() {
        let error = upstream_error(502, "<html>Bad Gateway</html>");
        assert_eq!(
            error,
            CompletionError::unknown("HTTP 502: <html>Bad Gateway</html>")
        );
    }

    #[test]
    fn test_parse_completion_json() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "{\"approved\": true}" } }]
        })
        .to_string();
        assert_eq!(
            parse_completion(&body, ResponseFormat::Json).unwrap(),
            json!({ "approved": true })
        );
    }

    #[test]
    fn test_parse_completion_fenced_json() {
        let body = json!({
            "choices": [{ "message": { "content": "```json\n{\"clauses\": []}\n```" } }]
        })
        .to_string();
        assert_eq!(
            parse_completion(&body, ResponseFormat::Json).unwrap(),
            json!({ "clauses": [] })
        );
    }

    #[test]
    fn test_parse_completion_malformed() {
        let prose = json!({ "choices": [{ "message": { "content": "I cannot help with that." } }] })
            .to_string();
        assert!(matches!(
            parse_completion(&prose, ResponseFormat::Json),
            Err(CompletionError::MalformedResponse { .. })
        ));

        let empty = json!({ "choices": [] }).to_string();
        assert!(parse_completion(&empty, ResponseFormat::Json).is_err());

        let text = json!({ "choices": [{ "message": { "content": "plain" } }] }).to_string();
        assert_eq!(parse_completion(&text, ResponseFormat::Text).unwrap(), json!("plain"));
    }
}
