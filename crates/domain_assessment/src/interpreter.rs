//! Query interpretation stage

use std::sync::Arc;
use tracing::debug;

use core_kernel::{CompletionPort, CompletionRequest};

use crate::error::{AssessmentError, Stage};
use crate::prompts::{interpret_prompt, INTERPRET_SYSTEM_PROMPT};
use crate::query::ParsedQuery;

/// Turns raw query text into a [`ParsedQuery`]
pub struct QueryInterpreter {
    port: Arc<dyn CompletionPort>,
}

impl QueryInterpreter {
    pub fn new(port: Arc<dyn CompletionPort>) -> Self {
        Self { port }
    }

    /// Extracts type, amount, policy type and keywords from `query`
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Upstream` if the completion call fails and
    /// `AssessmentError::MalformedResponse` if its answer does not describe
    /// a query.
    pub async fn parse(&self, query: &str) -> Result<ParsedQuery, AssessmentError> {
        let request =
            CompletionRequest::json(interpret_prompt(query)).with_system(INTERPRET_SYSTEM_PROMPT);

        let response = self
            .port
            .complete(request)
            .await
            .map_err(|e| AssessmentError::upstream(Stage::Interpret, e))?;

        let parsed = ParsedQuery::from_completion(response)
            .map_err(|message| AssessmentError::malformed(Stage::Interpret, message))?;

        debug!(
            query_type = parsed.query_type.as_str(),
            policy_type = %parsed.policy_type,
            claim_amount = ?parsed.claim_amount,
            keywords = parsed.keywords.len(),
            "Query interpreted"
        );
        Ok(parsed)
    }
}
