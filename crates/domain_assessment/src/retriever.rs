//! Clause retrieval stage
//!
//! There is no document corpus behind this stage. The completion service
//! is asked to produce clauses consistent with the query's policy type and
//! keywords, so results are generative and may differ between calls.

use std::sync::Arc;
use tracing::debug;

use core_kernel::{CompletionPort, CompletionRequest};

use crate::clause::Clause;
use crate::error::{AssessmentError, Stage};
use crate::prompts::{retrieve_prompt, RETRIEVE_SYSTEM_PROMPT};
use crate::query::ParsedQuery;

/// Produces the policy clauses relevant to a [`ParsedQuery`]
pub struct ClauseRetriever {
    port: Arc<dyn CompletionPort>,
}

impl ClauseRetriever {
    pub fn new(port: Arc<dyn CompletionPort>) -> Self {
        Self { port }
    }

    /// Returns clauses ordered by relevance, highest first
    ///
    /// The list may be empty. Clauses with equal relevance keep the order
    /// the completion service gave them.
    pub async fn retrieve(&self, parsed: &ParsedQuery) -> Result<Vec<Clause>, AssessmentError> {
        let request =
            CompletionRequest::json(retrieve_prompt(parsed)).with_system(RETRIEVE_SYSTEM_PROMPT);

        let response = self
            .port
            .complete(request)
            .await
            .map_err(|e| AssessmentError::upstream(Stage::Retrieve, e))?;

        let mut clauses = Clause::list_from_completion(response)
            .map_err(|message| AssessmentError::malformed(Stage::Retrieve, message))?;
        sort_by_relevance(&mut clauses);

        debug!(count = clauses.len(), "Clauses retrieved");
        Ok(clauses)
    }
}

/// Stable sort, most relevant first
pub fn sort_by_relevance(clauses: &mut [Clause]) {
    clauses.sort_by(|a, b| b.relevance.value().total_cmp(&a.relevance.value()));
}
