//! Decision evaluation stage

use std::sync::Arc;
use tracing::debug;

use core_kernel::{CompletionPort, CompletionRequest};

use crate::clause::Clause;
use crate::decision::Decision;
use crate::error::{AssessmentError, Stage};
use crate::prompts::{evaluate_prompt, EVALUATE_SYSTEM_PROMPT};
use crate::query::ParsedQuery;

/// Decides a [`ParsedQuery`] against retrieved clauses
///
/// No rules are applied here beyond the data-model invariants; the verdict
/// is the completion service's judgment.
pub struct DecisionEvaluator {
    port: Arc<dyn CompletionPort>,
}

impl DecisionEvaluator {
    pub fn new(port: Arc<dyn CompletionPort>) -> Self {
        Self { port }
    }

    pub async fn evaluate(
        &self,
        parsed: &ParsedQuery,
        clauses: &[Clause],
    ) -> Result<Decision, AssessmentError> {
        let request = CompletionRequest::json(evaluate_prompt(parsed, clauses))
            .with_system(EVALUATE_SYSTEM_PROMPT);

        let response = self
            .port
            .complete(request)
            .await
            .map_err(|e| AssessmentError::upstream(Stage::Evaluate, e))?;

        let decision = Decision::from_completion(response, parsed.claim_amount)
            .map_err(|message| AssessmentError::malformed(Stage::Evaluate, message))?;

        debug!(
            approved = decision.approved,
            amount = ?decision.amount,
            confidence = decision.confidence.value(),
            "Decision evaluated"
        );
        Ok(decision)
    }
}
