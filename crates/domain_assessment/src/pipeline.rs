//! Assessment pipeline
//!
//! Runs interpretation, retrieval and evaluation in order for one query.
//! The pipeline holds no per-request state, so a single instance is shared
//! by every concurrent request.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn, Instrument};

use core_kernel::{AssessmentId, CompletionPort, Credential};

use crate::clause::Clause;
use crate::decision::Decision;
use crate::error::AssessmentError;
use crate::evaluator::DecisionEvaluator;
use crate::interpreter::QueryInterpreter;
use crate::query::ParsedQuery;
use crate::retriever::ClauseRetriever;

/// Result of a successful run
///
/// Serializes as the `data` object of the response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub query: ParsedQuery,
    pub relevant_clauses: Vec<Clause>,
    pub decision: Decision,
}

/// The three stages plus the credential they depend on
pub struct AssessmentPipeline {
    interpreter: QueryInterpreter,
    retriever: ClauseRetriever,
    evaluator: DecisionEvaluator,
    credential: Credential,
}

impl AssessmentPipeline {
    /// Builds a pipeline whose stages all call through `port`
    ///
    /// `credential` is the key `port` was configured with. It is checked
    /// before every run so a missing key fails fast without an outbound call.
    pub fn new(port: Arc<dyn CompletionPort>, credential: Credential) -> Self {
        Self {
            interpreter: QueryInterpreter::new(Arc::clone(&port)),
            retriever: ClauseRetriever::new(Arc::clone(&port)),
            evaluator: DecisionEvaluator::new(port),
            credential,
        }
    }

    /// Returns true if the completion credential can be used
    pub fn is_configured(&self) -> bool {
        self.credential.is_usable()
    }

    /// Assesses one query
    ///
    /// # Errors
    ///
    /// - `ConfigurationMissing` if the credential is absent or a placeholder
    /// - `EmptyQuery` if `query` is blank
    /// - `Upstream` / `MalformedResponse` from whichever stage failed first
    pub async fn assess(&self, query: &str) -> Result<Assessment, AssessmentError> {
        if !self.is_configured() {
            warn!("Completion credential missing; refusing to assess");
            return Err(AssessmentError::ConfigurationMissing);
        }
        if query.trim().is_empty() {
            return Err(AssessmentError::EmptyQuery);
        }

        let assessment_id = AssessmentId::new_v7();
        let span = info_span!("assessment", %assessment_id);

        let result = async move {
            let parsed = self.interpreter.parse(query).await?;
            let relevant_clauses = self.retriever.retrieve(&parsed).await?;
            let decision = self.evaluator.evaluate(&parsed, &relevant_clauses).await?;

            info!(
                query_type = parsed.query_type.as_str(),
                clauses = relevant_clauses.len(),
                approved = decision.approved,
                confidence = decision.confidence.value(),
                "Assessment complete"
            );

            Ok::<_, AssessmentError>(Assessment {
                query: parsed,
                relevant_clauses,
                decision,
            })
        }
        .instrument(span)
        .await;

        if let Err(e) = &result {
            warn!(%assessment_id, error = %e, "Assessment failed");
        }
        result
    }
}
