//! Pre-built Test Fixtures
//!
//! Canned completion answers for each pipeline stage, shaped the way the
//! completion service answers the prompts in `domain_assessment::prompts`.

use serde_json::{json, Value};
use std::sync::Arc;

use core_kernel::{CompletionPort, Credential};
use domain_assessment::AssessmentPipeline;

use crate::stubs::ScriptedCompletionPort;

/// The worked example used throughout the test suite
pub const MEDICAL_CLAIM_QUERY: &str =
    "I need to claim $5000 for medical expenses under my health insurance policy";

/// A key that passes the credential check
pub const TEST_API_KEY: &str = "sk-test-0123456789";

/// Fixture answers for the completion service
pub struct CompletionFixtures;

impl CompletionFixtures {
    /// Interpreter answer for [`MEDICAL_CLAIM_QUERY`]
    pub fn medical_claim_query() -> Value {
        json!({
            "type": "claim",
            "claimAmount": 5000,
            "policyType": "health",
            "keywords": ["medical", "expenses", "health insurance"]
        })
    }

    /// Interpreter answer for a question with no amount
    pub fn coverage_inquiry() -> Value {
        json!({
            "type": "inquiry",
            "claimAmount": null,
            "policyType": "travel",
            "keywords": ["lost luggage", "coverage"]
        })
    }

    /// Retriever answer, deliberately not in relevance order
    pub fn health_policy_clauses() -> Value {
        json!({
            "clauses": [
                {
                    "clause": "Outpatient consultations are reimbursed at 80% after the deductible.",
                    "relevance": 0.55,
                    "source": "Health Policy, Section 3.2"
                },
                {
                    "clause": "Medical expenses for inpatient treatment are covered up to $10,000 per policy year.",
                    "relevance": 0.92,
                    "source": "Health Policy, Section 4.1"
                },
                {
                    "clause": "Cosmetic procedures are excluded unless medically necessary.",
                    "relevance": 0.18,
                    "source": "Health Policy, Section 7.4"
                }
            ]
        })
    }

    /// Evaluator approval for the medical claim
    pub fn approved_decision() -> Value {
        json!({
            "approved": true,
            "amount": 5000,
            "justification": "Inpatient medical expenses are covered up to $10,000 under Section 4.1.",
            "confidence": 0.87
        })
    }

    /// Evaluator denial
    pub fn denied_decision() -> Value {
        json!({
            "approved": false,
            "amount": null,
            "justification": "The expense falls under the cosmetic procedure exclusion in Section 7.4.",
            "confidence": 0.74
        })
    }
}

/// A port scripted with a full successful run for [`MEDICAL_CLAIM_QUERY`]
pub fn scripted_happy_path() -> ScriptedCompletionPort {
    ScriptedCompletionPort::with_responses([
        Ok(CompletionFixtures::medical_claim_query()),
        Ok(CompletionFixtures::health_policy_clauses()),
        Ok(CompletionFixtures::approved_decision()),
    ])
}

/// A pipeline over `port` with a usable credential
pub fn pipeline_with(port: Arc<ScriptedCompletionPort>) -> AssessmentPipeline {
    AssessmentPipeline::new(port as Arc<dyn CompletionPort>, Credential::new(TEST_API_KEY))
}
