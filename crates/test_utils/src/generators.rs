//! Property-Based Test Generators
//!
//! Strategies that produce completion answers the way a model might: scores
//! outside `[0, 1]`, amounts as numbers or strings, amounts on denials.

use proptest::prelude::*;
use serde_json::{json, Value};

/// Raw scores, including values well outside `[0, 1]` and percent strings
pub fn raw_score_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        (0.0f64..=1.0).prop_map(|s| json!(s)),
        (-5.0f64..5.0).prop_map(|s| json!(s)),
        (0u32..=150).prop_map(|p| json!(format!("{}%", p))),
    ]
}

/// Amounts as numbers, formatted strings, zero, negatives or null
pub fn raw_amount_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        (1u32..1_000_000).prop_map(|a| json!(a)),
        (1u32..1_000_000).prop_map(|a| json!(format!("${}", a))),
        (-1_000i32..=0).prop_map(|a| json!(a)),
        Just(Value::Null),
    ]
}

/// A retriever answer with up to six clauses
pub fn clauses_answer_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec(
        ("[A-Z][a-z ]{5,40}\\.", raw_score_strategy(), "Section [0-9]{1,2}\\.[0-9]"),
        0..6,
    )
    .prop_map(|entries| {
        let clauses: Vec<Value> = entries
            .into_iter()
            .map(|(clause, relevance, source)| {
                json!({ "clause": clause, "relevance": relevance, "source": source })
            })
            .collect();
        json!({ "clauses": clauses })
    })
}

/// An evaluator answer with an arbitrary verdict, amount and confidence
pub fn decision_answer_strategy() -> impl Strategy<Value = Value> {
    (any::<bool>(), raw_amount_strategy(), raw_score_strategy()).prop_map(
        |(approved, amount, confidence)| {
            json!({
                "approved": approved,
                "amount": amount,
                "justification": "Decided on the retrieved clauses.",
                "confidence": confidence
            })
        },
    )
}

/// An interpreter answer with an arbitrary claim amount
pub fn query_answer_strategy() -> impl Strategy<Value = Value> {
    (
        prop_oneof![Just("claim"), Just("inquiry"), Just("dispute"), Just("complaint")],
        raw_amount_strategy(),
        prop_oneof![Just("health"), Just("auto"), Just("home"), Just("life")],
    )
        .prop_map(|(query_type, amount, policy_type)| {
            json!({
                "type": query_type,
                "claimAmount": amount,
                "policyType": policy_type,
                "keywords": ["coverage"]
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn clause_answers_are_objects(answer in clauses_answer_strategy()) {
            prop_assert!(answer["clauses"].is_array());
        }

        #[test]
        fn decision_answers_carry_a_verdict(answer in decision_answer_strategy()) {
            prop_assert!(answer["approved"].is_boolean());
        }
    }
}
