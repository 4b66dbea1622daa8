//! Custom Test Assertions
//!
//! Checks for the range and presence invariants every assessment must hold,
//! both on domain values and on the JSON envelope the API returns.

use serde_json::Value;

use domain_assessment::Assessment;

/// Asserts that a score is within `[0, 1]`
pub fn assert_unit_interval(value: f64, label: &str) {
    assert!(
        value.is_finite() && (0.0..=1.0).contains(&value),
        "{} must be within [0, 1], got {}",
        label,
        value
    );
}

/// Asserts the data-model invariants on an assessment
pub fn assert_assessment_invariants(assessment: &Assessment) {
    for clause in &assessment.relevant_clauses {
        assert_unit_interval(clause.relevance.value(), "clause relevance");
        assert!(!clause.clause.trim().is_empty(), "clause text must not be blank");
    }

    assert_unit_interval(assessment.decision.confidence.value(), "decision confidence");
    assert!(
        !assessment.decision.justification.trim().is_empty(),
        "justification must not be blank"
    );

    if let Some(amount) = assessment.decision.amount {
        assert!(assessment.decision.approved, "amount present on a denial: {}", amount);
        if let Some(claimed) = assessment.query.claim_amount {
            assert!(amount <= claimed, "approved {} exceeds claimed {}", amount, claimed);
        }
    }

    if let Some(claimed) = assessment.query.claim_amount {
        assert!(claimed > rust_decimal::Decimal::ZERO, "claim amount must be positive");
    }
    assert!(!assessment.query.keywords.is_empty(), "keywords must not be empty");
}

/// Asserts the invariants on a serialized success envelope
pub fn assert_envelope_invariants(body: &Value) {
    assert_eq!(body["success"], Value::Bool(true), "envelope not successful: {}", body);
    let data = &body["data"];

    let clauses = data["relevantClauses"]
        .as_array()
        .unwrap_or_else(|| panic!("relevantClauses must be an array: {}", data));
    for clause in clauses {
        let relevance = clause["relevance"]
            .as_f64()
            .unwrap_or_else(|| panic!("relevance must be numeric: {}", clause));
        assert_unit_interval(relevance, "clause relevance");
    }

    let decision = &data["decision"];
    let confidence = decision["confidence"]
        .as_f64()
        .unwrap_or_else(|| panic!("confidence must be numeric: {}", decision));
    assert_unit_interval(confidence, "decision confidence");

    if decision.get("amount").is_some_and(|amount| !amount.is_null()) {
        assert_eq!(decision["approved"], Value::Bool(true), "amount on a denial: {}", decision);
    }

    if let Some(amount) = data["query"].get("claimAmount") {
        let amount = amount
            .as_f64()
            .unwrap_or_else(|| panic!("claimAmount must be numeric: {}", amount));
        assert!(amount > 0.0, "claimAmount must be positive, got {}", amount);
    }
}
