//! Approve/deny verdicts

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use core_kernel::{parse_amount, parse_score, positive_amount, Score};

/// Verdict on a parsed query
///
/// `amount` is only ever present on an approval, and never exceeds the
/// claimed amount when one was extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub approved: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount: Option<Decimal>,
    pub justification: String,
    pub confidence: Score,
}

impl Decision {
    /// Creates an approval
    pub fn approve(amount: Option<Decimal>, justification: impl Into<String>, confidence: Score) -> Self {
        Self {
            approved: true,
            amount,
            justification: justification.into(),
            confidence,
        }
    }

    /// Creates a denial
    pub fn deny(justification: impl Into<String>, confidence: Score) -> Self {
        Self {
            approved: false,
            amount: None,
            justification: justification.into(),
            confidence,
        }
    }

    /// Validates the evaluator's JSON answer
    ///
    /// `claim_amount` is the amount the interpreter extracted, used to cap
    /// an approved amount.
    pub fn from_completion(value: Value, claim_amount: Option<Decimal>) -> Result<Self, String> {
        let Value::Object(map) = value else {
            return Err("expected a decision object".to_string());
        };

        let approved = map
            .get("approved")
            .and_then(read_verdict)
            .ok_or_else(|| "missing approved verdict".to_string())?;

        let justification = ["justification", "reasoning", "reason"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| "missing justification".to_string())?
            .to_string();

        let raw_confidence = map
            .get("confidence")
            .and_then(parse_score)
            .ok_or_else(|| "missing numeric confidence".to_string())?;
        let confidence = Score::clamped(raw_confidence)
            .ok_or_else(|| "missing numeric confidence".to_string())?;
        if confidence.value() != raw_confidence {
            warn!(raw_confidence, "Clamped decision confidence into [0, 1]");
        }

        let amount = ["amount", "approvedAmount"]
            .iter()
            .find_map(|key| map.get(*key).and_then(parse_amount));
        let amount = settle_amount(approved, positive_amount(amount), claim_amount);

        Ok(Self {
            approved,
            amount,
            justification,
            confidence,
        })
    }
}

fn read_verdict(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.trim().to_lowercase().as_str() {
            "true" | "yes" | "approved" | "approve" => Some(true),
            "false" | "no" | "denied" | "deny" | "rejected" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Applies the amount invariants to a verdict
fn settle_amount(approved: bool, amount: Option<Decimal>, claim_amount: Option<Decimal>) -> Option<Decimal> {
    match (approved, amount, claim_amount) {
        (false, Some(dropped), _) => {
            warn!(amount = %dropped, "Dropping amount attached to a denial");
            None
        }
        (true, Some(awarded), Some(claimed)) if awarded > claimed => {
            warn!(awarded = %awarded, claimed = %claimed, "Capping approved amount at claimed amount");
            Some(claimed)
        }
        (_, amount, _) => amount,
    }
}
