//! Structured form of a free-text query

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use core_kernel::{parse_amount, positive_amount};

/// Policy type used when the model does not name one
pub const UNSPECIFIED_POLICY: &str = "unspecified";

/// What the customer is asking for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QueryType {
    /// A request to be paid under a policy
    Claim,
    /// A question about coverage
    Inquiry,
    /// A challenge to an earlier decision
    Dispute,
    Renewal,
    Cancellation,
    /// Any other label, kept verbatim
    Other(String),
}

impl QueryType {
    pub fn as_str(&self) -> &str {
        match self {
            QueryType::Claim => "claim",
            QueryType::Inquiry => "inquiry",
            QueryType::Dispute => "dispute",
            QueryType::Renewal => "renewal",
            QueryType::Cancellation => "cancellation",
            QueryType::Other(label) => label,
        }
    }
}

impl From<String> for QueryType {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "claim" => QueryType::Claim,
            "inquiry" | "enquiry" => QueryType::Inquiry,
            "dispute" => QueryType::Dispute,
            "renewal" => QueryType::Renewal,
            "cancellation" => QueryType::Cancellation,
            _ => QueryType::Other(label.trim().to_string()),
        }
    }
}

impl From<&str> for QueryType {
    fn from(label: &str) -> Self {
        QueryType::from(label.to_string())
    }
}

impl From<QueryType> for String {
    fn from(query_type: QueryType) -> String {
        query_type.as_str().to_string()
    }
}

/// The interpreter's reading of a query
///
/// Serialized with the field names the response envelope uses
/// (`type`, `claimAmount`, `policyType`, `keywords`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    #[serde(rename = "type")]
    pub query_type: QueryType,
    /// Amount claimed; always positive when present
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub claim_amount: Option<Decimal>,
    pub policy_type: String,
    /// Never empty
    pub keywords: Vec<String>,
}

/// Completion output before validation
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawParsedQuery {
    #[serde(rename = "type", alias = "queryType", alias = "query_type")]
    query_type: Option<String>,
    #[serde(alias = "claim_amount", alias = "amount")]
    claim_amount: Value,
    #[serde(alias = "policy_type")]
    policy_type: Option<String>,
    keywords: Vec<Value>,
}

impl ParsedQuery {
    /// Validates the interpreter's JSON answer
    ///
    /// Non-positive amounts are discarded, blank keywords are dropped and a
    /// missing policy type becomes [`UNSPECIFIED_POLICY`]. A missing query
    /// type or an empty keyword list is an error.
    pub fn from_completion(value: Value) -> Result<Self, String> {
        let raw: RawParsedQuery = serde_json::from_value(value)
            .map_err(|e| format!("expected a query object: {}", e))?;

        let query_type = raw
            .query_type
            .filter(|label| !label.trim().is_empty())
            .map(QueryType::from)
            .ok_or_else(|| "missing query type".to_string())?;

        let parsed_amount = parse_amount(&raw.claim_amount);
        let claim_amount = positive_amount(parsed_amount);
        if parsed_amount.is_some() && claim_amount.is_none() {
            warn!(amount = ?parsed_amount, "Discarding non-positive claim amount");
        }

        let policy_type = raw
            .policy_type
            .map(|policy| policy.trim().to_string())
            .filter(|policy| !policy.is_empty())
            .unwrap_or_else(|| UNSPECIFIED_POLICY.to_string());

        let keywords: Vec<String> = raw
            .keywords
            .into_iter()
            .filter_map(|keyword| match keyword {
                Value::String(text) => Some(text.trim().to_string()),
                _ => None,
            })
            .filter(|keyword| !keyword.is_empty())
            .collect();

        if keywords.is_empty() {
            return Err("no keywords extracted".to_string());
        }

        Ok(Self {
            query_type,
            claim_amount,
            policy_type,
            keywords,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_type_normalisation() {
        assert_eq!(QueryType::from("Claim"), QueryType::Claim);
        assert_eq!(QueryType::from(" ENQUIRY "), QueryType::Inquiry);
        assert_eq!(
            QueryType::from("complaint"),
            QueryType::Other("complaint".to_string())
        );
        assert_eq!(String::from(QueryType::Other("complaint".into())), "complaint");
    }

    #[test]
    fn test_from_completion_happy_path() {
        let parsed = ParsedQuery::from_completion(json!({
            "type": "claim",
            "claimAmount": 5000,
            "policyType": "health",
            "keywords": ["medical", "expenses"]
        }))
        .unwrap();

        assert_eq!(parsed.query_type, QueryType::Claim);
        assert_eq!(parsed.claim_amount, Some(Decimal::from(5000)));
        assert_eq!(parsed.policy_type, "health");
        assert_eq!(parsed.keywords, vec!["medical", "expenses"]);
    }

    #[test]
    fn test_from_completion_accepts_snake_case_and_strings() {
        let parsed = ParsedQuery::from_completion(json!({
            "query_type": "inquiry",
            "claim_amount": "$1,200",
            "policy_type": "auto",
            "keywords": ["collision", 42, "  "]
        }))
        .unwrap();

        assert_eq!(parsed.query_type, QueryType::Inquiry);
        assert_eq!(parsed.claim_amount, Some(Decimal::from(1200)));
        assert_eq!(parsed.keywords, vec!["collision"]);
    }

    #[test]
    fn test_non_positive_amount_is_dropped() {
        let parsed = ParsedQuery::from_completion(json!({
            "type": "claim",
            "claimAmount": -10,
            "policyType": "home",
            "keywords": ["roof"]
        }))
        .unwrap();
        assert_eq!(parsed.claim_amount, None);
    }

    #[test]
    fn test_missing_policy_type_defaults() {
        let parsed = ParsedQuery::from_completion(json!({
            "type": "inquiry",
            "keywords": ["coverage"]
        }))
        .unwrap();
        assert_eq!(parsed.policy_type, UNSPECIFIED_POLICY);
        assert_eq!(parsed.claim_amount, None);
    }

    #[test]
    fn test_rejects_missing_type_and_empty_keywords() {
        let no_type = ParsedQuery::from_completion(json!({ "keywords": ["x"] }));
        assert_eq!(no_type.unwrap_err(), "missing query type");

        let no_keywords = ParsedQuery::from_completion(json!({
            "type": "claim",
            "keywords": []
        }));
        assert_eq!(no_keywords.unwrap_err(), "no keywords extracted");

        assert!(ParsedQuery::from_completion(json!(["not", "an", "object"])).is_err());
    }

    #[test]
    fn test_serializes_with_envelope_field_names() {
        let parsed = ParsedQuery {
            query_type: QueryType::Claim,
            claim_amount: Some(Decimal::from(5000)),
            policy_type: "health".to_string(),
            keywords: vec!["medical".to_string()],
        };
        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["type"], "claim");
        assert_eq!(value["claimAmount"].as_f64(), Some(5000.0));
        assert_eq!(value["policyType"], "health");

        let without_amount = ParsedQuery { claim_amount: None, ..parsed };
        let value = serde_json::to_value(&without_amount).unwrap();
        assert!(value.get("claimAmount").is_none());
    }
}
