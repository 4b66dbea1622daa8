//! Instruction prompts for the three pipeline stages.
//!
//! Each stage sends a fixed system prompt plus a user prompt built from the
//! request. All three ask for a single JSON object so the completion call
//! can use JSON response mode.

use crate::clause::Clause;
use crate::query::ParsedQuery;

/// System prompt for the query interpreter.
pub const INTERPRET_SYSTEM_PROMPT: &str = r#"You are an insurance query analyst. You read customer queries and extract structured information from them.

Output format (JSON only, no extra text):
{
  "type": "claim" | "inquiry" | "dispute" | "renewal" | "cancellation" | "other",
  "claimAmount": number or null,
  "policyType": "health" | "auto" | "home" | "life" | "travel" | "other",
  "keywords": ["keyword 1", "keyword 2"]
}

Use null for claimAmount when the query does not mention a monetary amount. Give at least one keyword."#;

/// System prompt for the clause retriever.
pub const RETRIEVE_SYSTEM_PROMPT: &str = r#"You are an insurance policy librarian. Given a structured query, you quote the policy clauses that bear on it.

Output format (JSON only, no extra text):
{
  "clauses": [
    { "clause": "verbatim clause text", "relevance": number between 0 and 1, "source": "document and section" }
  ]
}

Return between 3 and 5 clauses, most relevant first."#;

/// System prompt for the decision evaluator.
pub const EVALUATE_SYSTEM_PROMPT: &str = r#"You are an insurance claims adjudicator. You decide queries strictly on the policy clauses you are given.

Output format (JSON only, no extra text):
{
  "approved": true | false,
  "amount": number or null,
  "justification": "why the clauses lead to this decision",
  "confidence": number between 0 and 1
}

Only give an amount when approving a monetary claim, and never more than the amount claimed."#;

/// Builds the interpreter prompt around the raw query text.
pub fn interpret_prompt(query: &str) -> String {
    format!(
        "Parse the following insurance query and extract its key information.\n\nQuery: \"{}\"",
        query.trim()
    )
}

/// Builds the retriever prompt from a parsed query.
pub fn retrieve_prompt(parsed: &ParsedQuery) -> String {
    let amount = parsed
        .claim_amount
        .map(|amount| amount.to_string())
        .unwrap_or_else(|| "not stated".to_string());

    format!(
        "Find the policy clauses relevant to this query.\n\n\
         Query type: {}\n\
         Policy type: {}\n\
         Claim amount: {}\n\
         Keywords: {}",
        parsed.query_type.as_str(),
        parsed.policy_type,
        amount,
        parsed.keywords.join(", "),
    )
}

/// Builds the evaluator prompt from the parsed query and retrieved clauses.
pub fn evaluate_prompt(parsed: &ParsedQuery, clauses: &[Clause]) -> String {
    let query_json = serde_json::to_string_pretty(parsed).unwrap_or_default();

    let references = if clauses.is_empty() {
        "(no relevant clauses were found)".to_string()
    } else {
        clauses
            .iter()
            .enumerate()
            .map(|(i, clause)| {
                format!(
                    "{}. [{}] (relevance {}) {}",
                    i + 1,
                    clause.source,
                    clause.relevance,
                    clause.clause
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Evaluate this insurance query against the policy clauses below.\n\n\
         Query:\n{}\n\n\
         Policy clauses:\n{}",
        query_json, references
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryType;
    use core_kernel::Score;
    use rust_decimal::Decimal;

    fn parsed() -> ParsedQuery {
        ParsedQuery {
            query_type: QueryType::Claim,
            claim_amount: Some(Decimal::from(5000)),
            policy_type: "health".to_string(),
            keywords: vec!["medical".to_string(), "expenses".to_string()],
        }
    }

    #[test]
    fn test_interpret_prompt_embeds_query() {
        let prompt = interpret_prompt("  I need to claim $5000  ");
        assert!(prompt.ends_with("Query: \"I need to claim $5000\""));
    }

    #[test]
    fn test_retrieve_prompt_lists_fields() {
        let prompt = retrieve_prompt(&parsed());
        assert!(prompt.contains("Policy type: health"));
        assert!(prompt.contains("Claim amount: 5000"));
        assert!(prompt.contains("Keywords: medical, expenses"));

        let no_amount = ParsedQuery { claim_amount: None, ..parsed() };
        assert!(retrieve_prompt(&no_amount).contains("Claim amount: not stated"));
    }

    #[test]
    fn test_evaluate_prompt_numbers_clauses() {
        let clauses = vec![
            Clause::new("Inpatient care is covered.", Score::new(0.9).unwrap(), "§4.1"),
            Clause::new("Dental is excluded.", Score::new(0.3).unwrap(), "§7.2"),
        ];
        let prompt = evaluate_prompt(&parsed(), &clauses);
        assert!(prompt.contains("1. [§4.1] (relevance 0.90) Inpatient care is covered."));
        assert!(prompt.contains("2. [§7.2] (relevance 0.30) Dental is excluded."));
        assert!(prompt.contains("\"policyType\": \"health\""));
    }

    #[test]
    fn test_evaluate_prompt_without_clauses() {
        let prompt = evaluate_prompt(&parsed(), &[]);
        assert!(prompt.contains("(no relevant clauses were found)"));
    }
}
