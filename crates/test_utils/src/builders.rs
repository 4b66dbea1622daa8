//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out the fields they
//! care about.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Score;
use domain_assessment::{Clause, ParsedQuery, QueryType};

/// Builder for [`ParsedQuery`], defaulting to a $5,000 health claim
#[derive(Debug, Clone)]
pub struct ParsedQueryBuilder {
    query_type: QueryType,
    claim_amount: Option<Decimal>,
    policy_type: String,
    keywords: Vec<String>,
}

impl Default for ParsedQueryBuilder {
    fn default() -> Self {
        Self {
            query_type: QueryType::Claim,
            claim_amount: Some(dec!(5000)),
            policy_type: "health".to_string(),
            keywords: vec!["medical".to_string(), "expenses".to_string()],
        }
    }
}

impl ParsedQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_type(mut self, query_type: impl Into<QueryType>) -> Self {
        self.query_type = query_type.into();
        self
    }

    pub fn claim_amount(mut self, amount: Decimal) -> Self {
        self.claim_amount = Some(amount);
        self
    }

    pub fn without_amount(mut self) -> Self {
        self.claim_amount = None;
        self
    }

    pub fn policy_type(mut self, policy_type: &str) -> Self {
        self.policy_type = policy_type.to_string();
        self
    }

    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn build(self) -> ParsedQuery {
        ParsedQuery {
            query_type: self.query_type,
            claim_amount: self.claim_amount,
            policy_type: self.policy_type,
            keywords: self.keywords,
        }
    }
}

/// Builds clauses from `(text, relevance, source)` triples
///
/// # Panics
///
/// Panics if a relevance is outside `[0, 1]`.
pub fn clauses(entries: &[(&str, f64, &str)]) -> Vec<Clause> {
    entries
        .iter()
        .map(|(text, relevance, source)| {
            Clause::new(
                *text,
                Score::new(*relevance).expect("fixture relevance out of range"),
                *source,
            )
        })
        .collect()
}
