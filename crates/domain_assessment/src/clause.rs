//! Policy clause excerpts

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use core_kernel::{parse_score, Score};

/// Source label used when the model does not give one
pub const UNSPECIFIED_SOURCE: &str = "unspecified";

/// A short excerpt of policy text with a relevance score and provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Excerpt text; never blank
    pub clause: String,
    pub relevance: Score,
    /// Document or section the excerpt is attributed to
    pub source: String,
}

impl Clause {
    pub fn new(clause: impl Into<String>, relevance: Score, source: impl Into<String>) -> Self {
        Self {
            clause: clause.into(),
            relevance,
            source: source.into(),
        }
    }

    /// Validates the retriever's JSON answer
    ///
    /// Accepts either a bare array or an object holding the array under
    /// `clauses` or `relevantClauses`. Entries with blank text are dropped;
    /// relevance outside `[0, 1]` is clamped. An entry without a numeric
    /// relevance makes the whole answer malformed.
    pub fn list_from_completion(value: Value) -> Result<Vec<Clause>, String> {
        let entries = match value {
            Value::Array(entries) => entries,
            Value::Object(mut map) => match map
                .remove("clauses")
                .or_else(|| map.remove("relevantClauses"))
            {
                Some(Value::Array(entries)) => entries,
                Some(_) => return Err("clauses must be an array".to_string()),
                None => return Err("missing clauses array".to_string()),
            },
            _ => return Err("expected an object or array of clauses".to_string()),
        };

        let mut clauses = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            if let Some(clause) = Self::from_entry(index, entry)? {
                clauses.push(clause);
            }
        }
        Ok(clauses)
    }

    fn from_entry(index: usize, entry: Value) -> Result<Option<Clause>, String> {
        let Value::Object(map) = entry else {
            return Err(format!("clause {} is not an object", index));
        };

        let text = ["clause", "text", "excerpt"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .unwrap_or_default();
        if text.is_empty() {
            warn!(index, "Dropping clause with blank text");
            return Ok(None);
        }

        let raw_relevance = ["relevance", "score"]
            .iter()
            .find_map(|key| map.get(*key).and_then(parse_score))
            .ok_or_else(|| format!("clause {} has no numeric relevance", index))?;
        let relevance = Score::clamped(raw_relevance)
            .ok_or_else(|| format!("clause {} has no numeric relevance", index))?;
        if relevance.value() != raw_relevance {
            warn!(index, raw_relevance, "Clamped clause relevance into [0, 1]");
        }

        let source = map
            .get("source")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|source| !source.is_empty())
            .unwrap_or(UNSPECIFIED_SOURCE);

        Ok(Some(Clause::new(text, relevance, source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_wrapper() {
        let clauses = Clause::list_from_completion(json!({
            "clauses": [
                { "clause": "Hospitalization is covered up to $10,000.", "relevance": 0.9, "source": "Health Policy §4.1" },
                { "clause": "Cosmetic procedures are excluded.", "relevance": 0.4, "source": "Health Policy §7.2" }
            ]
        }))
        .unwrap();

        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].source, "Health Policy §4.1");
        assert_eq!(clauses[1].relevance.value(), 0.4);
    }

    #[test]
    fn test_bare_array_and_aliases() {
        let clauses = Clause::list_from_completion(json!([
            { "text": "Theft is covered.", "score": "75%" }
        ]))
        .unwrap();

        assert_eq!(clauses[0].clause, "Theft is covered.");
        assert_eq!(clauses[0].relevance.value(), 0.75);
        assert_eq!(clauses[0].source, UNSPECIFIED_SOURCE);
    }

    #[test]
    fn test_blank_clauses_dropped_and_scores_clamped() {
        let clauses = Clause::list_from_completion(json!({
            "relevantClauses": [
                { "clause": "   ", "relevance": 0.9, "source": "A" },
                { "clause": "Flood damage excluded.", "relevance": 7, "source": "B" }
            ]
        }))
        .unwrap();

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].relevance, Score::ONE);
    }

    #[test]
    fn test_empty_list_is_valid() {
        let clauses = Clause::list_from_completion(json!({ "clauses": [] })).unwrap();
        assert!(clauses.is_empty());
    }

    #[test]
    fn test_malformed_shapes() {
        assert!(Clause::list_from_completion(json!({ "items": [] })).is_err());
        assert!(Clause::list_from_completion(json!({ "clauses": "none" })).is_err());
        assert!(Clause::list_from_completion(json!("text")).is_err());
        assert!(Clause::list_from_completion(json!([42])).is_err());

        let no_score = Clause::list_from_completion(json!([{ "clause": "x", "relevance": "high" }]));
        assert_eq!(no_score.unwrap_err(), "clause 0 has no numeric relevance");
    }
}
