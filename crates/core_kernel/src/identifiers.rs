//! Strongly-typed identifiers
//!
//! Assessments are request-scoped and never stored, so the only identifier the
//! system mints is the one used to correlate the log lines of a single run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const ASSESSMENT_PREFIX: &str = "ASM";

/// Identifier attached to one run of the assessment pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(Uuid);

impl AssessmentId {
    /// Creates a new time-ordered identifier (v7)
    pub fn new_v7() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the identifier prefix for display
    pub fn prefix() -> &'static str {
        ASSESSMENT_PREFIX
    }
}

impl Default for AssessmentId {
    fn default() -> Self {
        Self::new_v7()
    }
}

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", ASSESSMENT_PREFIX, self.0)
    }
}

impl FromStr for AssessmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid_str = s
            .strip_prefix(ASSESSMENT_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .unwrap_or(s);
        Ok(Self(Uuid::parse_str(uuid_str)?))
    }
}

impl From<Uuid> for AssessmentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_id_display() {
        let id = AssessmentId::new_v7();
        assert!(id.to_string().starts_with("ASM-"));
    }

    #[test]
    fn test_id_parsing_with_and_without_prefix() {
        let original = AssessmentId::new_v7();
        let parsed: AssessmentId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);

        let bare: AssessmentId = original.as_uuid().to_string().parse().unwrap();
        assert_eq!(original, bare);
    }
}
