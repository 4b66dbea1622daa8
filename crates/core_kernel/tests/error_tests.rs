//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::{CompletionError, Score};

#[test]
fn test_core_error_from_score() {
    let error = Score::new(3.0).unwrap_err();
    assert!(matches!(error, CoreError::ScoreOutOfRange(value) if value == 3.0));
    assert!(error.to_string().contains("out of range"));
}

#[test]
fn test_completion_error_display() {
    let quota = CompletionError::classify(Some(429), Some("insufficient_quota"), "no credits");
    assert!(format!("{}", quota).contains("quota"));

    let malformed = CompletionError::malformed("expected object");
    assert!(malformed.to_string().contains("malformed"));
    assert!(!malformed.is_credential_problem());
}
