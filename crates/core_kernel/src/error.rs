//! Core error types used across the system

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Score out of range: {0}")]
    ScoreOutOfRange(f64),
}
