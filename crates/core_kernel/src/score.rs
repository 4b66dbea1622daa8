//! Bounded scores
//!
//! Relevance and confidence values are both probabilities in `[0, 1]`.
//! `Score` makes the bound part of the type so a value that reaches a
//! response envelope can never be out of range.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::CoreError;

/// A finite value in the closed interval `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    pub const ZERO: Score = Score(0.0);
    pub const ONE: Score = Score(1.0);

    /// Creates a score, rejecting values outside `[0, 1]`
    pub fn new(value: f64) -> Result<Self, CoreError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::ScoreOutOfRange(value))
        }
    }

    /// Creates a score, pulling finite values into `[0, 1]`
    ///
    /// Returns `None` for NaN and infinities, which carry no usable signal.
    pub fn clamped(value: f64) -> Option<Self> {
        value.is_finite().then(|| Self(value.clamp(0.0, 1.0)))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> f64 {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Reads a raw score from a JSON value
///
/// Accepts numbers and numeric strings. A trailing `%` divides by 100 so
/// `"85%"` reads as `0.85`. The result is not range-checked.
pub fn parse_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let text = text.trim();
            match text.strip_suffix('%') {
                Some(percent) => percent.trim().parse::<f64>().ok().map(|p| p / 100.0),
                None => text.parse::<f64>().ok(),
            }
        }
        _ => None,
    }
    .filter(|score| score.is_finite())
}
