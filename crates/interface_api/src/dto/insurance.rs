//! Insurance query DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_assessment::Assessment;

/// Body of `POST /api/insurance`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InsuranceQueryRequest {
    /// Free-form question, for example
    /// "I need to claim $5000 for my medical treatment under my health policy"
    #[validate(required, length(min = 1))]
    pub query: Option<String>,
}

/// Successful response body
#[derive(Debug, Serialize)]
pub struct AssessmentEnvelope {
    pub success: bool,
    pub data: Assessment,
}

impl AssessmentEnvelope {
    pub fn success(data: Assessment) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> InsuranceQueryRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_validation() {
        assert!(request(r#"{"query":"Is dental covered?"}"#).validate().is_ok());
        assert!(request(r#"{"query":""}"#).validate().is_err());
        assert!(request(r#"{}"#).validate().is_err());
        assert!(request(r#"{"query":null}"#).validate().is_err());
    }
}
