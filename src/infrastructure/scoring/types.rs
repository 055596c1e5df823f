//! Wire types for the scoring generation endpoint.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateApiRequest {
    pub model: String,
    pub prompt: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// The pipeline always consumes complete responses.
    pub stream: bool,
}

/// Response body from `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateApiResponse {
    #[serde(default)]
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_skips_absent_system() {
        let request = GenerateApiRequest {
            model: "scorer".into(),
            prompt: "grade this".into(),
            system: None,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system").is_none());
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_response_tolerates_extra_fields() {
        let response: GenerateApiResponse = serde_json::from_str(
            r#"{"response":"87","model":"scorer","done":true,"total_duration":12}"#,
        )
        .unwrap();
        assert_eq!(response.response, "87");
    }
}
