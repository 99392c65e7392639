use serde::{Deserialize, Serialize};

/// Payload for the `/scan` endpoint: base64-encoded images plus the
/// verification profile to score them against.
#[derive(Debug, Serialize)]
pub struct ScanRequest {
    pub profile: String,
    pub document: String,
    pub face: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanResponse {
    /// "accept", "reject" or "review".
    #[serde(default)]
    pub decision: Option<String>,
    #[serde(rename = "transactionId")]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub warning: Vec<Warning>,
    /// Set instead of a decision when the provider could not process
    /// the scan at all.
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Warning {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_an_accept_response() {
        let body = r#"{
            "decision": "accept",
            "transactionId": "abc123",
            "warning": []
        }"#;
        let resp: ScanResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.decision.as_deref(), Some("accept"));
        assert_eq!(resp.transaction_id.as_deref(), Some("abc123"));
        assert!(resp.warning.is_empty());
        assert!(resp.error.is_none());
    }

    #[test]
    fn parses_a_reject_with_warnings() {
        let body = r#"{
            "decision": "reject",
            "transactionId": "abc124",
            "warning": [
                {"code": "FACE_MISMATCH", "description": "Face does not match document"}
            ]
        }"#;
        let resp: ScanResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.decision.as_deref(), Some("reject"));
        assert_eq!(resp.warning.len(), 1);
        assert_eq!(resp.warning[0].code, "FACE_MISMATCH");
    }

    #[test]
    fn parses_an_error_body_without_decision() {
        let body = r#"{"error": {"code": "INVALID_IMAGE", "message": "Unreadable document"}}"#;
        let resp: ScanResponse = serde_json::from_str(body).unwrap();
        assert!(resp.decision.is_none());
        let err = resp.error.unwrap();
        assert_eq!(err.message.as_deref(), Some("Unreadable document"));
    }
}
