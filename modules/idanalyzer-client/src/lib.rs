pub mod error;
pub mod types;

pub use error::{IdAnalyzerError, Result};
pub use types::{ScanRequest, ScanResponse, Warning};

use std::time::Duration;

use base64::Engine;

/// Client for the IDAnalyzer `/scan` endpoint. One bounded-timeout call
/// per scan, no retries; retry policy belongs to the caller.
pub struct IdAnalyzerClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    profile_id: String,
}

impl IdAnalyzerClient {
    pub fn new(base_url: &str, api_key: &str, profile_id: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            profile_id: profile_id.to_string(),
        }
    }

    /// Submit a document image and a live face capture for verification.
    pub async fn scan(&self, document: &[u8], face: &[u8]) -> Result<ScanResponse> {
        let engine = base64::engine::general_purpose::STANDARD;
        let request = ScanRequest {
            profile: self.profile_id.clone(),
            document: engine.encode(document),
            face: engine.encode(face),
        };

        let resp = self
            .client
            .post(format!("{}/scan", self.base_url))
            .header("X-API-KEY", &self.api_key)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IdAnalyzerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let scan: ScanResponse = resp.json().await?;
        tracing::debug!(decision = ?scan.decision, "IDAnalyzer scan complete");
        if let Some(err) = &scan.error {
            return Err(IdAnalyzerError::Provider(
                err.message
                    .clone()
                    .or_else(|| err.code.clone())
                    .unwrap_or_else(|| "unspecified provider error".to_string()),
            ));
        }

        Ok(scan)
    }
}
