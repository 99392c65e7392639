pub mod error;
pub mod types;

pub use error::{MonoError, Result};
pub use types::{DisburseRequest, DisburseResponse, VirtualAccountRequest, VirtualAccountResponse};

use std::time::Duration;

use rust_decimal::Decimal;
use uuid::Uuid;

/// Client for the Mono payments API: payouts to borrowers and repayment
/// virtual accounts. Bounded timeout, no retries.
pub struct MonoClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MonoClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Push approved funds to a borrower. Anything but a "successful"
    /// payout status is an error; the caller must not activate the loan.
    pub async fn disburse(&self, user_id: Uuid, amount: Decimal) -> Result<DisburseResponse> {
        let request = DisburseRequest {
            recipient: user_id.to_string(),
            amount,
            currency: "NGN".to_string(),
            narration: "Loan disbursement".to_string(),
        };

        let resp = self
            .client
            .post(format!("{}/v1/payouts", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(MonoError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payout: DisburseResponse = resp.json().await?;
        if payout.status != "successful" {
            return Err(MonoError::DisbursementFailed(payout.status));
        }
        tracing::debug!(transaction_id = %payout.transaction_id, "Payout accepted");
        Ok(payout)
    }

    /// Create (or fetch) the virtual account a borrower repays into. The
    /// reference embeds the subject id so the repayment webhook can
    /// resolve the borrower: `loan_repay_<userId>_<millis>`.
    pub async fn virtual_account(&self, user_id: Uuid) -> Result<VirtualAccountResponse> {
        let reference = format!(
            "loan_repay_{user_id}_{}",
            chrono::Utc::now().timestamp_millis()
        );
        let request = VirtualAccountRequest {
            customer: user_id.to_string(),
            reference,
        };

        let resp = self
            .client
            .post(format!("{}/v1/accounts/virtual", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(MonoError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }
}
