use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct DisburseRequest {
    pub recipient: String,
    pub amount: Decimal,
    pub currency: String,
    pub narration: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisburseResponse {
    pub status: String,
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
}

#[derive(Debug, Serialize)]
pub struct VirtualAccountRequest {
    pub customer: String,
    /// Echoed back in payment webhooks; carries the subject id.
    pub reference: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VirtualAccountResponse {
    #[serde(rename = "bankName")]
    pub bank_name: String,
    #[serde(rename = "accountNumber")]
    pub account_number: String,
    #[serde(rename = "accountName")]
    pub account_name: String,
    pub reference: String,
}
