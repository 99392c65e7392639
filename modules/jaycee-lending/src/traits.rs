use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Receipt from a successful fund disbursement.
#[derive(Debug, Clone)]
pub struct DisbursementReceipt {
    pub transaction_id: String,
}

/// Pushes approved funds to the borrower. Failure must leave no trace;
/// the caller only activates the loan after a receipt comes back.
#[async_trait]
pub trait Disburser: Send + Sync {
    async fn disburse(&self, user_id: Uuid, amount: Decimal) -> Result<DisbursementReceipt>;
}

/// Virtual account details a borrower pays into.
#[derive(Debug, Clone)]
pub struct VirtualAccount {
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    /// Carries the subject id in its third underscore-delimited segment;
    /// the repayment webhook resolves the borrower from it.
    pub reference: String,
}

#[async_trait]
pub trait VirtualAccountProvider: Send + Sync {
    async fn virtual_account(&self, user_id: Uuid) -> Result<VirtualAccount>;
}

#[derive(Debug, Clone)]
pub struct ScanWarning {
    pub code: String,
    pub description: String,
}

/// Raw outcome of a document + face scan at the verification provider.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Provider decision string: "accept", "reject", "review", or other.
    pub decision: String,
    pub transaction_id: Option<String>,
    pub warnings: Vec<ScanWarning>,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn scan(&self, document: &[u8], face: &[u8]) -> Result<ScanOutcome>;
}
