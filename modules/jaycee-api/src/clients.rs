//! Adapters from the concrete HTTP clients onto the lending collaborator
//! traits.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use jaycee_lending::{
    Disburser, DisbursementReceipt, IdentityVerifier, ScanOutcome, ScanWarning, VirtualAccount,
    VirtualAccountProvider,
};
use rust_decimal::Decimal;
use uuid::Uuid;

pub struct MonoDisburser {
    pub client: Arc<mono_client::MonoClient>,
}

#[async_trait]
impl Disburser for MonoDisburser {
    async fn disburse(&self, user_id: Uuid, amount: Decimal) -> Result<DisbursementReceipt> {
        let payout = self.client.disburse(user_id, amount).await?;
        Ok(DisbursementReceipt {
            transaction_id: payout.transaction_id,
        })
    }
}

pub struct MonoAccounts {
    pub client: Arc<mono_client::MonoClient>,
}

#[async_trait]
impl VirtualAccountProvider for MonoAccounts {
    async fn virtual_account(&self, user_id: Uuid) -> Result<VirtualAccount> {
        let account = self.client.virtual_account(user_id).await?;
        Ok(VirtualAccount {
            bank_name: account.bank_name,
            account_number: account.account_number,
            account_name: account.account_name,
            reference: account.reference,
        })
    }
}

pub struct IdAnalyzerVerifier {
    pub client: Arc<idanalyzer_client::IdAnalyzerClient>,
}

#[async_trait]
impl IdentityVerifier for IdAnalyzerVerifier {
    async fn scan(&self, document: &[u8], face: &[u8]) -> Result<ScanOutcome> {
        let scan = self.client.scan(document, face).await?;
        Ok(ScanOutcome {
            decision: scan.decision.unwrap_or_default(),
            transaction_id: scan.transaction_id,
            warnings: scan
                .warning
                .into_iter()
                .map(|w| ScanWarning {
                    code: w.code,
                    description: w.description,
                })
                .collect(),
        })
    }
}
