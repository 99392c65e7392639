use std::sync::Arc;

use chrono::Utc;
use jaycee_common::{LendError, Loan, LoanStatus, Result};
use jaycee_credit::{evaluate, BorrowerSnapshot, Eligibility};
use jaycee_store::loans::NewLoan;
use jaycee_store::{AuditLog, LoanStore, UserStore};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

const CURRENCY: &str = "NGN";

/// What a borrower needs to settle their active loan.
#[derive(Debug, Clone, Serialize)]
pub struct RepaymentDetails {
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    pub amount_to_pay: Decimal,
    pub reference: String,
    pub transaction_id: String,
}

/// Owns loan state transitions. Calls the eligibility engine, the stores,
/// and the disbursement collaborator; appends an audit record on every
/// successful mutation.
pub struct LoanService {
    users: UserStore,
    loans: LoanStore,
    audit: AuditLog,
    disburser: Arc<dyn crate::Disburser>,
    accounts: Arc<dyn crate::VirtualAccountProvider>,
}

impl LoanService {
    pub fn new(
        users: UserStore,
        loans: LoanStore,
        audit: AuditLog,
        disburser: Arc<dyn crate::Disburser>,
        accounts: Arc<dyn crate::VirtualAccountProvider>,
    ) -> Self {
        Self {
            users,
            loans,
            audit,
            disburser,
            accounts,
        }
    }

    /// Create a PENDING loan for the subject if the eligibility policy
    /// approves the request.
    pub async fn request_loan(&self, user_id: Uuid, amount: Decimal) -> Result<Loan> {
        if amount <= Decimal::ZERO {
            return Err(LendError::validation("Invalid loan amount"));
        }

        let user = self
            .users
            .find(user_id)
            .await?
            .ok_or_else(|| LendError::not_found("User not found"))?;
        let open_loan = self.loans.find_open(user_id).await?;

        let snapshot = BorrowerSnapshot {
            kyc_verified: user.kyc_verified,
            credit_score: user.credit_score,
            has_open_loan: open_loan.is_some(),
        };

        let offer = match evaluate(&snapshot, amount, Utc::now()) {
            Eligibility::Approved(offer) => offer,
            Eligibility::Declined(message) => return Err(LendError::conflict(message)),
        };

        // The partial unique index backstops the open-loan check above if
        // two requests race past it.
        let loan = self
            .loans
            .create(NewLoan {
                user_id,
                amount,
                approved_amount: offer.approved_amount,
                interest_rate: offer.interest_rate,
                total_payable: offer.total_payable,
                due_date: offer.due_date,
                currency: CURRENCY.to_string(),
            })
            .await?;

        info!(%user_id, loan_id = %loan.id, %amount, "Loan requested");
        self.audit
            .record(
                user_id,
                "Requested a loan",
                Some(&format!("Loan of \u{20a6}{amount} requested")),
            )
            .await;

        Ok(loan)
    }

    /// Disburse and activate a PENDING loan owned by the subject. Returns
    /// the updated loan and the disbursement transaction id.
    pub async fn approve_loan(&self, user_id: Uuid, loan_id: Uuid) -> Result<(Loan, String)> {
        let loan = self
            .loans
            .find_for_user(loan_id, user_id)
            .await?
            .ok_or_else(|| LendError::not_found("Loan not found or not associated with user"))?;

        if loan.status != LoanStatus::Pending {
            return Err(LendError::conflict("Only pending loans can be approved"));
        }

        // Disburse first; the loan only turns ACTIVE once funds went out.
        let receipt = self
            .disburser
            .disburse(user_id, loan.approved_amount)
            .await
            .map_err(|e| {
                tracing::warn!(%loan_id, error = %e, "Disbursement failed");
                LendError::upstream("Failed to disburse funds")
            })?;

        let updated = self.loans.mark_active(loan_id).await?;

        info!(%user_id, %loan_id, transaction_id = %receipt.transaction_id, "Loan approved and disbursed");
        self.audit
            .record(
                user_id,
                "Approved Loan",
                Some(&format!("Loan {loan_id} approved & disbursed")),
            )
            .await;

        Ok((updated, receipt.transaction_id))
    }

    /// Virtual-account details plus the outstanding amount for the
    /// subject's ACTIVE loan.
    pub async fn repayment_details(&self, user_id: Uuid) -> Result<RepaymentDetails> {
        let loan = self
            .loans
            .find_active(user_id)
            .await?
            .ok_or_else(|| LendError::not_found("No active loan found"))?;

        let account = self
            .accounts
            .virtual_account(user_id)
            .await
            .map_err(|e| {
                tracing::warn!(%user_id, error = %e, "Virtual account lookup failed");
                LendError::upstream("Failed to fetch repayment details")
            })?;

        Ok(RepaymentDetails {
            bank_name: account.bank_name,
            account_number: account.account_number,
            account_name: account.account_name,
            amount_to_pay: loan.total_payable,
            reference: account.reference,
            transaction_id: format!("txn_{}", Utc::now().timestamp_millis()),
        })
    }

    /// All of the subject's loans, newest first.
    pub async fn history(&self, user_id: Uuid) -> Result<Vec<Loan>> {
        self.loans.history(user_id).await
    }
}
