use chrono::{DateTime, Utc};
use jaycee_common::{LendError, Loan, Result};
use jaycee_store::loans::Settlement;
use jaycee_store::LoanStore;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Asynchronous payment notification from the payments provider.
/// Delivery is at-least-once; the transaction id is the dedup key.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentNotification {
    pub transaction_id: String,
    pub amount: Decimal,
    pub reference: String,
    pub status: String,
}

/// On-time repayment raises the score, late repayment lowers it.
pub const SCORE_STEP: i32 = 50;

/// Extract the subject id from a repayment reference of the form
/// `loan_repay_<userId>_<nonce>` (third underscore-delimited segment).
pub fn subject_from_reference(reference: &str) -> Option<Uuid> {
    let parts: Vec<&str> = reference.split('_').collect();
    if parts.len() < 3 {
        return None;
    }
    parts[2].parse().ok()
}

/// Credit-score adjustment for a repayment observed at `now`.
pub fn score_delta(now: DateTime<Utc>, due_date: DateTime<Utc>) -> i32 {
    if now > due_date {
        -SCORE_STEP
    } else {
        SCORE_STEP
    }
}

/// Finalizes loans from payment notifications.
pub struct Reconciler {
    loans: LoanStore,
}

impl Reconciler {
    pub fn new(loans: LoanStore) -> Self {
        Self { loans }
    }

    /// Apply a payment notification. Every failure path leaves loan and
    /// borrower untouched; the settlement itself is one transaction keyed
    /// on the provider transaction id, so replays and racing duplicate
    /// deliveries cannot double-process.
    pub async fn process(&self, notification: PaymentNotification) -> Result<Loan> {
        if notification.status != "successful" {
            return Err(LendError::validation("Payment not successful"));
        }

        let user_id = subject_from_reference(&notification.reference)
            .ok_or_else(|| LendError::validation("Invalid payment reference format"))?;

        let loan = self
            .loans
            .find_active(user_id)
            .await?
            .ok_or_else(|| LendError::not_found("No active loan found for user"))?;

        if notification.amount < loan.total_payable {
            return Err(LendError::validation("Insufficient payment amount"));
        }

        let now = Utc::now();
        let delta = score_delta(now, loan.due_date);

        let settled = self
            .loans
            .settle(Settlement {
                transaction_id: notification.transaction_id.clone(),
                loan_id: loan.id,
                user_id,
                amount: notification.amount,
                reference: notification.reference.clone(),
                paid_at: now,
                score_delta: delta,
            })
            .await?;

        info!(
            %user_id,
            loan_id = %settled.id,
            transaction_id = %notification.transaction_id,
            late = delta < 0,
            "Loan repaid"
        );

        Ok(settled)
    }
}
