use chrono::{DateTime, Utc};
use jaycee_common::{LendError, Loan, LoanStatus, Result};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const LOAN_COLUMNS: &str = "id, user_id, amount, approved_amount, interest_rate, \
     total_payable, due_date, status, currency, created_at, paid_at";

/// Parameters for inserting a new loan in PENDING.
pub struct NewLoan {
    pub user_id: Uuid,
    pub amount: Decimal,
    pub approved_amount: Decimal,
    pub interest_rate: Decimal,
    pub total_payable: Decimal,
    pub due_date: DateTime<Utc>,
    pub currency: String,
}

/// Parameters for the reconciliation transaction.
pub struct Settlement {
    pub transaction_id: String,
    pub loan_id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub reference: String,
    pub paid_at: DateTime<Utc>,
    pub score_delta: i32,
}

#[derive(Clone)]
pub struct LoanStore {
    pool: PgPool,
}

impl LoanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a loan in PENDING. The partial unique index on open loans is
    /// the race-proof guard; a violation maps to the same conflict message
    /// the eligibility check produces.
    pub async fn create(&self, new: NewLoan) -> Result<Loan> {
        let result = sqlx::query(&format!(
            r#"
            INSERT INTO loans
                (user_id, amount, approved_amount, interest_rate,
                 total_payable, due_date, status, currency)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {LOAN_COLUMNS}
            "#
        ))
        .bind(new.user_id)
        .bind(new.amount)
        .bind(new.approved_amount)
        .bind(new.interest_rate)
        .bind(new.total_payable)
        .bind(new.due_date)
        .bind(LoanStatus::Pending.as_str())
        .bind(&new.currency)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row_to_loan(row),
            Err(e) if is_open_loan_violation(&e) => Err(LendError::conflict(
                "You must repay your current loan before requesting another",
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch a loan only if it belongs to the given user.
    pub async fn find_for_user(&self, loan_id: Uuid, user_id: Uuid) -> Result<Option<Loan>> {
        let row = sqlx::query(&format!(
            "SELECT {LOAN_COLUMNS} FROM loans WHERE id = $1 AND user_id = $2"
        ))
        .bind(loan_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_loan).transpose()
    }

    /// The user's open loan (PENDING or ACTIVE), if any.
    pub async fn find_open(&self, user_id: Uuid) -> Result<Option<Loan>> {
        let row = sqlx::query(&format!(
            "SELECT {LOAN_COLUMNS} FROM loans \
             WHERE user_id = $1 AND status IN ('PENDING', 'ACTIVE')"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_loan).transpose()
    }

    pub async fn find_active(&self, user_id: Uuid) -> Result<Option<Loan>> {
        let row = sqlx::query(&format!(
            "SELECT {LOAN_COLUMNS} FROM loans WHERE user_id = $1 AND status = 'ACTIVE'"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_loan).transpose()
    }

    /// Flip a PENDING loan to ACTIVE after successful disbursement. The
    /// status guard in the WHERE clause keeps a concurrent second approval
    /// from activating twice.
    pub async fn mark_active(&self, loan_id: Uuid) -> Result<Loan> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE loans SET status = 'ACTIVE'
            WHERE id = $1 AND status = 'PENDING'
            RETURNING {LOAN_COLUMNS}
            "#
        ))
        .bind(loan_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row_to_loan(row),
            None => Err(LendError::conflict("Only pending loans can be approved")),
        }
    }

    /// All loans for a user, newest first.
    pub async fn history(&self, user_id: Uuid) -> Result<Vec<Loan>> {
        let rows = sqlx::query(&format!(
            "SELECT {LOAN_COLUMNS} FROM loans WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_loan).collect()
    }

    /// Settle a repayment in a single transaction: record the provider
    /// transaction id in the idempotency ledger, flip the loan to REPAID,
    /// and adjust the borrower's credit score. Nothing mutates unless all
    /// three steps succeed.
    pub async fn settle(&self, s: Settlement) -> Result<Loan> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO loan_repayments (transaction_id, loan_id, amount, reference)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (transaction_id) DO NOTHING
            "#,
        )
        .bind(&s.transaction_id)
        .bind(s.loan_id)
        .bind(s.amount)
        .bind(&s.reference)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            return Err(LendError::DuplicateRepayment);
        }

        let row = sqlx::query(&format!(
            r#"
            UPDATE loans SET status = 'REPAID', paid_at = $2
            WHERE id = $1 AND status = 'ACTIVE'
            RETURNING {LOAN_COLUMNS}
            "#
        ))
        .bind(s.loan_id)
        .bind(s.paid_at)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            // The loan left ACTIVE between the handler's read and this
            // transaction; treat as the not-found the caller expects.
            return Err(LendError::not_found("No active loan found for user"));
        };
        let loan = row_to_loan(row)?;

        sqlx::query(
            "UPDATE users SET credit_score = credit_score + $2, updated_at = now() WHERE id = $1",
        )
        .bind(s.user_id)
        .bind(s.score_delta)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(loan)
    }
}

fn is_open_loan_violation(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Database(db) if db.constraint() == Some("loans_one_open_per_user")
    )
}

pub(crate) fn row_to_loan(r: PgRow) -> Result<Loan> {
    let status: String = r.get("status");
    let status = LoanStatus::parse(&status).ok_or_else(|| {
        LendError::Other(anyhow::anyhow!("unknown status in loans row: {status}"))
    })?;

    Ok(Loan {
        id: r.get("id"),
        user_id: r.get("user_id"),
        amount: r.get("amount"),
        approved_amount: r.get("approved_amount"),
        interest_rate: r.get("interest_rate"),
        total_payable: r.get("total_payable"),
        due_date: r.get("due_date"),
        status,
        currency: r.get("currency"),
        created_at: r.get("created_at"),
        paid_at: r.get("paid_at"),
    })
}
