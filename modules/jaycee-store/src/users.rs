use jaycee_common::{KycStatus, LendError, Result, User};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, kyc_verified, kyc_status, kyc_document, \
     credit_score, is_admin, created_at, updated_at";

#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_user).transpose()
    }

    pub async fn insert(&self, name: &str, email: &str) -> Result<User> {
        let row = sqlx::query(&format!(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        row_to_user(row)
    }

    /// Apply a KYC decision to a user. `document` is the verification
    /// provider's transaction id for the scan.
    pub async fn set_kyc_decision(
        &self,
        id: Uuid,
        verified: bool,
        status: KycStatus,
        document: &str,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET kyc_verified = $2, kyc_status = $3, kyc_document = $4, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(verified)
        .bind(status.as_str())
        .bind(document)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LendError::not_found("User not found"));
        }
        Ok(())
    }

    /// Overwrite a user's credit score. Reconciliation applies relative
    /// adjustments through the settlement transaction instead.
    pub async fn set_credit_score(&self, id: Uuid, score: i32) -> Result<()> {
        sqlx::query("UPDATE users SET credit_score = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(score)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

pub(crate) fn row_to_user(r: PgRow) -> Result<User> {
    let status: String = r.get("kyc_status");
    let kyc_status = KycStatus::parse(&status).ok_or_else(|| {
        LendError::Other(anyhow::anyhow!("unknown kyc_status in users row: {status}"))
    })?;

    Ok(User {
        id: r.get("id"),
        name: r.get("name"),
        email: r.get("email"),
        kyc_verified: r.get("kyc_verified"),
        kyc_status,
        kyc_document: r.get("kyc_document"),
        credit_score: r.get("credit_score"),
        is_admin: r.get("is_admin"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}
