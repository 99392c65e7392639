use jaycee_common::{AuditRecord, Result};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::warn;
use uuid::Uuid;

/// Append-only audit trail. Writes are fire-and-forget: a failed insert
/// is logged and swallowed so it never fails the parent operation.
#[derive(Clone)]
pub struct AuditLog {
    pool: PgPool,
}

impl AuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn record(&self, user_id: Uuid, action: &str, details: Option<&str>) {
        let result = sqlx::query(
            "INSERT INTO audit_logs (user_id, action, details) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(action)
        .bind(details)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            warn!(%user_id, action, error = %e, "Failed to write audit record");
        }
    }

    /// Most recent records, newest first.
    pub async fn recent(&self, limit: u32) -> Result<Vec<AuditRecord>> {
        let limit = limit.min(500) as i64;

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, action, details, created_at
            FROM audit_logs
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }
}

fn row_to_record(r: PgRow) -> AuditRecord {
    AuditRecord {
        id: r.get("id"),
        user_id: r.get("user_id"),
        action: r.get("action"),
        details: r.get("details"),
        created_at: r.get("created_at"),
    }
}
