//! Postgres persistence for the lending service.
//!
//! Hand-written SQL over a shared `PgPool`; each submodule owns one
//! table family. Migrations are embedded and run at startup.

pub mod audit;
pub mod loans;
pub mod users;

pub use audit::AuditLog;
pub use loans::{LoanStore, Settlement};
pub use users::UserStore;

use jaycee_common::Result;
use sqlx::PgPool;

/// Run the embedded SQL migrations against the given pool.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| jaycee_common::LendError::Database(e.into()))?;
    Ok(())
}
