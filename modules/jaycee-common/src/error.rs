use thiserror::Error;

pub type Result<T> = std::result::Result<T, LendError>;

/// Error taxonomy for the lending core. Business-rule failures carry the
/// human-readable message returned to the caller verbatim; unexpected
/// failures are logged and surfaced generically by the HTTP layer.
#[derive(Error, Debug)]
pub enum LendError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Business-rule violation, e.g. an existing open loan or an approval
    /// target that is no longer pending.
    #[error("{0}")]
    Conflict(String),

    /// A repayment notification whose transaction id was already settled.
    #[error("Repayment already processed")]
    DuplicateRepayment,

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LendError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }
}
