use thiserror::Error;

pub type Result<T> = std::result::Result<T, MonoError>;

#[derive(Debug, Error)]
pub enum MonoError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Disbursement was not successful: {0}")]
    DisbursementFailed(String),
}

impl From<reqwest::Error> for MonoError {
    fn from(err: reqwest::Error) -> Self {
        MonoError::Network(err.to_string())
    }
}
