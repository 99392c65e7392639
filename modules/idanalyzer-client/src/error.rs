use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdAnalyzerError>;

#[derive(Debug, Error)]
pub enum IdAnalyzerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The scan endpoint answered 200 but with an error body.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl From<reqwest::Error> for IdAnalyzerError {
    fn from(err: reqwest::Error) -> Self {
        IdAnalyzerError::Network(err.to_string())
    }
}
