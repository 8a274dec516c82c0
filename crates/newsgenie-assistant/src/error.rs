use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generator returned status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("generator response parse error: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("generator unavailable at {url}: {reason}")]
    Unavailable { url: String, reason: String },
}
