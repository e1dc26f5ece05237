use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Prediction endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}
