use markgate::GateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("admission gate error: {0}")]
    Gate(#[from] GateError),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
