use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}
