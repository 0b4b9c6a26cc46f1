use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransformError>;

/// Structural problems with a listing. Everything else degrades instead of failing.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("invalid listing: {0}")]
    InvalidListing(String),

    #[error("listing is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransformError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TransformError::InvalidListing(msg.into())
    }
}
