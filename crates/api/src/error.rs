#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Malformed syntax model: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
