use thiserror::Error;

pub type SdkResult<T> = Result<T, SdkError>;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("The API key must be set for private API queries")]
    MissingCredentials,

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unsupported asset pair '{0}'")]
    UnsupportedPair(String),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure classes used to pick a log severity for a failed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Timeouts, refused connections, non-success HTTP status
    Network,
    /// A response body that could not be decoded
    Value,
    Credentials,
    Other,
}

impl SdkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SdkError::HttpError(e) if e.is_decode() => ErrorKind::Value,
            SdkError::HttpError(_) | SdkError::ApiError { .. } => ErrorKind::Network,
            SdkError::SerializationError(_) | SdkError::InvalidResponse(_) => ErrorKind::Value,
            SdkError::MissingCredentials | SdkError::InvalidCredentials(_) => {
                ErrorKind::Credentials
            }
            SdkError::UnsupportedPair(_) | SdkError::InvalidOrder(_) | SdkError::Io(_) => {
                ErrorKind::Other
            }
        }
    }
}
