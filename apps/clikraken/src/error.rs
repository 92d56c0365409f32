use kraken_sdk::SdkError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("The API key must be set for private API queries! Aborting...")]
    MissingCredentials,

    #[error(transparent)]
    Sdk(SdkError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Unexpected {method} response: {message}")]
    Response { method: String, message: String },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl From<SdkError> for CliError {
    fn from(e: SdkError) -> Self {
        match e {
            SdkError::MissingCredentials => CliError::MissingCredentials,
            SdkError::InvalidOrder(message) => CliError::InvalidInput(message),
            other => CliError::Sdk(other),
        }
    }
}

impl CliError {
    pub fn response(method: &str, message: impl Into<String>) -> Self {
        CliError::Response {
            method: method.to_string(),
            message: message.into(),
        }
    }

    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::MissingCredentials => 2,
            _ => 1,
        }
    }
}
