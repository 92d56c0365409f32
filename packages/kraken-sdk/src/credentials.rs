//! API key pair used for private calls

use std::fmt;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{SdkError, SdkResult};

/// API key and decoded secret
#[derive(Clone)]
pub struct Credentials {
    key: String,
    secret: Vec<u8>,
}

impl Credentials {
    /// Build credentials from the API key and its base64 encoded secret
    pub fn new(key: impl Into<String>, secret: &str) -> SdkResult<Self> {
        let key = key.into().trim().to_string();
        let secret = secret.trim();
        if key.is_empty() {
            return Err(SdkError::InvalidCredentials("API key is empty".to_string()));
        }
        if secret.is_empty() {
            return Err(SdkError::InvalidCredentials("API secret is empty".to_string()));
        }

        let secret = STANDARD
            .decode(secret)
            .map_err(|e| SdkError::InvalidCredentials(format!("API secret is not base64: {}", e)))?;

        Ok(Self { key, secret })
    }

    /// Load a key file: API key on the first line, secret on the second
    pub fn from_file(path: impl AsRef<Path>) -> SdkResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> SdkResult<Self> {
        let mut lines = contents.lines().map(str::trim).filter(|l| !l.is_empty());
        let key = lines
            .next()
            .ok_or_else(|| SdkError::InvalidCredentials("key file is empty".to_string()))?;
        let secret = lines
            .next()
            .ok_or_else(|| SdkError::InvalidCredentials("key file has no secret".to_string()))?;
        Self::new(key, secret)
    }

    pub fn api_key(&self) -> &str {
        &self.key
    }

    pub(crate) fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SECRET: &str = "c2VjcmV0LWJ5dGVz";

    #[test]
    fn test_parse_key_file() {
        let creds = Credentials::parse("my-api-key\nc2VjcmV0LWJ5dGVz\n").unwrap();
        assert_eq!(creds.api_key(), "my-api-key");
        assert_eq!(creds.secret(), b"secret-bytes");
    }

    #[test]
    fn test_parse_skips_blank_lines_and_whitespace() {
        let creds = Credentials::parse("\n  my-api-key  \n\n\tc2VjcmV0LWJ5dGVz\n").unwrap();
        assert_eq!(creds.api_key(), "my-api-key");
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let err = Credentials::parse("only-a-key\n").unwrap_err();
        assert!(matches!(err, SdkError::InvalidCredentials(_)));
    }

    #[test]
    fn test_secret_must_be_base64() {
        let err = Credentials::new("key", "not base64 !!").unwrap_err();
        assert!(matches!(err, SdkError::InvalidCredentials(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "file-key").unwrap();
        writeln!(file, "{}", SECRET).unwrap();

        let creds = Credentials::from_file(file.path()).unwrap();
        assert_eq!(creds.api_key(), "file-key");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Credentials::from_file("/nonexistent/clikraken/kraken.key").unwrap_err();
        assert!(matches!(err, SdkError::Io(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("key", SECRET).unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(SECRET));
    }
}
