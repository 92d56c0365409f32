/// Test helpers for SDK integration tests
///
/// Every test talks to a fresh mock of the exchange.
use std::sync::Arc;

use kraken_sdk::{Credentials, KrakenClient, LogPolicy, MemoryLogger};
use kraken_test_utils::fixtures::{TEST_API_KEY, TEST_API_SECRET};
use kraken_test_utils::MockKraken;

/// Mock server plus a client pointed at it
pub struct TestFixture {
    pub server: MockKraken,
    pub client: KrakenClient,
    pub logger: Arc<MemoryLogger>,
}

impl TestFixture {
    /// Client with credentials and the standard log policy
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_policy(LogPolicy::standard()).await
    }

    pub async fn with_policy(policy: LogPolicy) -> anyhow::Result<Self> {
        let server = MockKraken::start().await?;
        let logger = Arc::new(MemoryLogger::new());
        let credentials = Credentials::new(TEST_API_KEY, TEST_API_SECRET)?;
        let client = KrakenClient::new(&server.base_url, logger.clone())?
            .with_credentials(Some(credentials))
            .with_policy(policy);

        Ok(Self {
            server,
            client,
            logger,
        })
    }

    /// Client without credentials
    pub async fn anonymous() -> anyhow::Result<Self> {
        let server = MockKraken::start().await?;
        let logger = Arc::new(MemoryLogger::new());
        let client = KrakenClient::new(&server.base_url, logger.clone())?;

        Ok(Self {
            server,
            client,
            logger,
        })
    }
}
