/// Test helpers for command line integration tests
///
/// Each fixture owns a mock exchange, a temporary home directory and a
/// memory logger, and runs commands the way the binary does.
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use clikraken::config::{ENV_API_KEYFILE, ENV_API_URL};
use clikraken::{execute, Cli, CliResult, Settings};
use kraken_sdk::MemoryLogger;
use kraken_test_utils::fixtures;
use kraken_test_utils::MockKraken;
use tempfile::TempDir;

pub struct CliFixture {
    pub server: MockKraken,
    pub logger: Arc<MemoryLogger>,
    pub home: TempDir,
    keyfile: PathBuf,
}

/// Captured result of one invocation
pub struct Invocation {
    pub result: CliResult<()>,
    pub stdout: String,
}

impl Invocation {
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

impl CliFixture {
    /// Fixture with a valid key file
    pub async fn new() -> anyhow::Result<Self> {
        let fixture = Self::without_credentials().await?;
        std::fs::write(&fixture.keyfile, fixtures::key_file_contents())?;
        Ok(fixture)
    }

    /// Fixture whose key file does not exist
    pub async fn without_credentials() -> anyhow::Result<Self> {
        let server = MockKraken::start().await?;
        let home = tempfile::tempdir()?;
        let keyfile = home.path().join("kraken.key");

        Ok(Self {
            server,
            logger: Arc::new(MemoryLogger::new()),
            home,
            keyfile,
        })
    }

    pub fn settings(&self) -> Settings {
        let home = self.home.path().to_string_lossy().to_string();
        let keyfile = self.keyfile.to_string_lossy().to_string();
        let api_url = self.server.base_url.clone();

        Settings::load_with(move |key| match key {
            "HOME" => Some(home.clone()),
            k if k == ENV_API_KEYFILE => Some(keyfile.clone()),
            k if k == ENV_API_URL => Some(api_url.clone()),
            _ => None,
        })
        .expect("Failed to load test settings")
    }

    /// Run `clikraken <args>` against the mock
    pub async fn run(&self, args: &[&str]) -> Invocation {
        let argv = std::iter::once("clikraken").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).expect("Failed to parse arguments");

        let mut stdout = Vec::new();
        let result = execute(&cli, self.settings(), self.logger.clone(), &mut stdout).await;

        Invocation {
            result,
            stdout: String::from_utf8(stdout).expect("Output is not UTF-8"),
        }
    }
}
