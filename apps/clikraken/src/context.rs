use std::sync::Arc;

use kraken_sdk::{Credentials, KrakenClient, LogPolicy, Logger};

use crate::cli::{unescape_separator, Cli};
use crate::config::Settings;
use crate::error::CliResult;
use crate::output::OutputFormat;

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    pub raw: bool,
    pub json: bool,
    pub csv: bool,
    pub csv_separator: String,
    pub debug: bool,
    pub cron: bool,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            raw: cli.raw,
            json: cli.json,
            csv: cli.csv,
            csv_separator: unescape_separator(&cli.csvseparator),
            debug: cli.debug,
            cron: cli.cron,
        }
    }

    /// Rendering of processed rows, json wins over csv
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.csv {
            OutputFormat::Csv(self.csv_separator.clone())
        } else {
            OutputFormat::Table
        }
    }
}

/// Everything a command needs for one invocation
pub struct Context {
    pub settings: Settings,
    pub client: KrakenClient,
    pub options: GlobalOptions,
    pub logger: Arc<dyn Logger>,
}

impl Context {
    /// Build the exchange client, loading the key file when there is one.
    ///
    /// A missing or unreadable key file is only a warning here; private
    /// calls fail later with a missing credentials error.
    pub fn new(
        settings: Settings,
        options: GlobalOptions,
        logger: Arc<dyn Logger>,
    ) -> CliResult<Self> {
        if !settings.settings_file_found {
            logger.info(&format!(
                "The user settings file {} was not found! Using hardcoded default values.",
                settings.settings_path.display()
            ));
        }
        let credentials = load_credentials(&settings, logger.as_ref());

        let client = KrakenClient::new(settings.api_url.clone(), logger.clone())?
            .with_credentials(credentials)
            .with_policy(LogPolicy::from_cron_flag(options.cron));

        Ok(Self {
            settings,
            client,
            options,
            logger,
        })
    }

    pub fn tz(&self) -> &kraken_sdk::Tz {
        &self.settings.timezone
    }
}

fn load_credentials(settings: &Settings, logger: &dyn Logger) -> Option<Credentials> {
    let path = &settings.keyfile_path;
    if !path.is_file() {
        logger.warn(&format!("The API keyfile {} was not found!", path.display()));
        return None;
    }

    match Credentials::from_file(path) {
        Ok(credentials) => Some(credentials),
        Err(e) => {
            logger.warn(&format!("Failed to load the API keyfile {}: {}", path.display(), e));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use kraken_sdk::{LogLevel, MemoryLogger};

    #[test]
    fn test_output_format_precedence() {
        let cli = Cli::try_parse_from(["clikraken", "--json", "--csv", "bal"]).unwrap();
        assert_eq!(GlobalOptions::from_cli(&cli).format(), OutputFormat::Json);

        let cli =
            Cli::try_parse_from(["clikraken", "--csv", "--csvseparator", "\\t", "bal"]).unwrap();
        assert_eq!(
            GlobalOptions::from_cli(&cli).format(),
            OutputFormat::Csv("\t".to_string())
        );

        let cli = Cli::try_parse_from(["clikraken", "bal"]).unwrap();
        assert_eq!(GlobalOptions::from_cli(&cli).format(), OutputFormat::Table);
    }

    #[test]
    fn test_missing_files_are_reported_through_logger() {
        let home = tempfile::tempdir().unwrap();
        let home_path = home.path().to_string_lossy().to_string();
        let settings = Settings::load_with(|key| match key {
            "HOME" => Some(home_path.clone()),
            _ => None,
        })
        .unwrap();
        let logger = Arc::new(MemoryLogger::new());

        let ctx = Context::new(settings, GlobalOptions::default(), logger.clone()).unwrap();

        assert!(!ctx.client.has_credentials());
        assert!(logger.contains(LogLevel::Info, "Using hardcoded default values."));
        assert!(logger.contains(LogLevel::Warn, "kraken.key was not found!"));
    }
}
