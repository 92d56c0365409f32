use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _};
use chrono_tz::Tz;
use config::{File, FileFormat};
use kraken_sdk::{TradingAgreement, DEFAULT_API_URL};
use serde::Deserialize;

/// Contents written by `generate_settings` and used when no settings file exists
pub const DEFAULT_SETTINGS_INI: &str = "[clikraken]
# default currency pair when no option '-p' or '--pair' is given
# and the environment variable CLIKRAKEN_DEFAULT_PAIR is not set
currency_pair = XETHZEUR

# default list of currency pairs shown by the ticker
# (environment variable CLIKRAKEN_TICKER_PAIRS takes precedence)
ticker_currency_pairs = XETHZEUR,XXBTZEUR

# default asset for deposits and withdrawals
# (environment variable CLIKRAKEN_DEFAULT_ASSET takes precedence)
asset = XETH

# Timezone for displaying date and time infos
timezone = Europe/Berlin

# API Trading Agreement
# (change to \"agree\" after reading https://www.kraken.com/u/settings/api)
trading_agreement = not_agree
";

pub const ENV_DEFAULT_PAIR: &str = "CLIKRAKEN_DEFAULT_PAIR";
pub const ENV_TICKER_PAIRS: &str = "CLIKRAKEN_TICKER_PAIRS";
pub const ENV_DEFAULT_ASSET: &str = "CLIKRAKEN_DEFAULT_ASSET";
pub const ENV_API_KEYFILE: &str = "CLIKRAKEN_API_KEYFILE";
pub const ENV_USER_SETTINGS_PATH: &str = "CLIKRAKEN_USER_SETTINGS_PATH";
pub const ENV_API_URL: &str = "CLIKRAKEN_API_URL";

/// The `[clikraken]` section as written in the INI file
#[derive(Debug, Clone, Deserialize)]
struct SettingsSection {
    currency_pair: String,
    ticker_currency_pairs: String,
    asset: String,
    timezone: String,
    trading_agreement: String,
}

/// Resolved program settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub currency_pair: String,
    pub ticker_currency_pairs: String,
    pub asset: String,
    pub timezone: Tz,
    pub trading_agreement: TradingAgreement,
    pub settings_path: PathBuf,
    pub settings_file_found: bool,
    pub keyfile_path: PathBuf,
    pub api_url: String,
}

impl Settings {
    /// Load settings from the process environment and the settings file
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load settings, reading environment variables through `lookup`
    pub fn load_with<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_dir = match lookup("HOME") {
            Some(home) => Path::new(&home).join(".config").join("clikraken"),
            None => PathBuf::from(".config").join("clikraken"),
        };

        let settings_path = lookup(ENV_USER_SETTINGS_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| config_dir.join("settings.ini"));
        let keyfile_path = lookup(ENV_API_KEYFILE)
            .map(PathBuf::from)
            .unwrap_or_else(|| config_dir.join("kraken.key"));

        let settings_file_found = settings_path.is_file();

        let settings_path_str = settings_path
            .to_str()
            .ok_or_else(|| anyhow!("Settings path is not valid UTF-8: {}", settings_path.display()))?;

        let builder = config::Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS_INI, FileFormat::Ini))
            .add_source(File::new(settings_path_str, FileFormat::Ini).required(false));

        let section: SettingsSection = builder
            .build()
            .with_context(|| format!("Failed to read {}", settings_path.display()))?
            .get("clikraken")
            .context("Invalid [clikraken] section")?;

        let timezone: Tz = section
            .timezone
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid timezone '{}': {}", section.timezone, e))?;

        Ok(Self {
            currency_pair: lookup(ENV_DEFAULT_PAIR).unwrap_or(section.currency_pair),
            ticker_currency_pairs: lookup(ENV_TICKER_PAIRS)
                .unwrap_or(section.ticker_currency_pairs),
            asset: lookup(ENV_DEFAULT_ASSET).unwrap_or(section.asset),
            timezone,
            trading_agreement: TradingAgreement::from_setting(&section.trading_agreement),
            settings_path,
            settings_file_found,
            keyfile_path,
            api_url: lookup(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}
