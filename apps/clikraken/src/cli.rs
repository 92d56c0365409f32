use clap::builder::TypedValueParser;
use clap::{Args, Parser, Subcommand};
use kraken_sdk::{OrderKind, Side};
use rust_decimal::Decimal;

const AFTER_HELP: &str = "\
To get help about a subcommand use: clikraken SUBCOMMAND --help
For example:
    clikraken place --help

The default currency pair is read from the settings file
($HOME/.config/clikraken/settings.ini, or CLIKRAKEN_USER_SETTINGS_PATH).
If the settings file doesn't exist yet, you can create one by doing:
    clikraken generate_settings > ~/.config/clikraken/settings.ini

You can also set the CLIKRAKEN_DEFAULT_PAIR environment variable
which has precedence over the settings from the settings file.";

/// clikraken - Command line client for the Kraken exchange
#[derive(Parser, Debug)]
#[command(name = "clikraken", version, after_help = AFTER_HELP)]
pub struct Cli {
    /// debug mode
    #[arg(long)]
    pub debug: bool,

    /// output raw json results from the API
    #[arg(long)]
    pub raw: bool,

    /// output json results from the API
    #[arg(long)]
    pub json: bool,

    /// output results from the API as CSV
    #[arg(long)]
    pub csv: bool,

    /// separator character to use with CSV output
    #[arg(long, default_value = ";")]
    pub csvseparator: String,

    /// activate cron mode (tone down errors due to timeouts or unavailable Kraken service)
    #[arg(long)]
    pub cron: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// [clikraken] Print default settings.ini to stdout
    #[command(name = "generate_settings")]
    GenerateSettings,

    // ===== Public =====
    /// [public] Get the ticker
    #[command(visible_alias = "t")]
    Ticker(TickerArgs),

    /// [public] Get the current market depth data
    #[command(visible_alias = "d")]
    Depth(DepthArgs),

    /// [public] Get the last trades
    #[command(name = "last_trades", visible_alias = "lt")]
    LastTrades(LastTradesArgs),

    /// [public] Get the ohlc data
    #[command(visible_alias = "oh")]
    Ohlc(OhlcArgs),

    /// [public] Get the list of available asset pairs
    #[command(name = "asset_pairs", visible_alias = "ap")]
    AssetPairs,

    // ===== Private =====
    /// [private] Get your current balance
    #[command(visible_alias = "bal")]
    Balance,

    /// [private] Get your current trade balance
    #[command(name = "trade_balance", visible_alias = "tbal")]
    TradeBalance,

    /// [private] Place an order
    #[command(visible_alias = "p")]
    Place(PlaceArgs),

    /// [private] Cancel orders
    #[command(visible_alias = "x")]
    Cancel(CancelArgs),

    /// [private] Get a list of your open orders
    #[command(visible_alias = "ol")]
    Olist(OrderListArgs),

    /// [private] Get a list of your closed orders
    #[command(visible_alias = "cl")]
    Clist(OrderListArgs),

    /// [private] Get a list of your open positions
    #[command(visible_alias = "pos")]
    Positions,

    /// [private] Get ledgers info
    #[command(visible_alias = "lg")]
    Ledgers(LedgersArgs),

    /// [private] Get trades history
    #[command(visible_alias = "tr")]
    Trades(TradesArgs),

    /// [private] Get deposit methods
    #[command(name = "deposit_methods", visible_alias = "dm")]
    DepositMethods(AssetArgs),

    /// [private] Get deposit addresses
    #[command(name = "deposit_addresses", visible_alias = "da")]
    DepositAddresses(DepositAddressesArgs),

    /// [private] Withdraw funds
    #[command(visible_alias = "wd")]
    Withdraw(WithdrawArgs),

    /// [private] List withdrawals
    #[command(name = "list_withdrawals", visible_alias = "lw")]
    ListWithdrawals(AssetArgs),

    /// [private] List withdraw information
    #[command(name = "list_withdraw_information", visible_alias = "lwi")]
    ListWithdrawInformation(WithdrawArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct TickerArgs {
    /// comma delimited list of asset pairs to get info on [default: ticker pairs from settings]
    #[arg(short, long)]
    pub pair: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DepthArgs {
    /// asset pair [default: currency pair from settings]
    #[arg(short, long)]
    pub pair: Option<String>,

    /// maximum number of asks/bids
    #[arg(short, long, default_value_t = 7)]
    pub count: u32,
}

#[derive(Args, Debug, Clone)]
pub struct LastTradesArgs {
    /// asset pair [default: currency pair from settings]
    #[arg(short, long)]
    pub pair: Option<String>,

    /// return trade data since given id
    #[arg(short, long)]
    pub since: Option<String>,

    /// maximum number of trades
    #[arg(short, long, default_value_t = 15)]
    pub count: usize,
}

#[derive(Args, Debug, Clone)]
pub struct OhlcArgs {
    /// asset pair [default: currency pair from settings]
    #[arg(short, long)]
    pub pair: Option<String>,

    /// return ohlc data for interval in minutes; 1, 5, 15, 30, 60, 240, 1440, 10080, 21600
    #[arg(short, long, default_value_t = 1)]
    pub interval: u32,

    /// return ohlc data since given id
    #[arg(short, long)]
    pub since: Option<String>,

    /// maximum number of intervals
    #[arg(short, long, default_value_t = 50)]
    pub count: usize,
}

#[derive(Args, Debug, Clone)]
pub struct PlaceArgs {
    /// order side
    #[arg(value_parser = clap::builder::PossibleValuesParser::new(["buy", "sell"])
        .map(|s| s.parse::<Side>().unwrap_or(Side::Buy)))]
    pub side: Side,

    /// order volume
    pub volume: Decimal,

    /// limit price
    pub price: Option<String>,

    /// leverage for margin trading
    #[arg(short, long, default_value = "none")]
    pub leverage: String,

    /// asset pair [default: currency pair from settings]
    #[arg(short, long)]
    pub pair: Option<String>,

    /// order type. Currently implemented: [limit, market]
    #[arg(short = 't', long, default_value = "limit",
        value_parser = clap::builder::PossibleValuesParser::new(["limit", "market"])
            .map(|s| s.parse::<OrderKind>().unwrap_or_default()))]
    pub ordertype: OrderKind,

    /// scheduled start time
    #[arg(short, long, default_value = "0")]
    pub starttm: String,

    /// expiration time
    #[arg(short, long, default_value = "0")]
    pub expiretm: String,

    /// user reference id. 32-bit signed number
    #[arg(short = 'r', long)]
    pub userref: Option<String>,

    /// volume in quote currency
    #[arg(short = 'q', long)]
    pub viqc: bool,

    /// disable 'post-only' option (for limit taker orders)
    #[arg(short = 'T', long)]
    pub nopost: bool,

    /// validate inputs only. do not submit order
    #[arg(short, long)]
    pub validate: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CancelArgs {
    /// transaction ids
    #[arg(required = true, num_args = 1..)]
    pub order_ids: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OrderListArgs {
    /// asset pair, `all` to disable the filter
    #[arg(short, long)]
    pub pair: Option<String>,

    /// comma delimited list of transaction ids to query info about (20 maximum)
    #[arg(short = 'i', long)]
    pub txid: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct LedgersArgs {
    /// comma delimited list of assets to restrict output to
    #[arg(short, long, default_value = "all")]
    pub asset: String,

    /// type of ledger to retrieve. Possible values: all|deposit|withdrawal|trade|margin
    #[arg(short = 't', long = "type", default_value = "all")]
    pub ledger_type: String,

    /// starting unix timestamp or ledger id of results (exclusive)
    #[arg(short, long)]
    pub start: Option<String>,

    /// ending unix timestamp or ledger id of results (exclusive)
    #[arg(short, long)]
    pub end: Option<String>,

    /// result offset
    #[arg(short, long)]
    pub ofs: Option<String>,

    /// comma delimited list of ledger ids to query info about (20 maximum)
    #[arg(short, long)]
    pub id: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TradesArgs {
    /// asset pair, `all` to disable the filter
    #[arg(short, long)]
    pub pair: Option<String>,

    /// type of trade. Possible values: all|any position|closed position|closing position|no position
    #[arg(short = 't', long = "type")]
    pub trade_type: Option<String>,

    /// starting unix timestamp or trade tx id of results (exclusive)
    #[arg(short, long)]
    pub start: Option<String>,

    /// ending unix timestamp or trade tx id of results (exclusive)
    #[arg(short, long)]
    pub end: Option<String>,

    /// result offset
    #[arg(short, long)]
    pub ofs: Option<String>,

    /// comma delimited list of transaction ids to query info about (20 maximum)
    #[arg(short, long)]
    pub id: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AssetArgs {
    /// asset [default: asset from settings]
    #[arg(short, long)]
    pub asset: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DepositAddressesArgs {
    /// asset [default: asset from settings]
    #[arg(short, long)]
    pub asset: Option<String>,

    /// name of the deposit method
    #[arg(short, long)]
    pub method: Option<String>,

    /// whether or not to generate a new address
    #[arg(short, long)]
    pub new: bool,

    /// return a single address, new ones first
    #[arg(short = '1', long)]
    pub one: bool,
}

#[derive(Args, Debug, Clone)]
pub struct WithdrawArgs {
    /// asset [default: asset from settings]
    #[arg(short, long)]
    pub asset: Option<String>,

    /// amount to be withdrawn
    pub amount: Decimal,

    /// withdrawal key name, as set up on the account
    pub key: String,
}

/// Decode backslash escapes of a CSV separator, `\t` becomes a tab
pub fn unescape_separator(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_and_alias() {
        let cli = Cli::try_parse_from(["clikraken", "--raw", "--cron", "ol", "-p", "all"]).unwrap();
        assert!(cli.raw);
        assert!(cli.cron);
        match cli.command {
            Some(Command::Olist(args)) => assert_eq!(args.pair.as_deref(), Some("all")),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_place_arguments() {
        let cli = Cli::try_parse_from([
            "clikraken", "place", "buy", "0.1337", "10.42", "-t", "limit", "-q", "-T",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Place(args)) => {
                assert_eq!(args.side, Side::Buy);
                assert_eq!(args.volume.to_string(), "0.1337");
                assert_eq!(args.price.as_deref(), Some("10.42"));
                assert_eq!(args.ordertype, OrderKind::Limit);
                assert!(args.viqc);
                assert!(args.nopost);
                assert_eq!(args.leverage, "none");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_place_rejects_unknown_side() {
        assert!(Cli::try_parse_from(["clikraken", "place", "hold", "1"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["clikraken"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.csvseparator, ";");
    }

    #[test]
    fn test_unescape_separator() {
        assert_eq!(unescape_separator(";"), ";");
        assert_eq!(unescape_separator("\\t"), "\t");
        assert_eq!(unescape_separator("a\\\\b"), "a\\b");
        assert_eq!(unescape_separator("\\x"), "\\x");
    }
}
