//! Formatting utilities for timestamps and volumes
//!
//! Exchange values arrive as decimal strings and are kept that way; only
//! derived figures (quote volume estimates) go through `Decimal`.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::{Decimal, RoundingStrategy};

/// Layout used for every rendered date
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

fn to_utc(ts: f64) -> DateTime<Utc> {
    let secs = ts.trunc() as i64;
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or_default()
}

/// Format a UNIX timestamp in `tz`, truncated to the second
///
/// # Example
/// ```
/// use kraken_sdk::format_timestamp;
/// let tz: chrono_tz::Tz = "Europe/Berlin".parse().unwrap();
/// assert_eq!(format_timestamp(1500000000.1234, &tz), "2017-07-14 04:40:00+02:00");
/// ```
pub fn format_timestamp(ts: f64, tz: &Tz) -> String {
    to_utc(ts).with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

/// Describe how long ago `ts` was relative to `now`
///
/// # Example
/// ```
/// use kraken_sdk::humanize_timestamp;
/// assert_eq!(humanize_timestamp(1000.0, 1300.0), "5 minutes ago");
/// ```
pub fn humanize_timestamp(ts: f64, now: f64) -> String {
    let delta = (now - ts).round() as i64;
    let (future, secs) = if delta < 0 { (true, -delta) } else { (false, delta) };

    let phrase = match secs {
        0..=9 => return "just now".to_string(),
        10..=44 => "seconds".to_string(),
        45..=89 => "a minute".to_string(),
        90..=2699 => format!("{} minutes", round_div(secs, 60).max(2)),
        2700..=5399 => "an hour".to_string(),
        5400..=79199 => format!("{} hours", round_div(secs, 3600).max(2)),
        79200..=129599 => "a day".to_string(),
        129600..=2332799 => format!("{} days", round_div(secs, 86400).max(2)),
        2332800..=3887999 => "a month".to_string(),
        3888000..=29807999 => format!("{} months", round_div(secs, 2592000).max(2)),
        29808000..=47303999 => "a year".to_string(),
        _ => format!("{} years", round_div(secs, 31536000).max(2)),
    };

    if future {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

fn round_div(value: i64, unit: i64) -> i64 {
    (value + unit / 2) / unit
}

/// Current time as fractional UNIX seconds
pub fn now_timestamp() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Estimate of a 24h traded value in quote currency (volume x average
/// price), scaled to `k` or `M` units, e.g. `"1235 kEUR"`.
///
/// # Example
/// ```
/// use kraken_sdk::format_quote_volume;
/// use rust_decimal::Decimal;
/// let vol: Decimal = "4000".parse().unwrap();
/// let wavg: Decimal = "300".parse().unwrap();
/// assert_eq!(format_quote_volume(vol, wavg, "EUR"), "1200 kEUR");
/// ```
pub fn format_quote_volume(volume: Decimal, wavg: Decimal, quote: &str) -> String {
    let mut value = volume * wavg;
    let mut prefix = "";

    if value >= Decimal::from(10_000_000) {
        value /= Decimal::from(1_000_000);
        prefix = "M";
    } else if value >= Decimal::from(10_000) {
        value /= Decimal::from(1_000);
        prefix = "k";
    }

    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    format!("{} {}{}", rounded.normalize(), prefix, quote)
}
