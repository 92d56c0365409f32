use std::io::Write;

use kraken_sdk::{asset_pair_short, format_timestamp, ApiParams, Endpoint, Tz};
use serde_json::Value;

use crate::api::{as_array, as_epoch, pair_entry, query_api, require, scalar_text};
use crate::cli::OhlcArgs;
use crate::context::Context;
use crate::error::{CliError, CliResult};
use crate::output::{emit, field, render_table, OutputFormat, Record};

const ENDPOINT: Endpoint = Endpoint::Ohlc;
const COLUMNS: [&str; 7] = ["Open", "High", "Low", "Close", "VWAP", "Volume", "Count"];

pub async fn run(ctx: &Context, args: &OhlcArgs, out: &mut dyn Write) -> CliResult<()> {
    let pair = args
        .pair
        .clone()
        .unwrap_or_else(|| ctx.settings.currency_pair.clone());
    let params = ApiParams::new()
        .with("pair", &pair)
        .with_opt("since", args.since.as_deref())
        .with("interval", args.interval);

    let Some(result) = query_api(ctx, out, ENDPOINT, &params).await? else {
        return Ok(());
    };

    let entry = pair_entry(&result, &pair)
        .ok_or_else(|| CliError::response(ENDPOINT.method(), format!("no entry for {}", pair)))?;
    let last_id = scalar_text(require(&result, "last", ENDPOINT)?, ENDPOINT)?;

    let mut records = ohlc_records(entry, ctx.tz())?;
    if records.is_empty() {
        return Ok(());
    }
    records.truncate(args.count);

    match ctx.options.format() {
        OutputFormat::Table => {
            writeln!(out, "Asset pair: {}", asset_pair_short(&pair))?;
            writeln!(out, "Interval: {}m\n", args.interval)?;
            writeln!(out, "{}\n", render_table(&records))?;
            writeln!(out, "Last ID = {}", last_id)?;
            Ok(())
        }
        format => emit(out, &format, &records),
    }
}

/// Candles newest first
pub fn ohlc_records(entry: &Value, tz: &Tz) -> CliResult<Vec<Record>> {
    let mut records = Vec::new();

    for period in as_array(entry, ENDPOINT)? {
        let item = |i: usize| {
            period.get(i).ok_or_else(|| {
                CliError::response(ENDPOINT.method(), format!("short ohlc entry {}", period))
            })
        };

        let mut record = vec![field("Time", format_timestamp(as_epoch(item(0)?, ENDPOINT)?, tz))];
        for (i, label) in COLUMNS.iter().enumerate() {
            record.push(field(label, scalar_text(item(i + 1)?, ENDPOINT)?));
        }
        records.push(record);
    }

    records.reverse();
    Ok(records)
}
