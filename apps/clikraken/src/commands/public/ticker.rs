use std::io::Write;

use kraken_sdk::{asset_pair_short, format_quote_volume, ApiParams, Endpoint};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::api::{as_object, nth_text, query_api};
use crate::cli::TickerArgs;
use crate::context::Context;
use crate::error::{CliError, CliResult};
use crate::output::{emit, field, Record};

const ENDPOINT: Endpoint = Endpoint::Ticker;

pub async fn run(ctx: &Context, args: &TickerArgs, out: &mut dyn Write) -> CliResult<()> {
    let pairs = args
        .pair
        .clone()
        .unwrap_or_else(|| ctx.settings.ticker_currency_pairs.clone());
    let params = ApiParams::new().with("pair", pairs);

    let Some(result) = query_api(ctx, out, ENDPOINT, &params).await? else {
        return Ok(());
    };

    emit(out, &ctx.options.format(), &ticker_records(&result)?)
}

/// One row per pair with the 24h figures, sorted by short pair name
pub fn ticker_records(result: &Value) -> CliResult<Vec<Record>> {
    let mut rows = Vec::new();

    for (pair, info) in as_object(result, ENDPOINT)? {
        let short = asset_pair_short(pair);
        let vol = nth_text(info, "v", 1, ENDPOINT)?;
        let wavg = nth_text(info, "p", 1, ENDPOINT)?;

        let quote_len = short.chars().count().saturating_sub(3);
        let quote: String = short.chars().skip(quote_len).collect();
        let vol_value = format_quote_volume(decimal(&vol)?, decimal(&wavg)?, &quote);

        let record = vec![
            field("pair", short.clone()),
            field("last", nth_text(info, "c", 0, ENDPOINT)?),
            field("high", nth_text(info, "h", 1, ENDPOINT)?),
            field("low", nth_text(info, "l", 1, ENDPOINT)?),
            field("vol", vol),
            field("wavg", wavg),
            field("vol value", vol_value),
            field("ask", nth_text(info, "a", 0, ENDPOINT)?),
            field("bid", nth_text(info, "b", 0, ENDPOINT)?),
        ];
        rows.push((short, record));
    }

    rows.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(rows.into_iter().map(|(_, record)| record).collect())
}

fn decimal(s: &str) -> CliResult<Decimal> {
    s.parse()
        .map_err(|_| CliError::response(ENDPOINT.method(), format!("'{}' is not a number", s)))
}
