use std::io::Write;

use kraken_sdk::{strip_asset_prefix, ApiParams, Endpoint};
use serde_json::Value;

use crate::api::{as_object, query_api, scalar_text};
use crate::context::Context;
use crate::error::CliResult;
use crate::output::{emit, field, render_grid, OutputFormat, Record};

/// Labels of the trade balance figures, in display order
const TRADE_BALANCE_FIELDS: [(&str, &str); 9] = [
    ("equivalent balance", "eb"),
    ("trade balance", "tb"),
    ("margin amount of open positions", "m"),
    ("cost basis of open positions", "c"),
    ("current floating valuation of open positions", "v"),
    ("equity", "e"),
    ("free margin", "mf"),
    ("margin level", "ml"),
    ("unrealized net profit/loss of open positions", "n"),
];

pub async fn balance(ctx: &Context, out: &mut dyn Write) -> CliResult<()> {
    let Some(result) = query_api(ctx, out, Endpoint::Balance, &ApiParams::new()).await? else {
        return Ok(());
    };

    emit(out, &ctx.options.format(), &balance_records(&result)?)
}

/// Balances per asset, class prefix stripped, sorted by asset
pub fn balance_records(result: &Value) -> CliResult<Vec<Record>> {
    let mut rows = Vec::new();
    for (asset, amount) in as_object(result, Endpoint::Balance)? {
        let asset = strip_asset_prefix(asset).to_string();
        rows.push((asset, scalar_text(amount, Endpoint::Balance)?));
    }
    rows.sort();

    Ok(rows
        .into_iter()
        .map(|(asset, amount)| vec![field("asset", asset), field("balance", amount)])
        .collect())
}

pub async fn trade_balance(ctx: &Context, out: &mut dyn Write) -> CliResult<()> {
    let Some(result) = query_api(ctx, out, Endpoint::TradeBalance, &ApiParams::new()).await?
    else {
        return Ok(());
    };

    let figures = trade_balance_figures(&result);

    match ctx.options.format() {
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = figures
                .into_iter()
                .map(|(label, value)| vec![label.to_string(), value])
                .collect();
            writeln!(out, "{}", render_grid(None, &rows))?;
            Ok(())
        }
        format => {
            let record: Record = figures
                .into_iter()
                .map(|(label, value)| field(label, value))
                .collect();
            emit(out, &format, &[record])
        }
    }
}

/// Labelled figures, `n/a` for the ones the exchange left out
pub fn trade_balance_figures(result: &Value) -> Vec<(&'static str, String)> {
    TRADE_BALANCE_FIELDS
        .iter()
        .map(|(label, key)| {
            let value = result
                .get(key)
                .and_then(|v| scalar_text(v, Endpoint::TradeBalance).ok())
                .unwrap_or_else(|| "n/a".to_string());
            (*label, value)
        })
        .collect()
}
