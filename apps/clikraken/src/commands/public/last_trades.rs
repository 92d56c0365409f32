use std::io::Write;

use kraken_sdk::{
    base_quote_short_from_asset_pair, humanize_timestamp, now_timestamp, ApiParams, Endpoint,
};
use serde_json::Value;

use crate::api::{as_array, as_epoch, pair_entry, query_api, require, scalar_text};
use crate::cli::LastTradesArgs;
use crate::context::Context;
use crate::error::{CliError, CliResult};
use crate::output::{emit, field, render_grid, render_table, OutputFormat, Record};

const ENDPOINT: Endpoint = Endpoint::Trades;

#[derive(Debug, Clone, PartialEq)]
pub struct PublicTrade {
    pub side: &'static str,
    pub order_type: &'static str,
    pub price: String,
    pub volume: String,
    pub age: String,
}

impl PublicTrade {
    fn record(&self) -> Record {
        vec![
            field("Trade type", self.side),
            field("Order type", self.order_type),
            field("Price", self.price.clone()),
            field("Volume", self.volume.clone()),
            field("Age", self.age.clone()),
        ]
    }
}

pub async fn run(ctx: &Context, args: &LastTradesArgs, out: &mut dyn Write) -> CliResult<()> {
    let pair = args
        .pair
        .clone()
        .unwrap_or_else(|| ctx.settings.currency_pair.clone());
    let split = base_quote_short_from_asset_pair(&pair).ok();
    if let Some(split) = split.as_ref().filter(|split| split.guessed) {
        ctx.logger.debug(&format!(
            "Asset pair {} split as {}/{} by length only",
            pair, split.base, split.quote
        ));
    }
    let quote = split.map(|split| split.quote).unwrap_or_default();

    let params = ApiParams::new()
        .with("pair", &pair)
        .with_opt("since", args.since.as_deref());

    let Some(result) = query_api(ctx, out, ENDPOINT, &params).await? else {
        return Ok(());
    };

    let entry = pair_entry(&result, &pair)
        .ok_or_else(|| CliError::response(ENDPOINT.method(), format!("no entry for {}", pair)))?;
    let last_id = scalar_text(require(&result, "last", ENDPOINT)?, ENDPOINT)?;
    let trades = parse_trades(entry, now_timestamp())?;
    if trades.is_empty() {
        return Ok(());
    }

    let shown: Vec<Record> = trades.iter().take(args.count).map(PublicTrade::record).collect();

    match ctx.options.format() {
        OutputFormat::Table => {
            writeln!(out, "{}\n", render_table(&shown))?;
            writeln!(out, "{}\n", render_summary(&trades, &quote))?;
            writeln!(out, "Last ID = {}", last_id)?;
            Ok(())
        }
        format => emit(out, &format, &shown),
    }
}

/// Trades newest first
pub fn parse_trades(entry: &Value, now: f64) -> CliResult<Vec<PublicTrade>> {
    let mut trades = Vec::new();
    for trade in as_array(entry, ENDPOINT)? {
        let item = |i: usize| {
            trade.get(i).ok_or_else(|| {
                CliError::response(ENDPOINT.method(), format!("short trade entry {}", trade))
            })
        };
        trades.push(PublicTrade {
            side: match item(3)?.as_str() {
                Some("b") => "buy",
                Some("s") => "sell",
                _ => "unknown",
            },
            order_type: match item(4)?.as_str() {
                Some("l") => "limit",
                Some("m") => "market",
                _ => "unknown",
            },
            price: scalar_text(item(0)?, ENDPOINT)?,
            volume: scalar_text(item(1)?, ENDPOINT)?,
            age: humanize_timestamp(as_epoch(item(2)?, ENDPOINT)?, now),
        });
    }
    trades.reverse();
    Ok(trades)
}

/// Most recent sell and buy
fn render_summary(trades: &[PublicTrade], quote: &str) -> String {
    let headers = vec![
        String::new(),
        format!("Price ({})", quote),
        "Volume".to_string(),
        "Age".to_string(),
    ];

    let rows: Vec<Vec<String>> = [("Last Sell", "sell"), ("Last Buy", "buy")]
        .iter()
        .filter_map(|(label, side)| {
            trades.iter().find(|t| t.side == *side).map(|t| {
                vec![
                    label.to_string(),
                    t.price.clone(),
                    t.volume.clone(),
                    t.age.clone(),
                ]
            })
        })
        .collect();

    render_grid(Some(&headers), &rows)
}
