use std::io::Write;

use kraken_sdk::{asset_pair_short, humanize_timestamp, now_timestamp, ApiParams, Endpoint};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::api::{as_array, as_epoch, pair_entry, query_api, require, scalar_text};
use crate::cli::DepthArgs;
use crate::context::Context;
use crate::error::{CliError, CliResult};
use crate::output::{emit, field, render_table, OutputFormat, Record};

const ENDPOINT: Endpoint = Endpoint::Depth;

/// One price level of the book
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub price: String,
    pub volume: String,
    pub age: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Book {
    pub asks: Vec<Level>,
    pub bids: Vec<Level>,
}

pub async fn run(ctx: &Context, args: &DepthArgs, out: &mut dyn Write) -> CliResult<()> {
    let pair = args
        .pair
        .clone()
        .unwrap_or_else(|| ctx.settings.currency_pair.clone());
    let params = ApiParams::new()
        .with("pair", &pair)
        .with("count", args.count);

    let Some(result) = query_api(ctx, out, ENDPOINT, &params).await? else {
        return Ok(());
    };

    let entry = pair_entry(&result, &pair)
        .ok_or_else(|| CliError::response(ENDPOINT.method(), format!("no entry for {}", pair)))?;
    let book = parse_book(entry, now_timestamp())?;
    let short = asset_pair_short(&pair);

    match ctx.options.format() {
        OutputFormat::Table => {
            let asks = render_table(&side_records(&book.asks, &format!("{} Ask", short)));
            let bids = render_table(&side_records(&book.bids, &format!("{} Bid", short)));
            writeln!(out, "{}\n\n{}", asks, bids)?;
            Ok(())
        }
        format => emit(out, &format, &flat_records(&book, &short)),
    }
}

/// Both sides of the book, each sorted by price descending
pub fn parse_book(entry: &Value, now: f64) -> CliResult<Book> {
    Ok(Book {
        asks: parse_side(require(entry, "asks", ENDPOINT)?, now)?,
        bids: parse_side(require(entry, "bids", ENDPOINT)?, now)?,
    })
}

fn parse_side(levels: &Value, now: f64) -> CliResult<Vec<Level>> {
    let mut parsed = Vec::new();
    for level in as_array(levels, ENDPOINT)? {
        let item = |i: usize| {
            level.get(i).ok_or_else(|| {
                CliError::response(ENDPOINT.method(), format!("short book level {}", level))
            })
        };
        let price = scalar_text(item(0)?, ENDPOINT)?;
        let sort_key: Decimal = price.parse().map_err(|_| {
            CliError::response(ENDPOINT.method(), format!("'{}' is not a price", price))
        })?;
        parsed.push((
            sort_key,
            Level {
                price,
                volume: scalar_text(item(1)?, ENDPOINT)?,
                age: humanize_timestamp(as_epoch(item(2)?, ENDPOINT)?, now),
            },
        ));
    }

    parsed.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(parsed.into_iter().map(|(_, level)| level).collect())
}

fn side_records(levels: &[Level], price_label: &str) -> Vec<Record> {
    levels
        .iter()
        .map(|level| {
            vec![
                field(price_label, level.price.clone()),
                field("Volume", level.volume.clone()),
                field("Age", level.age.clone()),
            ]
        })
        .collect()
}

/// Asks then bids in a single batch, tagged with their side
fn flat_records(book: &Book, short_pair: &str) -> Vec<Record> {
    let tagged = book
        .asks
        .iter()
        .map(|level| ("asks", level))
        .chain(book.bids.iter().map(|level| ("bids", level)));

    tagged
        .map(|(dtype, level)| {
            vec![
                field("dtype", dtype),
                field("pair", short_pair),
                field("price", level.price.clone()),
                field("Volume", level.volume.clone()),
                field("Age", level.age.clone()),
            ]
        })
        .collect()
}
