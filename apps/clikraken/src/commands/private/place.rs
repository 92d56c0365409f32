use std::io::Write;

use kraken_sdk::{Endpoint, OrderPlacement, PlacementNotice};
use serde_json::Value;

use crate::api::query_api;
use crate::cli::PlaceArgs;
use crate::context::Context;
use crate::error::CliResult;

/// Turn the command line arguments into an order request
pub fn placement_from_args(args: &PlaceArgs, default_pair: &str) -> OrderPlacement {
    let pair = args.pair.clone().unwrap_or_else(|| default_pair.to_string());
    let mut placement = OrderPlacement::new(args.side, pair, args.ordertype, args.volume);
    placement.price = args.price.clone();
    placement.leverage = args.leverage.clone();
    placement.start_time = args.starttm.clone();
    placement.expire_time = args.expiretm.clone();
    placement.user_ref = args.userref.clone();
    placement.viqc = args.viqc;
    placement.post_only = !args.nopost;
    placement.validate = args.validate;
    placement
}

pub async fn run(ctx: &Context, args: &PlaceArgs, out: &mut dyn Write) -> CliResult<()> {
    let placement = placement_from_args(args, &ctx.settings.currency_pair);
    // A limit order without a price is rejected here, before any request
    let prepared = placement.prepare(ctx.settings.trading_agreement)?;

    for notice in &prepared.notices {
        match notice {
            PlacementNotice::TradingAgreementMissing => ctx.logger.warn(&format!(
                "{} (settings file: {})",
                notice,
                ctx.settings.settings_path.display()
            )),
            PlacementNotice::PriceIgnored => ctx.logger.warn(&notice.to_string()),
        }
    }

    let Some(result) = query_api(ctx, out, Endpoint::AddOrder, &prepared.params).await? else {
        return Ok(());
    };

    writeln!(out, "{}", order_description(&result))?;

    let txids = txids(&result);
    if txids.is_empty() {
        if args.validate {
            ctx.logger.info("Validating inputs only. Order not submitted!");
        } else {
            ctx.logger.warn("Order was NOT successfully added!");
        }
    } else {
        for txid in txids {
            writeln!(out, "{}", txid)?;
        }
    }

    Ok(())
}

pub fn order_description(result: &Value) -> &str {
    result
        .get("descr")
        .and_then(|d| d.get("order"))
        .and_then(Value::as_str)
        .unwrap_or("No description available!")
}

pub fn txids(result: &Value) -> Vec<&str> {
    result
        .get("txid")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
