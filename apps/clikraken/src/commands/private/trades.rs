use std::io::Write;

use kraken_sdk::{format_timestamp, pair_matches, strip_asset_prefix, ApiParams, Endpoint, Tz};
use serde_json::Value;

use crate::api::{as_object, epoch, query_api, require, text};
use crate::cli::TradesArgs;
use crate::commands::private::orders::ALL_PAIRS;
use crate::context::Context;
use crate::error::CliResult;
use crate::output::{emit, field, Record};

const FIELDS: [&str; 8] = [
    "ordertype", "vol", "price", "cost", "fee", "margin", "ordertxid", "misc",
];

pub async fn run(ctx: &Context, args: &TradesArgs, out: &mut dyn Write) -> CliResult<()> {
    let (endpoint, params) = trades_request(args);

    let Some(result) = query_api(ctx, out, endpoint, &params).await? else {
        return Ok(());
    };

    let trades = match endpoint {
        Endpoint::TradesHistory => require(&result, "trades", endpoint)?,
        _ => &result,
    };

    let records = trade_records(trades, args.pair.as_deref(), ctx.tz())?;
    emit(out, &ctx.options.format(), &records)
}

/// `QueryTrades` for explicit ids, `TradesHistory` otherwise
pub fn trades_request(args: &TradesArgs) -> (Endpoint, ApiParams) {
    let params = ApiParams::new()
        .with_opt("type", args.trade_type.as_deref())
        .with_opt("start", args.start.as_deref())
        .with_opt("end", args.end.as_deref())
        .with_opt("ofs", args.ofs.as_deref());

    match &args.id {
        Some(id) => (Endpoint::QueryTrades, params.with("txid", id)),
        None => (Endpoint::TradesHistory, params),
    }
}

/// Own trades of `pair` (all when absent or `all`), oldest first
pub fn trade_records(trades: &Value, pair: Option<&str>, tz: &Tz) -> CliResult<Vec<Record>> {
    const EP: Endpoint = Endpoint::TradesHistory;
    let mut rows = Vec::new();

    for (txid, trade) in as_object(trades, EP)? {
        let trade_pair = text(trade, "pair", EP)?;
        let keep = match pair {
            Some(pair) if pair != ALL_PAIRS => pair_matches(&trade_pair, pair),
            _ => true,
        };
        if !keep {
            continue;
        }

        let time = epoch(trade, "time", EP)?;
        let mut record = vec![
            field("txid", txid.as_str()),
            field("time", format_timestamp(time, tz)),
            field("pair", strip_asset_prefix(&trade_pair)),
            field("type", text(trade, "type", EP)?),
        ];
        for key in FIELDS {
            let value = trade.get(key).cloned().unwrap_or(Value::Null);
            record.push(field(key, value));
        }
        rows.push((time, record));
    }

    rows.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(rows.into_iter().map(|(_, record)| record).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::cell_text;
    use serde_json::json;

    fn trades() -> Value {
        json!({
            "THVRQM-33VKH-UCI7BS": {
                "ordertxid": "OQCLML-BW3P3-BUCMWZ", "pair": "XXBTZUSD", "time": 1500000200.0,
                "type": "buy", "ordertype": "limit", "price": "2500.0", "cost": "250.0",
                "fee": "0.4", "vol": "0.1", "margin": "0.0", "misc": ""
            },
            "TCWJEG-FL4SZ-3FKGH6": {
                "ordertxid": "OMMDB2-FSB6Z-7W3HPO", "pair": "XETHZEUR", "time": 1500000100.0,
                "type": "sell", "ordertype": "market", "price": "250.0", "cost": "25.0",
                "fee": "0.04", "vol": "0.1", "margin": "0.0", "misc": ""
            }
        })
    }

    #[test]
    fn test_trade_records_sorted_by_time() {
        let records = trade_records(&trades(), None, &Tz::UTC).unwrap();
        assert_eq!(cell_text(&records[0][0].1), "TCWJEG-FL4SZ-3FKGH6");
        assert_eq!(cell_text(&records[1][0].1), "THVRQM-33VKH-UCI7BS");
        assert_eq!(records[0].len(), 12);
        assert_eq!(records[0][4].0, "ordertype");
        assert_eq!(cell_text(&records[0][4].1), "market");
    }

    #[test]
    fn test_trade_records_pair_filter() {
        let records = trade_records(&trades(), Some("XETHZEUR"), &Tz::UTC).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            trade_records(&trades(), Some(ALL_PAIRS), &Tz::UTC).unwrap().len(),
            2
        );
    }

    #[test]
    fn test_trades_request() {
        let (endpoint, params) = trades_request(&TradesArgs::default());
        assert_eq!(endpoint, Endpoint::TradesHistory);
        assert!(params.is_empty());

        let args = TradesArgs {
            id: Some("THVRQM-33VKH-UCI7BS".to_string()),
            ..TradesArgs::default()
        };
        let (endpoint, params) = trades_request(&args);
        assert_eq!(endpoint, Endpoint::QueryTrades);
        assert_eq!(params.get("txid"), Some("THVRQM-33VKH-UCI7BS"));
    }
}
