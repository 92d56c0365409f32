use std::io::Write;

use kraken_sdk::{format_timestamp, ApiParams, Endpoint, Tz};
use serde_json::Value;

use crate::api::{as_object, epoch, query_api, scalar_text, text};
use crate::context::Context;
use crate::error::CliResult;
use crate::output::{emit, field, Record};

const ENDPOINT: Endpoint = Endpoint::OpenPositions;

pub async fn run(ctx: &Context, out: &mut dyn Write) -> CliResult<()> {
    let params = ApiParams::new().with("docalcs", "true");
    let Some(result) = query_api(ctx, out, ENDPOINT, &params).await? else {
        return Ok(());
    };

    emit(out, &ctx.options.format(), &position_records(&result, ctx.tz())?)
}

pub fn position_records(result: &Value, tz: &Tz) -> CliResult<Vec<Record>> {
    let mut records = Vec::new();

    for position in as_object(result, ENDPOINT)?.values() {
        // value and net are only present when the exchange computed them
        let optional = |key: &str| {
            position
                .get(key)
                .and_then(|v| scalar_text(v, ENDPOINT).ok())
                .unwrap_or_default()
        };
        let rollover = match position.get("rollovertm") {
            Some(_) => format_timestamp(epoch(position, "rollovertm", ENDPOINT)?, tz),
            None => String::new(),
        };

        records.push(vec![
            field("ordertxid", text(position, "ordertxid", ENDPOINT)?),
            field(
                "opening time",
                format_timestamp(epoch(position, "time", ENDPOINT)?, tz),
            ),
            field("type", text(position, "type", ENDPOINT)?),
            field("volume", text(position, "vol", ENDPOINT)?),
            field("pair", text(position, "pair", ENDPOINT)?),
            field("ordertype", text(position, "ordertype", ENDPOINT)?),
            field("cost", text(position, "cost", ENDPOINT)?),
            field("fee", text(position, "fee", ENDPOINT)?),
            field("margin", text(position, "margin", ENDPOINT)?),
            field("value", optional("value")),
            field("profit/loss", optional("net")),
            field("rollover time", rollover),
            field("rollover terms", optional("terms")),
        ]);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::cell_text;
    use serde_json::json;

    #[test]
    fn test_position_records() {
        let result = json!({
            "TF5GVO-T7ZZ2-6NBKBI": {
                "ordertxid": "OLWNFG-LLH4R-D6SFFP",
                "pair": "XXBTZUSD",
                "time": 1500000000.0,
                "type": "buy",
                "ordertype": "limit",
                "cost": "1000.0",
                "fee": "2.6",
                "vol": "0.5",
                "margin": "200.0",
                "value": "1010.0",
                "net": "+10.0",
                "rollovertm": "1500014400",
                "terms": "0.0100% per 4 hours"
            }
        });

        let records = position_records(&result, &Tz::UTC).unwrap();
        assert_eq!(records.len(), 1);
        let cells: Vec<String> = records[0].iter().map(|(_, v)| cell_text(v)).collect();
        assert_eq!(cells[0], "OLWNFG-LLH4R-D6SFFP");
        assert_eq!(cells[1], "2017-07-14 02:40:00+00:00");
        assert_eq!(cells[10], "+10.0");
        assert_eq!(cells[11], "2017-07-14 06:40:00+00:00");
    }

    #[test]
    fn test_position_without_calculations() {
        let result = json!({
            "T": {
                "ordertxid": "O", "pair": "XXBTZUSD", "time": 0, "type": "sell",
                "ordertype": "market", "cost": "1", "fee": "0", "vol": "1", "margin": "0"
            }
        });
        let records = position_records(&result, &Tz::UTC).unwrap();
        assert_eq!(cell_text(&records[0][9].1), "");
        assert_eq!(cell_text(&records[0][11].1), "");
    }
}
