use std::io::Write;

use kraken_sdk::{format_timestamp, strip_asset_prefix, ApiParams, Endpoint, Tz};
use serde_json::Value;

use crate::api::{as_object, epoch, query_api, require, text};
use crate::cli::LedgersArgs;
use crate::context::Context;
use crate::error::CliResult;
use crate::output::{emit, field, Record};

pub async fn run(ctx: &Context, args: &LedgersArgs, out: &mut dyn Write) -> CliResult<()> {
    let (endpoint, params) = ledger_request(args);

    let Some(result) = query_api(ctx, out, endpoint, &params).await? else {
        return Ok(());
    };

    let entries = match endpoint {
        Endpoint::Ledgers => require(&result, "ledger", endpoint)?,
        _ => &result,
    };

    emit(out, &ctx.options.format(), &ledger_records(entries, ctx.tz())?)
}

/// `QueryLedgers` for explicit ids, `Ledgers` with the filters otherwise
pub fn ledger_request(args: &LedgersArgs) -> (Endpoint, ApiParams) {
    match &args.id {
        Some(id) => (Endpoint::QueryLedgers, ApiParams::new().with("id", id)),
        None => (
            Endpoint::Ledgers,
            ApiParams::new()
                .with("asset", &args.asset)
                .with("type", &args.ledger_type)
                .with_opt("start", args.start.as_deref())
                .with_opt("end", args.end.as_deref())
                .with_opt("ofs", args.ofs.as_deref()),
        ),
    }
}

/// Ledger entries, oldest first
pub fn ledger_records(entries: &Value, tz: &Tz) -> CliResult<Vec<Record>> {
    const EP: Endpoint = Endpoint::Ledgers;
    let mut rows = Vec::new();

    for (id, entry) in as_object(entries, EP)? {
        let time = epoch(entry, "time", EP)?;
        let asset = text(entry, "asset", EP)?;
        let record = vec![
            field("id", id.as_str()),
            field("refid", text(entry, "refid", EP)?),
            field("time", format_timestamp(time, tz)),
            field("type", text(entry, "type", EP)?),
            field("asset", strip_asset_prefix(&asset)),
            field("aclass", text(entry, "aclass", EP)?),
            field("amount", text(entry, "amount", EP)?),
            field("fee", text(entry, "fee", EP)?),
            field("balance", text(entry, "balance", EP)?),
        ];
        rows.push((time, record));
    }

    rows.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(rows.into_iter().map(|(_, record)| record).collect())
}
