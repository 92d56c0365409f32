use std::io::Write;

use kraken_sdk::{ApiParams, Endpoint};
use serde_json::Value;

use crate::api::{as_object, query_api, text};
use crate::context::Context;
use crate::error::CliResult;
use crate::output::{emit, field, render_table, OutputFormat, Record};

const ENDPOINT: Endpoint = Endpoint::AssetPairs;

pub async fn run(ctx: &Context, out: &mut dyn Write) -> CliResult<()> {
    let Some(result) = query_api(ctx, out, ENDPOINT, &ApiParams::new()).await? else {
        return Ok(());
    };

    let records = asset_pair_records(&result)?;

    match ctx.options.format() {
        OutputFormat::Table => {
            writeln!(out, "{}", render_table(&records))?;
            writeln!(out, "--- Total: {} pairs", records.len())?;
            Ok(())
        }
        format => emit(out, &format, &records),
    }
}

/// Tradeable pairs, dark pool (`.d`) pairs excluded
pub fn asset_pair_records(result: &Value) -> CliResult<Vec<Record>> {
    let mut records = Vec::new();
    for (pair, info) in as_object(result, ENDPOINT)? {
        if pair.ends_with(".d") {
            continue;
        }
        records.push(vec![
            field("Pair", pair.as_str()),
            field("Alt Name", text(info, "altname", ENDPOINT)?),
            field("Base", text(info, "base", ENDPOINT)?),
            field("Quote", text(info, "quote", ENDPOINT)?),
        ]);
    }
    Ok(records)
}
