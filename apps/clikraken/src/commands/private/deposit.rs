use std::io::Write;

use kraken_sdk::{format_timestamp, strip_asset_prefix, ApiParams, Endpoint, Tz};
use serde_json::Value;

use crate::api::{as_array, as_epoch, query_api, require, text};
use crate::cli::{AssetArgs, DepositAddressesArgs};
use crate::context::Context;
use crate::error::CliResult;
use crate::output::{emit, field, Record};

pub async fn methods(ctx: &Context, args: &AssetArgs, out: &mut dyn Write) -> CliResult<()> {
    let asset = args.asset.clone().unwrap_or_else(|| ctx.settings.asset.clone());
    let params = ApiParams::new().with("asset", &asset);

    let Some(result) = query_api(ctx, out, Endpoint::DepositMethods, &params).await? else {
        return Ok(());
    };

    emit(out, &ctx.options.format(), &method_records(&result, &asset)?)
}

/// Deposit methods sorted by asset then method name
pub fn method_records(result: &Value, asset: &str) -> CliResult<Vec<Record>> {
    const EP: Endpoint = Endpoint::DepositMethods;
    let asset = strip_asset_prefix(asset);
    let mut rows = Vec::new();

    for method in as_array(result, EP)? {
        let name = text(method, "method", EP)?;
        let record = vec![
            field("asset", asset),
            field("method", name.clone()),
            field("fee", require(method, "fee", EP)?.clone()),
            field("limit", require(method, "limit", EP)?.clone()),
            field("gen-address", require(method, "gen-address", EP)?.clone()),
        ];
        rows.push((format!("{}{}", asset, name), record));
    }

    rows.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(rows.into_iter().map(|(_, record)| record).collect())
}

pub async fn addresses(
    ctx: &Context,
    args: &DepositAddressesArgs,
    out: &mut dyn Write,
) -> CliResult<()> {
    let asset = args.asset.clone().unwrap_or_else(|| ctx.settings.asset.clone());
    let params = ApiParams::new()
        .with("asset", &asset)
        .with_opt("method", args.method.as_deref())
        .with_opt("new", args.new.then_some("true"));

    let Some(result) = query_api(ctx, out, Endpoint::DepositAddresses, &params).await? else {
        return Ok(());
    };

    if args.one {
        if let Some(address) = preferred_address(&result)? {
            writeln!(out, "{}", address)?;
        }
        return Ok(());
    }

    emit(
        out,
        &ctx.options.format(),
        &address_records(&result, &asset, ctx.tz())?,
    )
}

/// First unused address, or the first address when all were used
pub fn preferred_address(result: &Value) -> CliResult<Option<String>> {
    const EP: Endpoint = Endpoint::DepositAddresses;
    let addresses = as_array(result, EP)?;
    let chosen = addresses
        .iter()
        .find(|a| is_new(a))
        .or_else(|| addresses.first());
    chosen.map(|a| text(a, "address", EP)).transpose()
}

/// Addresses sorted by expiry, unexpiring ones first
pub fn address_records(result: &Value, asset: &str, tz: &Tz) -> CliResult<Vec<Record>> {
    const EP: Endpoint = Endpoint::DepositAddresses;
    let asset = strip_asset_prefix(asset);
    let mut rows = Vec::new();

    for address in as_array(result, EP)? {
        let expires = match address.get("expiretm") {
            Some(value) => as_epoch(value, EP)?,
            None => 0.0,
        };
        let expiretm = if expires > 0.0 {
            format_timestamp(expires, tz)
        } else {
            String::new()
        };

        let record = vec![
            field("asset", asset),
            field("address", text(address, "address", EP)?),
            field("new", is_new(address)),
            field("expiretm", expiretm.clone()),
        ];
        rows.push((expiretm, record));
    }

    rows.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(rows.into_iter().map(|(_, record)| record).collect())
}

fn is_new(address: &Value) -> bool {
    address.get("new").and_then(Value::as_bool).unwrap_or(false)
}
