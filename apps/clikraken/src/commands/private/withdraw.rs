use std::io::Write;

use kraken_sdk::{ApiParams, Endpoint};
use serde_json::Value;

use crate::api::{as_array, as_object, query_api};
use crate::cli::{AssetArgs, WithdrawArgs};
use crate::context::Context;
use crate::error::CliResult;
use crate::output::{emit, Record};

pub async fn withdraw(ctx: &Context, args: &WithdrawArgs, out: &mut dyn Write) -> CliResult<()> {
    single_row(ctx, Endpoint::Withdraw, withdraw_params(ctx, args), out).await
}

pub async fn information(
    ctx: &Context,
    args: &WithdrawArgs,
    out: &mut dyn Write,
) -> CliResult<()> {
    single_row(ctx, Endpoint::WithdrawInfo, withdraw_params(ctx, args), out).await
}

pub async fn list(ctx: &Context, args: &AssetArgs, out: &mut dyn Write) -> CliResult<()> {
    let asset = args.asset.clone().unwrap_or_else(|| ctx.settings.asset.clone());
    let params = ApiParams::new().with("asset", asset);

    let Some(result) = query_api(ctx, out, Endpoint::WithdrawStatus, &params).await? else {
        return Ok(());
    };

    let records = as_array(&result, Endpoint::WithdrawStatus)?
        .iter()
        .map(|entry| object_record(entry, Endpoint::WithdrawStatus))
        .collect::<CliResult<Vec<Record>>>()?;
    emit(out, &ctx.options.format(), &records)
}

fn withdraw_params(ctx: &Context, args: &WithdrawArgs) -> ApiParams {
    let asset = args.asset.clone().unwrap_or_else(|| ctx.settings.asset.clone());
    ApiParams::new()
        .with("asset", asset)
        .with("amount", args.amount)
        .with("key", &args.key)
}

async fn single_row(
    ctx: &Context,
    endpoint: Endpoint,
    params: ApiParams,
    out: &mut dyn Write,
) -> CliResult<()> {
    let Some(result) = query_api(ctx, out, endpoint, &params).await? else {
        return Ok(());
    };
    emit(out, &ctx.options.format(), &[object_record(&result, endpoint)?])
}

/// The fields of a JSON object as one record, in response order
pub fn object_record(value: &Value, endpoint: Endpoint) -> CliResult<Record> {
    Ok(as_object(value, endpoint)?
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_record_keeps_response_order() {
        let value = json!({"method": "Ether", "limit": "10", "fee": "0.005"});
        let record = object_record(&value, Endpoint::WithdrawInfo).unwrap();
        let keys: Vec<&str> = record.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["method", "limit", "fee"]);
    }

    #[test]
    fn test_object_record_rejects_arrays() {
        assert!(object_record(&json!([1, 2]), Endpoint::Withdraw).is_err());
    }
}
