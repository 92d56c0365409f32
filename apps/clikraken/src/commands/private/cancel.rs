use std::io::Write;

use kraken_sdk::{is_empty_value, ApiParams, Endpoint};
use serde_json::Value;

use crate::api::query_api;
use crate::cli::CancelArgs;
use crate::context::Context;
use crate::error::CliResult;

/// Cancel each order in turn; stops at the first call without result
pub async fn run(ctx: &Context, args: &CancelArgs, out: &mut dyn Write) -> CliResult<()> {
    for order_id in &args.order_ids {
        let params = ApiParams::new().with("txid", order_id);
        let Some(result) = query_api(ctx, out, Endpoint::CancelOrder, &params).await? else {
            return Ok(());
        };

        if let Some(count) = truthy(&result, "count") {
            writeln!(out, "{} - count: {}", order_id, count)?;
        }
        if truthy(&result, "pending").is_some() {
            ctx.logger.info(&format!(
                "{} - order(s) is/are pending cancellation!",
                order_id
            ));
        }
    }
    Ok(())
}

fn truthy<'a>(result: &'a Value, key: &str) -> Option<&'a Value> {
    result.get(key).filter(|v| !is_empty_value(v))
}
