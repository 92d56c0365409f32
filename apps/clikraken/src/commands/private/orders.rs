use std::io::Write;

use kraken_sdk::{
    orders_from_result, orders_from_value, pair_matches, parse_order_res, sort_by_date,
    sort_by_price, ApiParams, Endpoint, OrderMap, OrderRow, OrderStatus, Tz,
};
use rust_decimal::Decimal;

use crate::api::query_api;
use crate::cli::OrderListArgs;
use crate::context::Context;
use crate::error::CliResult;
use crate::output::{emit, Record};

/// Pair filter value that disables filtering
pub const ALL_PAIRS: &str = "all";

const OPEN_STATUSES: [OrderStatus; 2] = [OrderStatus::Open, OrderStatus::Pending];
const SETTLED_STATUSES: [OrderStatus; 2] = [OrderStatus::Closed, OrderStatus::Canceled];

pub async fn olist(ctx: &Context, args: &OrderListArgs, out: &mut dyn Write) -> CliResult<()> {
    let Some(orders) =
        fetch_orders(ctx, out, args.txid.as_deref(), Endpoint::OpenOrders, "open").await?
    else {
        return Ok(());
    };

    let pair = args
        .pair
        .clone()
        .unwrap_or_else(|| ctx.settings.currency_pair.clone());
    let rows = open_rows(&orders, &pair, ctx.tz());
    emit(out, &ctx.options.format(), &row_records(&rows))
}

pub async fn clist(ctx: &Context, args: &OrderListArgs, out: &mut dyn Write) -> CliResult<()> {
    let Some(orders) =
        fetch_orders(ctx, out, args.txid.as_deref(), Endpoint::ClosedOrders, "closed").await?
    else {
        return Ok(());
    };

    let rows = closed_rows(&orders, args.pair.as_deref(), ctx.tz());
    emit(out, &ctx.options.format(), &row_records(&rows))
}

/// Orders from the listing endpoint, or the given ids through `QueryOrders`
async fn fetch_orders(
    ctx: &Context,
    out: &mut dyn Write,
    txid: Option<&str>,
    listing: Endpoint,
    key: &str,
) -> CliResult<Option<OrderMap>> {
    match txid {
        Some(txid) => {
            let params = ApiParams::new().with("txid", txid);
            let result = query_api(ctx, out, Endpoint::QueryOrders, &params).await?;
            Ok(result.map(orders_from_value).transpose()?)
        }
        None => {
            let result = query_api(ctx, out, listing, &ApiParams::new()).await?;
            Ok(result.map(|r| orders_from_result(&r, key)).transpose()?)
        }
    }
}

/// Open and pending orders of `pair` (or every pair), cheapest first
pub fn open_rows(orders: &OrderMap, pair: &str, tz: &Tz) -> Vec<OrderRow> {
    let mut rows: Vec<OrderRow> = parse_order_res(orders, &OPEN_STATUSES, tz)
        .into_merged()
        .into_iter()
        .filter(|row| pair == ALL_PAIRS || pair_matches(&row.pair, pair))
        .collect();
    sort_by_price(&mut rows);
    rows
}

/// Closed and canceled orders that executed some volume, oldest first
pub fn closed_rows(orders: &OrderMap, pair: Option<&str>, tz: &Tz) -> Vec<OrderRow> {
    let mut rows: Vec<OrderRow> = parse_order_res(orders, &SETTLED_STATUSES, tz)
        .into_merged()
        .into_iter()
        .filter(|row| row.vol_exec_decimal() > Decimal::ZERO)
        .filter(|row| match pair {
            Some(pair) if pair != ALL_PAIRS => pair_matches(&row.pair, pair),
            _ => true,
        })
        .collect();
    sort_by_date(&mut rows);
    rows
}

pub fn row_records(rows: &[OrderRow]) -> Vec<Record> {
    rows.iter()
        .map(|row| {
            row.columns()
                .into_iter()
                .map(|(label, value)| (label.to_string(), value))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kraken_test_utils::fixtures;

    fn open_orders() -> OrderMap {
        orders_from_result(&fixtures::open_orders_result(), "open").unwrap()
    }

    fn closed_orders() -> OrderMap {
        orders_from_result(&fixtures::closed_orders_result(), "closed").unwrap()
    }

    fn ids(rows: &[OrderRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_open_rows_sorted_by_price_across_sides() {
        let rows = open_rows(&open_orders(), "XETHZEUR", &Tz::UTC);
        assert_eq!(ids(&rows), vec!["OQCLML-BW3P3-BUCMWZ", "OB5VMB-B4U2U-DK2WRW"]);
    }

    #[test]
    fn test_open_rows_pair_filter() {
        assert!(open_rows(&open_orders(), "XXBTZEUR", &Tz::UTC).is_empty());
        assert_eq!(open_rows(&open_orders(), ALL_PAIRS, &Tz::UTC).len(), 2);
        assert_eq!(open_rows(&open_orders(), "ETHEUR", &Tz::UTC).len(), 2);
    }

    #[test]
    fn test_closed_rows_skip_unexecuted_and_expired() {
        let rows = closed_rows(&closed_orders(), None, &Tz::UTC);
        assert_eq!(
            ids(&rows),
            vec!["OBTCXX-AAAAA-XBTEUR", "OXXLDC-7RMKD-GHIJKL", "O5KJD2-ZQ2FV-ABCDEF"]
        );
    }

    #[test]
    fn test_closed_rows_pair_filter() {
        let rows = closed_rows(&closed_orders(), Some("XETHZEUR"), &Tz::UTC);
        assert_eq!(ids(&rows), vec!["OXXLDC-7RMKD-GHIJKL", "O5KJD2-ZQ2FV-ABCDEF"]);
        assert_eq!(closed_rows(&closed_orders(), Some(ALL_PAIRS), &Tz::UTC).len(), 3);
    }

    #[test]
    fn test_row_records_keep_column_order() {
        let rows = closed_rows(&closed_orders(), Some("XETHZEUR"), &Tz::UTC);
        let records = row_records(&rows);
        let labels: Vec<&str> = records[0].iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "orderid", "status", "type", "vol", "vol_exec", "pair", "ordertype", "price",
                "cost", "fee", "viqc", "closing_date"
            ]
        );
    }
}
