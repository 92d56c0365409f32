//! Normalisation of order listing responses
//!
//! Turns the status dependent order records into uniform rows split by side.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::format::format_timestamp;
use crate::models::{OrderRecord, OrderStatus, Side};

/// Statuses kept when the caller does not pass a filter
pub const DEFAULT_STATUS_FILTER: [OrderStatus; 2] = [OrderStatus::Open, OrderStatus::Closed];

/// Opening date for pending/open orders, closing date otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum OrderDate {
    Opening { formatted: String, epoch: f64 },
    Closing { formatted: String, epoch: f64 },
}

impl OrderDate {
    pub fn label(&self) -> &'static str {
        match self {
            OrderDate::Opening { .. } => "opening_date",
            OrderDate::Closing { .. } => "closing_date",
        }
    }

    pub fn formatted(&self) -> &str {
        match self {
            OrderDate::Opening { formatted, .. } | OrderDate::Closing { formatted, .. } => {
                formatted
            }
        }
    }

    pub fn epoch(&self) -> f64 {
        match self {
            OrderDate::Opening { epoch, .. } | OrderDate::Closing { epoch, .. } => *epoch,
        }
    }
}

/// Uniform view of one order.
///
/// `vol_exec`, `cost` and `fee` are only set for settled orders.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: String,
    pub status: OrderStatus,
    pub side: Side,
    pub vol: String,
    pub vol_exec: Option<String>,
    pub pair: String,
    pub ordertype: String,
    pub price: String,
    pub cost: Option<String>,
    pub fee: Option<String>,
    pub viqc: bool,
    pub date: OrderDate,
}

impl OrderRow {
    pub fn from_record(id: &str, record: &OrderRecord, tz: &Tz) -> Self {
        let descr = record.descr();
        let viqc = record.has_flag("viqc");

        match record {
            OrderRecord::Pending(order) | OrderRecord::Open(order) => OrderRow {
                id: id.to_string(),
                status: record.status(),
                side: descr.side,
                vol: order.vol.clone(),
                vol_exec: None,
                pair: descr.pair.clone(),
                ordertype: descr.ordertype.clone(),
                price: descr.price.clone(),
                cost: None,
                fee: None,
                viqc,
                date: OrderDate::Opening {
                    formatted: format_timestamp(order.opentm, tz),
                    epoch: order.opentm,
                },
            },
            OrderRecord::Closed(order)
            | OrderRecord::Canceled(order)
            | OrderRecord::Expired(order) => OrderRow {
                id: id.to_string(),
                status: record.status(),
                side: descr.side,
                vol: order.vol.clone(),
                vol_exec: Some(order.vol_exec.clone()),
                pair: descr.pair.clone(),
                ordertype: descr.ordertype.clone(),
                price: order.price.clone(),
                cost: Some(order.cost.clone()),
                fee: Some(order.fee.clone()),
                viqc,
                date: OrderDate::Closing {
                    formatted: format_timestamp(order.closetm, tz),
                    epoch: order.closetm,
                },
            },
        }
    }

    /// Ordered (label, value) columns of the row
    pub fn columns(&self) -> Vec<(&'static str, Value)> {
        let text = |s: &str| Value::String(s.to_string());

        let mut cols = vec![
            ("orderid", text(&self.id)),
            ("status", text(self.status.as_str())),
            ("type", text(self.side.as_str())),
            ("vol", text(&self.vol)),
        ];
        if let Some(vol_exec) = &self.vol_exec {
            cols.push(("vol_exec", text(vol_exec)));
        }
        cols.push(("pair", text(&self.pair)));
        cols.push(("ordertype", text(&self.ordertype)));
        cols.push(("price", text(&self.price)));
        if let Some(cost) = &self.cost {
            cols.push(("cost", text(cost)));
        }
        if let Some(fee) = &self.fee {
            cols.push(("fee", text(fee)));
        }
        cols.push(("viqc", Value::Bool(self.viqc)));
        cols.push((self.date.label(), text(self.date.formatted())));
        cols
    }

    /// Price as a decimal, `None` when the string is not a number
    pub fn price_decimal(&self) -> Option<Decimal> {
        self.price.parse().ok()
    }

    /// Executed volume as a decimal, zero for open orders
    pub fn vol_exec_decimal(&self) -> Decimal {
        self.vol_exec
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

/// Rows split by order side
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitOrders {
    pub buy: Vec<OrderRow>,
    pub sell: Vec<OrderRow>,
}

impl SplitOrders {
    pub fn is_empty(&self) -> bool {
        self.buy.is_empty() && self.sell.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buy.len() + self.sell.len()
    }

    /// Buy rows followed by sell rows
    pub fn into_merged(self) -> Vec<OrderRow> {
        let mut all = self.buy;
        all.extend(self.sell);
        all
    }
}

/// Normalise order records and keep those whose status is in
/// `status_filter`, routed by side.
pub fn parse_order_res<'a, I>(orders: I, status_filter: &[OrderStatus], tz: &Tz) -> SplitOrders
where
    I: IntoIterator<Item = (&'a String, &'a OrderRecord)>,
{
    let mut split = SplitOrders::default();

    for (id, record) in orders {
        if !status_filter.contains(&record.status()) {
            continue;
        }
        let row = OrderRow::from_record(id, record, tz);
        match row.side {
            Side::Buy => split.buy.push(row),
            Side::Sell => split.sell.push(row),
        }
    }

    split
}

/// Sort rows by ascending price, unparsable prices last
pub fn sort_by_price(rows: &mut [OrderRow]) {
    rows.sort_by(|a, b| match (a.price_decimal(), b.price_decimal()) {
        (Some(pa), Some(pb)) => pa.cmp(&pb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Sort rows by ascending date
pub fn sort_by_date(rows: &mut [OrderRow]) {
    rows.sort_by(|a, b| a.date.epoch().total_cmp(&b.date.epoch()));
}
