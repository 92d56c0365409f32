use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SdkError, SdkResult};

// ============================================================================
// ENVELOPE
// ============================================================================

/// Wrapper carried by every API response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub error: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl Envelope {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_result(&self) -> bool {
        self.result.as_ref().is_some_and(|v| !is_empty_value(v))
    }

    /// The result, or `None` when it is absent or empty
    pub fn into_result(self) -> Option<Value> {
        self.result.filter(|v| !is_empty_value(v))
    }
}

/// Null, `false`, zero, and empty strings, arrays or objects count as empty
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

// ============================================================================
// ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(format!("invalid side '{}' (expected buy or sell)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Open,
    Closed,
    Canceled,
    Expired,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Open => "open",
            OrderStatus::Closed => "closed",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ORDER RECORDS
// ============================================================================

/// The `descr` sub-object of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDescription {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: Side,
    pub ordertype: String,
    /// Requested (limit) price
    pub price: String,
    #[serde(default)]
    pub order: Option<String>,
}

/// Order that has not executed yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub descr: OrderDescription,
    pub vol: String,
    pub oflags: String,
    pub opentm: f64,
}

/// Order that reached a final state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettledOrder {
    pub descr: OrderDescription,
    pub vol: String,
    pub vol_exec: String,
    /// Average execution price
    pub price: String,
    pub cost: String,
    pub fee: String,
    pub oflags: String,
    pub closetm: f64,
}

/// Order as returned by the order listing methods.
///
/// The exchange exposes a different attribute set depending on the order
/// status, so each status carries its own shape. A record missing a field
/// required by its status fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OrderRecord {
    Pending(OpenOrder),
    Open(OpenOrder),
    Closed(SettledOrder),
    Canceled(SettledOrder),
    Expired(SettledOrder),
}

impl OrderRecord {
    pub fn status(&self) -> OrderStatus {
        match self {
            OrderRecord::Pending(_) => OrderStatus::Pending,
            OrderRecord::Open(_) => OrderStatus::Open,
            OrderRecord::Closed(_) => OrderStatus::Closed,
            OrderRecord::Canceled(_) => OrderStatus::Canceled,
            OrderRecord::Expired(_) => OrderStatus::Expired,
        }
    }

    pub fn descr(&self) -> &OrderDescription {
        match self {
            OrderRecord::Pending(o) | OrderRecord::Open(o) => &o.descr,
            OrderRecord::Closed(o) | OrderRecord::Canceled(o) | OrderRecord::Expired(o) => {
                &o.descr
            }
        }
    }

    pub fn oflags(&self) -> &str {
        match self {
            OrderRecord::Pending(o) | OrderRecord::Open(o) => &o.oflags,
            OrderRecord::Closed(o) | OrderRecord::Canceled(o) | OrderRecord::Expired(o) => {
                &o.oflags
            }
        }
    }

    /// True if `flag` is one of the comma separated order flags
    pub fn has_flag(&self, flag: &str) -> bool {
        self.oflags().split(',').any(|f| f.trim() == flag)
    }
}

/// Orders keyed by transaction id
pub type OrderMap = BTreeMap<String, OrderRecord>;

/// Decode an order map from a result value
pub fn orders_from_value(value: Value) -> SdkResult<OrderMap> {
    Ok(serde_json::from_value(value)?)
}

/// Extract and decode the order map stored under `key` (e.g. `open`)
pub fn orders_from_result(result: &Value, key: &str) -> SdkResult<OrderMap> {
    let orders = result
        .get(key)
        .cloned()
        .ok_or_else(|| SdkError::InvalidResponse(format!("missing '{}' in result", key)))?;
    orders_from_value(orders)
}
