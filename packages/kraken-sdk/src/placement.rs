//! Order placement parameters

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{SdkError, SdkResult};
use crate::models::Side;
use crate::params::ApiParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderKind {
    Market,
    #[default]
    Limit,
}

impl OrderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderKind::Market => "market",
            OrderKind::Limit => "limit",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "market" => Ok(OrderKind::Market),
            "limit" => Ok(OrderKind::Limit),
            other => Err(format!("invalid order type '{}' (expected market or limit)", other)),
        }
    }
}

/// Whether the account holder acknowledged the API trading agreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TradingAgreement {
    Agreed,
    #[default]
    NotAgreed,
}

impl TradingAgreement {
    /// `agree` is the only accepted value
    pub fn from_setting(value: &str) -> Self {
        if value.trim() == "agree" {
            TradingAgreement::Agreed
        } else {
            TradingAgreement::NotAgreed
        }
    }

    pub fn is_agreed(&self) -> bool {
        matches!(self, TradingAgreement::Agreed)
    }
}

/// Non fatal findings while assembling an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementNotice {
    /// A price was given for a market order and dropped
    PriceIgnored,
    /// Market order sent without an acknowledged trading agreement
    TradingAgreementMissing,
}

impl fmt::Display for PlacementNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementNotice::PriceIgnored => f.write_str("price is ignored for market orders!"),
            PlacementNotice::TradingAgreementMissing => f.write_str(
                "Before being able to use the Kraken API for market orders, orders that trigger \
                 market orders, trailing stop limit orders, and margin orders, you need to agree \
                 to the trading agreement at https://www.kraken.com/u/settings/api and set the \
                 parameter \"trading_agreement\" to \"agree\" in the settings file.",
            ),
        }
    }
}

/// User request for a new order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlacement {
    pub side: Side,
    pub pair: String,
    pub kind: OrderKind,
    pub volume: Decimal,
    pub price: Option<String>,
    pub leverage: String,
    pub start_time: String,
    pub expire_time: String,
    pub user_ref: Option<String>,
    /// Volume is expressed in quote currency
    pub viqc: bool,
    /// Add the post-only flag to limit orders
    pub post_only: bool,
    /// Ask the exchange to validate without submitting
    pub validate: bool,
}

impl OrderPlacement {
    pub fn new(side: Side, pair: impl Into<String>, kind: OrderKind, volume: Decimal) -> Self {
        Self {
            side,
            pair: pair.into(),
            kind,
            volume,
            price: None,
            leverage: "none".to_string(),
            start_time: "0".to_string(),
            expire_time: "0".to_string(),
            user_ref: None,
            viqc: false,
            post_only: true,
            validate: false,
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Build the `AddOrder` parameters.
    ///
    /// A limit order without a price is rejected with
    /// [`SdkError::InvalidOrder`].
    pub fn prepare(&self, agreement: TradingAgreement) -> SdkResult<PreparedOrder> {
        let mut notices = Vec::new();

        let mut params = ApiParams::new()
            .with("pair", &self.pair)
            .with("type", self.side)
            .with("ordertype", self.kind)
            .with("volume", self.volume)
            .with("starttm", &self.start_time)
            .with("expiretm", &self.expire_time)
            .with("leverage", &self.leverage);

        if agreement.is_agreed() {
            params.set("trading_agreement", "agree");
        }

        match self.kind {
            OrderKind::Limit => {
                let price = self.price.as_deref().ok_or_else(|| {
                    SdkError::InvalidOrder("For limit orders, the price must be given!".to_string())
                })?;
                params.set("price", price);
            }
            OrderKind::Market => {
                if self.price.is_some() {
                    notices.push(PlacementNotice::PriceIgnored);
                }
                if !agreement.is_agreed() {
                    notices.push(PlacementNotice::TradingAgreementMissing);
                }
            }
        }

        if let Some(user_ref) = &self.user_ref {
            params.set("userref", user_ref);
        }

        let mut oflags = Vec::new();
        if self.kind == OrderKind::Limit && self.post_only {
            oflags.push("post");
        }
        if self.viqc {
            oflags.push("viqc");
        }
        if !oflags.is_empty() {
            params.set("oflags", oflags.join(","));
        }

        if self.validate {
            params.set("validate", "true");
        }

        Ok(PreparedOrder { params, notices })
    }
}

/// Parameters ready to send plus the notices raised while building them
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedOrder {
    pub params: ApiParams,
    pub notices: Vec<PlacementNotice>,
}
