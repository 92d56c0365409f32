//! Kraken SDK
//!
//! Rust SDK for the Kraken REST API.
//!
//! This SDK provides:
//! - REST client for public and private (signed) methods
//! - Credential loading from key files
//! - Order listing normalisation and order placement parameters
//! - Asset pair name helpers
//! - Formatting utilities
//! - Configurable logging with a cron friendly severity policy
//!
//! # Example
//!
//! ```no_run
//! use kraken_sdk::{ApiParams, Endpoint, KrakenClient, TracingLogger, DEFAULT_API_URL};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = KrakenClient::new(DEFAULT_API_URL, Arc::new(TracingLogger)).unwrap();
//!
//!     let params = ApiParams::new().with("pair", "XETHZEUR");
//!     let envelope = client.call(Endpoint::Ticker, &params).await.unwrap();
//!     if let Some(result) = envelope.into_result() {
//!         println!("{}", result);
//!     }
//! }
//! ```

pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod format;
pub mod logger;
pub mod models;
pub mod orders;
pub mod pairs;
pub mod params;
pub mod placement;
pub mod signing;

pub use client::{KrakenClient, API_VERSION, DEFAULT_API_URL};
pub use credentials::Credentials;
pub use endpoints::{Access, Endpoint};
pub use error::{ErrorKind, SdkError, SdkResult};
pub use format::{format_quote_volume, format_timestamp, humanize_timestamp, now_timestamp};
pub use logger::{LogLevel, LogPolicy, Logger, MemoryLogger, NoopLogger, TracingLogger};
pub use models::{
    is_empty_value, orders_from_result, orders_from_value, Envelope, OrderDescription, OrderMap,
    OrderRecord, OrderStatus, OpenOrder, SettledOrder, Side,
};
pub use orders::{
    parse_order_res, sort_by_date, sort_by_price, OrderDate, OrderRow, SplitOrders,
    DEFAULT_STATUS_FILTER,
};
pub use pairs::{
    asset_pair_short, base_quote_short_from_asset_pair, pair_matches, strip_asset_prefix,
    PairSplit,
};
pub use params::ApiParams;
pub use placement::{OrderKind, OrderPlacement, PlacementNotice, PreparedOrder, TradingAgreement};

// Re-exported so callers can name the timezone type without a direct dependency
pub use chrono_tz::Tz;
