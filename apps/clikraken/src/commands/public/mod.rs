//! Commands backed by the public API

pub mod asset_pairs;
pub mod depth;
pub mod last_trades;
pub mod ohlc;
pub mod ticker;
