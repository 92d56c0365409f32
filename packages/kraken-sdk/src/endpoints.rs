use std::fmt;

/// Access level of an API method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Private,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Private => "private",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote methods used by the client.
///
/// `method()` is the exact name expected by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    // Public
    Ticker,
    Depth,
    Trades,
    Ohlc,
    AssetPairs,
    // Private
    Balance,
    TradeBalance,
    OpenOrders,
    ClosedOrders,
    QueryOrders,
    AddOrder,
    CancelOrder,
    DepositAddresses,
    DepositMethods,
    Ledgers,
    QueryLedgers,
    TradesHistory,
    QueryTrades,
    Withdraw,
    WithdrawStatus,
    WithdrawInfo,
    OpenPositions,
}

impl Endpoint {
    pub fn method(&self) -> &'static str {
        match self {
            Endpoint::Ticker => "Ticker",
            Endpoint::Depth => "Depth",
            Endpoint::Trades => "Trades",
            Endpoint::Ohlc => "OHLC",
            Endpoint::AssetPairs => "AssetPairs",
            Endpoint::Balance => "Balance",
            Endpoint::TradeBalance => "TradeBalance",
            Endpoint::OpenOrders => "OpenOrders",
            Endpoint::ClosedOrders => "ClosedOrders",
            Endpoint::QueryOrders => "QueryOrders",
            Endpoint::AddOrder => "AddOrder",
            Endpoint::CancelOrder => "CancelOrder",
            Endpoint::DepositAddresses => "DepositAddresses",
            Endpoint::DepositMethods => "DepositMethods",
            Endpoint::Ledgers => "Ledgers",
            Endpoint::QueryLedgers => "QueryLedgers",
            Endpoint::TradesHistory => "TradesHistory",
            Endpoint::QueryTrades => "QueryTrades",
            Endpoint::Withdraw => "Withdraw",
            Endpoint::WithdrawStatus => "WithdrawStatus",
            Endpoint::WithdrawInfo => "WithdrawInfo",
            Endpoint::OpenPositions => "OpenPositions",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Endpoint::Ticker
            | Endpoint::Depth
            | Endpoint::Trades
            | Endpoint::Ohlc
            | Endpoint::AssetPairs => Access::Public,
            _ => Access::Private,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}
