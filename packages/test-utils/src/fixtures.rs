//! Canned `result` payloads shaped like real exchange answers

use serde_json::{json, Value};

/// Secret of the exchange's published signing example
pub const TEST_API_SECRET: &str =
    "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";
pub const TEST_API_KEY: &str = "test-api-key";

/// Key file contents for [`TEST_API_KEY`] / [`TEST_API_SECRET`]
pub fn key_file_contents() -> String {
    format!("{}\n{}\n", TEST_API_KEY, TEST_API_SECRET)
}

/// Two open ETHEUR orders: a buy at 100 and a sell at 90
pub fn open_orders_result() -> Value {
    json!({
        "open": {
            "OB5VMB-B4U2U-DK2WRW": {
                "refid": null,
                "userref": 0,
                "status": "open",
                "opentm": 1500000000.1234,
                "starttm": 0,
                "expiretm": 0,
                "descr": {
                    "pair": "ETHEUR",
                    "type": "buy",
                    "ordertype": "limit",
                    "price": "100.00",
                    "price2": "0",
                    "leverage": "none",
                    "order": "buy 1.00000000 ETHEUR @ limit 100.00"
                },
                "vol": "1.00000000",
                "vol_exec": "0.00000000",
                "cost": "0.00000",
                "fee": "0.00000",
                "price": "0.00000",
                "misc": "",
                "oflags": "fciq"
            },
            "OQCLML-BW3P3-BUCMWZ": {
                "refid": null,
                "userref": 0,
                "status": "open",
                "opentm": 1500000100.5678,
                "starttm": 0,
                "expiretm": 0,
                "descr": {
                    "pair": "ETHEUR",
                    "type": "sell",
                    "ordertype": "limit",
                    "price": "90.00",
                    "price2": "0",
                    "leverage": "none",
                    "order": "sell 2.00000000 ETHEUR @ limit 90.00"
                },
                "vol": "2.00000000",
                "vol_exec": "0.00000000",
                "cost": "0.00000",
                "fee": "0.00000",
                "price": "0.00000",
                "misc": "",
                "oflags": "fciq,viqc"
            }
        }
    })
}

/// Closed, canceled and expired orders on two pairs
pub fn closed_orders_result() -> Value {
    json!({
        "closed": {
            "O5KJD2-ZQ2FV-ABCDEF": {
                "status": "closed",
                "opentm": 1499990000.0,
                "closetm": 1500000500.0,
                "descr": {
                    "pair": "ETHEUR",
                    "type": "buy",
                    "ordertype": "limit",
                    "price": "180.00",
                    "order": "buy 1.50000000 ETHEUR @ limit 180.00"
                },
                "vol": "1.50000000",
                "vol_exec": "1.50000000",
                "cost": "269.925",
                "fee": "0.431",
                "price": "179.95",
                "misc": "",
                "oflags": "post"
            },
            "OXXLDC-7RMKD-GHIJKL": {
                "status": "canceled",
                "opentm": 1499980000.0,
                "closetm": 1499995000.0,
                "descr": {
                    "pair": "ETHEUR",
                    "type": "sell",
                    "ordertype": "limit",
                    "price": "200.00",
                    "order": "sell 1.00000000 ETHEUR @ limit 200.00"
                },
                "vol": "1.00000000",
                "vol_exec": "0.40000000",
                "cost": "80.000",
                "fee": "0.128",
                "price": "200.00",
                "misc": "",
                "oflags": "post"
            },
            "OZEROC-7RMKD-NOEXEC": {
                "status": "canceled",
                "opentm": 1499970000.0,
                "closetm": 1499971000.0,
                "descr": {
                    "pair": "ETHEUR",
                    "type": "sell",
                    "ordertype": "limit",
                    "price": "250.00",
                    "order": "sell 1.00000000 ETHEUR @ limit 250.00"
                },
                "vol": "1.00000000",
                "vol_exec": "0.00000000",
                "cost": "0.00000",
                "fee": "0.00000",
                "price": "0.00000",
                "misc": "",
                "oflags": "post"
            },
            "OBTCXX-AAAAA-XBTEUR": {
                "status": "closed",
                "opentm": 1499960000.0,
                "closetm": 1499961000.0,
                "descr": {
                    "pair": "XBTEUR",
                    "type": "buy",
                    "ordertype": "market",
                    "price": "0",
                    "order": "buy 0.10000000 XBTEUR @ market"
                },
                "vol": "0.10000000",
                "vol_exec": "0.10000000",
                "cost": "250.0",
                "fee": "0.65",
                "price": "2500.0",
                "misc": "",
                "oflags": "fciq"
            },
            "OEXPIR-AAAAA-EXPIRE": {
                "status": "expired",
                "opentm": 1499950000.0,
                "closetm": 1499951000.0,
                "descr": {
                    "pair": "ETHEUR",
                    "type": "buy",
                    "ordertype": "limit",
                    "price": "150.00",
                    "order": "buy 1.00000000 ETHEUR @ limit 150.00"
                },
                "vol": "1.00000000",
                "vol_exec": "1.00000000",
                "cost": "150.0",
                "fee": "0.24",
                "price": "150.0",
                "misc": "",
                "oflags": ""
            }
        },
        "count": 5
    })
}

pub fn ticker_result() -> Value {
    json!({
        "XETHZEUR": {
            "a": ["250.10000", "1", "1.000"],
            "b": ["249.90000", "3", "3.000"],
            "c": ["250.00000", "0.50000000"],
            "v": ["1000.00000000", "40000.00000000"],
            "p": ["251.00000", "300.00000"],
            "t": [500, 12000],
            "l": ["245.00000", "240.00000"],
            "h": ["255.00000", "260.00000"],
            "o": "248.00000"
        },
        "XXBTZEUR": {
            "a": ["5000.00000", "1", "1.000"],
            "b": ["4999.00000", "2", "2.000"],
            "c": ["4999.50000", "0.01000000"],
            "v": ["10.00000000", "3.00000000"],
            "p": ["5000.00000", "5000.00000"],
            "t": [50, 120],
            "l": ["4900.00000", "4800.00000"],
            "h": ["5100.00000", "5200.00000"],
            "o": "4950.00000"
        }
    })
}

/// Order book with timestamps relative to `now`
pub fn depth_result(pair: &str, now: i64) -> Value {
    json!({
        pair: {
            "asks": [
                ["250.50000", "1.000", now - 30],
                ["251.00000", "2.000", now - 600]
            ],
            "bids": [
                ["249.00000", "5.000", now - 3600],
                ["249.50000", "0.500", now - 5]
            ]
        }
    })
}

/// Public trades, oldest first
pub fn trades_result(pair: &str, now: i64) -> Value {
    json!({
        pair: [
            ["250.00000", "0.10000000", now - 300, "b", "l", ""],
            ["249.00000", "0.20000000", now - 200, "s", "m", ""],
            ["251.00000", "0.30000000", now - 100, "b", "m", ""]
        ],
        "last": "1500000000123456789"
    })
}

pub fn ohlc_result(pair: &str) -> Value {
    json!({
        pair: [
            [1500000000, "250.0", "252.0", "249.0", "251.0", "250.5", "10.0", 12],
            [1500000060, "251.0", "253.0", "250.0", "252.0", "251.5", "5.0", 7]
        ],
        "last": 1500000060
    })
}

pub fn asset_pairs_result() -> Value {
    json!({
        "XETHZEUR": {"altname": "ETHEUR", "base": "XETH", "quote": "ZEUR"},
        "XETHZEUR.d": {"altname": "ETHEUR.d", "base": "XETH", "quote": "ZEUR"},
        "XXBTZEUR": {"altname": "XBTEUR", "base": "XXBT", "quote": "ZEUR"}
    })
}

pub fn balance_result() -> Value {
    json!({
        "ZEUR": "1000.5000",
        "XXBT": "0.1234567890",
        "XETH": "2.0000000000",
        "DASH": "0.5000000000"
    })
}

pub fn trade_balance_result() -> Value {
    json!({
        "eb": "1500.0000",
        "tb": "1000.5000",
        "m": "0.0000",
        "n": "0.0000",
        "c": "0.0000",
        "v": "0.0000",
        "e": "1000.5000",
        "mf": "1000.5000"
    })
}

pub fn add_order_result() -> Value {
    json!({
        "descr": {"order": "buy 0.13370000 ETHEUR @ limit 10.42"},
        "txid": ["OUF4EM-FRGI2-MQMWZD"]
    })
}

pub fn ledgers_result() -> Value {
    json!({
        "ledger": {
            "L4UESK-KG3EQ-UFO4T5": {
                "refid": "TJKLXX-PGMUI-4NTLXU",
                "time": 1500000200.0,
                "type": "trade",
                "aclass": "currency",
                "asset": "ZEUR",
                "amount": "-269.9250",
                "fee": "0.4310",
                "balance": "1000.5000"
            },
            "L6NCBQ-QJXPR-ZZX2VA": {
                "refid": "TJKLXX-PGMUI-4NTLXU",
                "time": 1500000100.0,
                "type": "trade",
                "aclass": "currency",
                "asset": "XETH",
                "amount": "1.5000000000",
                "fee": "0.0000000000",
                "balance": "2.0000000000"
            }
        },
        "count": 2
    })
}
