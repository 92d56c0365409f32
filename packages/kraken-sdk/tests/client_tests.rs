/// SDK client tests against the mock exchange
///
/// These tests verify request shape, signing and the failure reporting of
/// logged calls.

mod helpers;

use base64::{engine::general_purpose::STANDARD, Engine};
use helpers::TestFixture;
use kraken_sdk::signing::sign_request;
use kraken_sdk::{
    orders_from_result, parse_order_res, sort_by_price, Access, ApiParams, Endpoint, LogLevel,
    LogPolicy, OrderStatus, SdkError, Side, Tz,
};
use kraken_test_utils::fixtures::{self, TEST_API_KEY, TEST_API_SECRET};
use serde_json::json;

// ============================================================================
// Request Shape Tests
// ============================================================================

#[tokio::test]
async fn test_public_query_sends_form_params() {
    let fixture = TestFixture::anonymous()
        .await
        .expect("Failed to create test fixture");
    fixture.server.respond("Ticker", fixtures::ticker_result());

    let params = ApiParams::new().with("pair", "XETHZEUR,XXBTZEUR");
    let envelope = fixture
        .client
        .query_public("Ticker", &params)
        .await
        .expect("Ticker query failed");

    assert!(envelope.error.is_empty());
    assert!(envelope.has_result());

    let requests = fixture.server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].access, "public");
    assert_eq!(requests[0].method, "Ticker");
    assert_eq!(requests[0].param("pair"), Some("XETHZEUR,XXBTZEUR"));
    assert_eq!(requests[0].api_key, None);
    assert_eq!(requests[0].api_sign, None);
}

#[tokio::test]
async fn test_private_query_is_signed() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture");
    fixture.server.respond("Balance", fixtures::balance_result());

    let params = ApiParams::new().with("asset", "ZEUR");
    fixture
        .client
        .query_private("Balance", &params)
        .await
        .expect("Balance query failed");

    let request = &fixture.server.requests()[0];
    assert_eq!(request.access, "private");
    assert_eq!(request.param_keys(), vec!["nonce", "asset"]);
    assert_eq!(request.api_key.as_deref(), Some(TEST_API_KEY));

    // Recompute the signature from what the server received
    let nonce: u64 = request.param("nonce").unwrap().parse().unwrap();
    let body = format!("nonce={}&asset=ZEUR", nonce);
    let secret = STANDARD.decode(TEST_API_SECRET).unwrap();
    let expected = sign_request("/0/private/Balance", nonce, &body, &secret).unwrap();
    assert_eq!(request.api_sign.as_deref(), Some(expected.as_str()));
}

#[tokio::test]
async fn test_nonces_increase_across_calls() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture");

    for _ in 0..3 {
        fixture
            .client
            .call(Endpoint::Balance, &ApiParams::new())
            .await
            .expect("Balance call failed");
    }

    let nonces: Vec<u64> = fixture
        .server
        .requests()
        .iter()
        .map(|r| r.param("nonce").unwrap().parse().unwrap())
        .collect();
    assert_eq!(nonces.len(), 3);
    assert!(nonces.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_private_query_without_credentials_sends_nothing() {
    let fixture = TestFixture::anonymous()
        .await
        .expect("Failed to create test fixture");

    let result = fixture
        .client
        .query_logged(Access::Private, "Balance", &ApiParams::new())
        .await;

    assert!(matches!(result, Err(SdkError::MissingCredentials)));
    assert_eq!(fixture.server.request_count(), 0);
}

// ============================================================================
// Failure Reporting Tests
// ============================================================================

#[tokio::test]
async fn test_error_codes_are_logged_individually() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture");
    fixture.server.respond_errors(
        "AddOrder",
        &["EOrder:Insufficient funds", "EGeneral:Invalid arguments"],
    );

    let envelope = fixture
        .client
        .call(Endpoint::AddOrder, &ApiParams::new())
        .await
        .expect("AddOrder call failed");

    assert_eq!(envelope.error.len(), 2);
    assert_eq!(envelope.into_result(), None);
    assert!(fixture
        .logger
        .contains(LogLevel::Error, "EOrder:Insufficient funds"));
    assert!(fixture
        .logger
        .contains(LogLevel::Error, "EGeneral:Invalid arguments"));
}

#[tokio::test]
async fn test_cron_mode_tones_down_unavailable_service() {
    let fixture = TestFixture::with_policy(LogPolicy::cron())
        .await
        .expect("Failed to create test fixture");
    fixture
        .server
        .respond_errors("OpenOrders", &["EService:Unavailable"]);

    let envelope = fixture
        .client
        .call(Endpoint::OpenOrders, &ApiParams::new())
        .await
        .expect("OpenOrders call failed");

    assert_eq!(envelope.into_result(), None);
    assert!(fixture
        .logger
        .contains(LogLevel::Info, "EService:Unavailable"));
    assert_eq!(fixture.logger.count_at_least(LogLevel::Warn), 0);
}

#[tokio::test]
async fn test_http_failure_yields_empty_envelope() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture");
    fixture.server.respond_status("Ticker", 502, "Bad Gateway");

    let envelope = fixture
        .client
        .call(Endpoint::Ticker, &ApiParams::new())
        .await
        .expect("logged calls only fail on missing credentials");

    assert!(envelope.error.is_empty());
    assert!(!envelope.has_result());
    assert!(fixture
        .logger
        .contains(LogLevel::Error, "Network error while querying Kraken API!"));
}

#[tokio::test]
async fn test_http_failure_in_cron_mode_is_info() {
    let fixture = TestFixture::with_policy(LogPolicy::cron())
        .await
        .expect("Failed to create test fixture");
    fixture.server.respond_status("Ticker", 503, "Service Unavailable");

    fixture
        .client
        .call(Endpoint::Ticker, &ApiParams::new())
        .await
        .expect("Ticker call failed");

    assert!(fixture
        .logger
        .contains(LogLevel::Info, "Network error while querying Kraken API!"));
    assert_eq!(fixture.logger.count_at_least(LogLevel::Warn), 0);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture");
    // Nothing listens on the discard port
    let client = kraken_sdk::KrakenClient::new("http://127.0.0.1:9", fixture.logger.clone())
        .expect("Failed to build client");

    let envelope = client
        .call(Endpoint::Ticker, &ApiParams::new())
        .await
        .expect("Ticker call failed");

    assert!(!envelope.has_result());
    assert!(fixture
        .logger
        .contains(LogLevel::Error, "Network error while querying Kraken API!"));
}

#[tokio::test]
async fn test_malformed_body_is_value_error() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture");
    fixture.server.respond_raw("Depth", "<html>maintenance</html>");

    let envelope = fixture
        .client
        .call(Endpoint::Depth, &ApiParams::new())
        .await
        .expect("Depth call failed");

    assert!(!envelope.has_result());
    assert!(fixture.logger.contains(LogLevel::Error, "ValueError"));
}

#[tokio::test]
async fn test_malformed_body_in_cron_mode_is_silent() {
    let fixture = TestFixture::with_policy(LogPolicy::cron())
        .await
        .expect("Failed to create test fixture");
    fixture.server.respond_raw("Depth", "<html>maintenance</html>");

    fixture
        .client
        .call(Endpoint::Depth, &ApiParams::new())
        .await
        .expect("Depth call failed");

    assert_eq!(fixture.logger.count_at_least(LogLevel::Info), 0);
}

// ============================================================================
// Order Listing Tests
// ============================================================================

#[tokio::test]
async fn test_open_orders_end_to_end() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture");
    fixture
        .server
        .respond("OpenOrders", fixtures::open_orders_result());

    let result = fixture
        .client
        .call(Endpoint::OpenOrders, &ApiParams::new())
        .await
        .expect("OpenOrders call failed")
        .into_result()
        .expect("OpenOrders result is empty");

    let orders = orders_from_result(&result, "open").expect("Failed to decode orders");
    let split = parse_order_res(&orders, &[OrderStatus::Open], &Tz::UTC);
    assert_eq!(split.buy.len(), 1);
    assert_eq!(split.sell.len(), 1);

    let mut rows = split.into_merged();
    sort_by_price(&mut rows);
    assert_eq!(rows[0].side, Side::Sell);
    assert_eq!(rows[0].price, "90.00");
    assert!(rows[0].viqc);
    assert_eq!(rows[1].side, Side::Buy);
    assert_eq!(rows[1].price, "100.00");
}

#[tokio::test]
async fn test_order_record_missing_field_fails_to_decode() {
    let result = json!({
        "open": {
            "BROKEN": {
                "status": "closed",
                "descr": {"pair": "ETHEUR", "type": "buy", "ordertype": "limit", "price": "1"},
                "vol": "1",
                "oflags": "",
                "closetm": 0
            }
        }
    });

    let err = orders_from_result(&result, "open").unwrap_err();
    assert!(matches!(err, SdkError::SerializationError(_)));
}
