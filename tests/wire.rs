//! Decoding of Deribit payloads and JSON-RPC envelopes.

use deribit_analytics::client::DeribitClient;
use deribit_analytics::error::DeribitError;
use deribit_analytics::types::market_data::{Instrument, IndexPrice, Ticker};
use deribit_analytics::types::option::OptionRecord;
use deribit_analytics::types::{Currency, Environment, InstrumentKind, OptionType};
use reqwest::StatusCode;

const INSTRUMENT: &str = r#"{
    "tick_size": 0.0005,
    "taker_commission": 0.0003,
    "strike": 60000.0,
    "settlement_period": "month",
    "quote_currency": "BTC",
    "option_type": "call",
    "min_trade_amount": 0.1,
    "kind": "option",
    "is_active": true,
    "instrument_name": "BTC-28JUN24-60000-C",
    "expiration_timestamp": 1719561600000,
    "creation_timestamp": 1711008000000,
    "contract_size": 1.0,
    "base_currency": "BTC"
}"#;

const TICKER: &str = r#"{
    "underlying_price": 61250.5,
    "underlying_index": "BTC-28JUN24",
    "timestamp": 1719400000000,
    "stats": { "volume": 123.4, "price_change": -5.2, "low": 0.01, "high": 0.02 },
    "state": "open",
    "open_interest": 845.1,
    "mark_price": 0.0125,
    "mark_iv": 52.3,
    "last_price": 0.012,
    "interest_rate": 0.0,
    "instrument_name": "BTC-28JUN24-60000-C",
    "index_price": 61100.0,
    "greeks": { "vega": 12.5, "theta": -80.1, "rho": 1.2, "gamma": 0.00004, "delta": 0.55 },
    "estimated_delivery_price": 61100.0,
    "bid_iv": 51.0,
    "best_bid_price": 0.012,
    "best_ask_price": 0.013,
    "ask_iv": 53.5
}"#;

#[test]
fn instrument_decodes() {
    let inst: Instrument = serde_json::from_str(INSTRUMENT).unwrap();
    assert_eq!(inst.kind, InstrumentKind::Option);
    assert_eq!(inst.option_type, Some(OptionType::Call));
    assert_eq!(inst.strike, Some(60_000.0));
    assert_eq!(inst.expiry_label().as_deref(), Some("28JUN24"));
    assert!(inst.is_active);
}

#[test]
fn ticker_becomes_option_record() {
    let inst: Instrument = serde_json::from_str(INSTRUMENT).unwrap();
    let ticker: Ticker = serde_json::from_str(TICKER).unwrap();

    assert!((ticker.mid_price().unwrap() - 0.0125).abs() < 1e-12);

    let record = OptionRecord::from_ticker(&inst, &ticker).unwrap();
    assert_eq!(record.strike, 60_000.0);
    assert!(record.is_call());
    assert!((record.mark_iv.unwrap() - 0.523).abs() < 1e-12);
    assert_eq!(record.gamma, Some(0.00004));
    assert_eq!(record.delta, Some(0.55));
    assert_eq!(record.open_interest, Some(845.1));
    assert_eq!(record.volume, Some(123.4));
    assert_eq!(record.underlying_price, Some(61_250.5));
}

#[test]
fn ticker_without_greeks_decodes() {
    let ticker: Ticker = serde_json::from_str(
        r#"{"instrument_name": "BTC_DVOL", "mark_price": 55.3, "timestamp": 1}"#,
    )
    .unwrap();
    assert!(ticker.greeks.is_none());
    assert_eq!(ticker.mark_iv, None);
    assert_eq!(ticker.mid_price(), None);
}

#[test]
fn future_is_not_an_option_record() {
    let inst: Instrument = serde_json::from_str(
        r#"{"instrument_name": "BTC-PERPETUAL", "kind": "future", "expiration_timestamp": 32503708800000}"#,
    )
    .unwrap();
    let ticker: Ticker =
        serde_json::from_str(r#"{"instrument_name": "BTC-PERPETUAL", "mark_price": 61000.0}"#).unwrap();
    assert!(OptionRecord::from_ticker(&inst, &ticker).is_none());
}

// ===================================================================
// JSON-RPC envelope
// ===================================================================

#[test]
fn envelope_result_is_unwrapped() {
    let body = br#"{"jsonrpc":"2.0","id":7,"result":{"index_price":61234.5,"estimated_delivery_price":61230.0},"usIn":1,"usOut":2}"#;
    let price: IndexPrice = DeribitClient::decode_response(StatusCode::OK, body).unwrap();
    assert_eq!(price.index_price, 61_234.5);

    let time: i64 =
        DeribitClient::decode_response(StatusCode::OK, br#"{"jsonrpc":"2.0","result":1719400000000}"#)
            .unwrap();
    assert_eq!(time, 1_719_400_000_000);
}

#[test]
fn rpc_error_maps_to_api_error() {
    let body = br#"{"jsonrpc":"2.0","id":3,"error":{"message":"Invalid params","data":{"reason":"wrong format","param":"instrument_name"},"code":-32602}}"#;
    let err = DeribitClient::decode_response::<Ticker>(StatusCode::BAD_REQUEST, body).unwrap_err();

    match &err {
        DeribitError::Api(api) => {
            assert_eq!(api.code, -32602);
            assert_eq!(api.message, "Invalid params");
            assert!(api.data.is_some());
        }
        other => panic!("expected DeribitError::Api, got: {other:?}"),
    }
    assert_eq!(err.code(), -32602);
    assert!(err.to_string().contains("Invalid params"));
}

#[test]
fn non_json_failure_maps_to_http_status() {
    let err = DeribitClient::decode_response::<Ticker>(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>")
        .unwrap_err();
    match &err {
        DeribitError::HttpStatus { status, body } => {
            assert_eq!(*status, StatusCode::BAD_GATEWAY);
            assert!(body.contains("bad gateway"));
        }
        other => panic!("expected DeribitError::HttpStatus, got: {other:?}"),
    }
    assert_eq!(err.code(), 502);
}

#[test]
fn malformed_success_maps_to_json_error() {
    let err = DeribitClient::decode_response::<IndexPrice>(StatusCode::OK, b"{not json").unwrap_err();
    assert!(matches!(err, DeribitError::Json(_)));

    let missing = DeribitClient::decode_response::<IndexPrice>(StatusCode::OK, br#"{"jsonrpc":"2.0"}"#)
        .unwrap_err();
    assert!(matches!(missing, DeribitError::Json(_)));
}

#[test]
fn null_result_fits_optional_type() {
    let value: Option<i64> =
        DeribitClient::decode_response(StatusCode::OK, br#"{"jsonrpc":"2.0","result":null}"#).unwrap();
    assert_eq!(value, None);
}

#[test]
fn short_message_is_capped() {
    let err = DeribitError::Unavailable("x".repeat(500));
    assert_eq!(err.code(), 404);
    assert_eq!(err.short_message().chars().count(), 100);
}

// ===================================================================
// Enums
// ===================================================================

#[test]
fn environment_and_currency_parse() {
    assert_eq!("testnet".parse::<Environment>().unwrap(), Environment::Test);
    assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Prod);
    assert!("staging".parse::<Environment>().is_err());
    assert_eq!(Environment::Test.base_url(), "https://test.deribit.com/api/v2");

    assert_eq!(" eth ".parse::<Currency>().unwrap(), Currency::ETH);
    assert!(matches!(
        "DOGE".parse::<Currency>(),
        Err(DeribitError::InvalidArgument(_))
    ));
    assert_eq!(Currency::BTC.index_name(), "btc_usd");
    assert_eq!(Currency::ETH.dvol_instrument(), "ETH_DVOL");
}

#[test]
fn linear_markets_are_not_an_underlying() {
    assert!(matches!(
        "USDC".parse::<Currency>(),
        Err(DeribitError::InvalidArgument(_))
    ));

    let inverse: Instrument = serde_json::from_str(INSTRUMENT).unwrap();
    let linear: Instrument =
        serde_json::from_str(&INSTRUMENT.replace("BTC-28JUN24-60000-C", "BTC_USDC-28JUN24-60000-C"))
            .unwrap();
    let eth_linear: Instrument =
        serde_json::from_str(&INSTRUMENT.replace("BTC-28JUN24-60000-C", "ETH_USDC-28JUN24-3000-P"))
            .unwrap();

    // Same expiry token, different markets.
    assert_eq!(linear.expiry_label(), inverse.expiry_label());
    assert_eq!(eth_linear.expiry_label(), inverse.expiry_label());

    assert!(inverse.is_underlying(Currency::BTC));
    assert!(!inverse.is_underlying(Currency::ETH));
    assert!(!linear.is_underlying(Currency::BTC));
    assert!(!eth_linear.is_underlying(Currency::ETH));
    assert_eq!(Currency::BTC.perpetual_instrument(), "BTC-PERPETUAL");
}

#[test]
fn client_urls_follow_environment() {
    let client = DeribitClient::new(Environment::Test).unwrap();
    assert_eq!(client.base_url(), "https://test.deribit.com/api/v2");
    assert_eq!(client.environment(), Environment::Test);

    let mock = DeribitClient::with_base_url("http://localhost:8080/api/v2/").unwrap();
    assert_eq!(mock.base_url(), "http://localhost:8080/api/v2");
}
