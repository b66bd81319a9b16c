#![allow(missing_docs)]
//! Market data types: index price, instruments, tickers, order book, DVOL.
//!
//! These mirror the `result` payloads of the public Deribit JSON-RPC
//! methods. Only the fields used by the analytics are modelled; unknown
//! fields are ignored.

use serde::{Deserialize, Serialize};

use super::enums::{Currency, InstrumentKind, OptionType};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Parameters for `public/get_index_price`.
#[derive(Debug, Clone, Serialize)]
pub struct IndexPriceRequest {
    pub index_name: String,
}

/// Parameters for `public/ticker`.
#[derive(Debug, Clone, Serialize)]
pub struct TickerRequest {
    pub instrument_name: String,
}

/// Parameters for `public/get_order_book`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderBookRequest {
    pub instrument_name: String,
    pub depth: u32,
}

/// Parameters for `public/get_funding_rate_history`.
#[derive(Debug, Clone, Serialize)]
pub struct FundingRateHistoryRequest {
    pub instrument_name: String,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
}

/// Parameters for `public/get_instruments`.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentsRequest {
    pub currency: String,
    pub kind: InstrumentKind,
    pub expired: bool,
}

/// Parameters for `public/get_volatility_index_data`.
#[derive(Debug, Clone, Serialize)]
pub struct VolatilityIndexRequest {
    pub currency: String,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    /// Candle resolution in seconds (`"3600"`) or `"1D"`.
    pub resolution: String,
}

// ---------------------------------------------------------------------------
// Index price
// ---------------------------------------------------------------------------

/// Result of `public/get_index_price`.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexPrice {
    pub index_price: f64,
    #[serde(default)]
    pub estimated_delivery_price: Option<f64>,
}

// ---------------------------------------------------------------------------
// Instruments
// ---------------------------------------------------------------------------

/// One entry of `public/get_instruments`.
#[derive(Debug, Clone, Deserialize)]
pub struct Instrument {
    pub instrument_name: String,
    pub kind: InstrumentKind,
    /// Expiration time in ms since the epoch.
    pub expiration_timestamp: i64,
    #[serde(default)]
    pub strike: Option<f64>,
    #[serde(default)]
    pub option_type: Option<OptionType>,
    #[serde(default)]
    pub tick_size: f64,
    #[serde(default)]
    pub contract_size: f64,
    #[serde(default)]
    pub base_currency: Option<String>,
    #[serde(default)]
    pub settlement_period: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl Instrument {
    /// Whether the instrument is listed on `currency`'s inverse market
    /// (`BTC-…`), as opposed to a linear one (`BTC_USDC-…`).
    pub fn is_underlying(&self, currency: Currency) -> bool {
        self.instrument_name
            .strip_prefix(currency.as_str())
            .is_some_and(|rest| rest.starts_with('-'))
    }

    /// Expiry token from the instrument name (`BTC-28JUN24-50000-C` →
    /// `28JUN24`), upper-cased.
    pub fn expiry_label(&self) -> Option<String> {
        self.instrument_name
            .split('-')
            .nth(1)
            .map(str::to_ascii_uppercase)
    }
}

// ---------------------------------------------------------------------------
// Ticker
// ---------------------------------------------------------------------------

/// Option greeks as published in a ticker.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TickerGreeks {
    #[serde(default)]
    pub delta: Option<f64>,
    #[serde(default)]
    pub gamma: Option<f64>,
    #[serde(default)]
    pub vega: Option<f64>,
    #[serde(default)]
    pub theta: Option<f64>,
    #[serde(default)]
    pub rho: Option<f64>,
}

/// 24h statistics block of a ticker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TickerStats {
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub volume_usd: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub price_change: Option<f64>,
}

/// Result of `public/ticker`.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    pub instrument_name: String,
    #[serde(default)]
    pub timestamp: i64,
    pub mark_price: f64,
    /// Mark IV as published (percentage points, e.g. `52.3`).
    #[serde(default)]
    pub mark_iv: Option<f64>,
    #[serde(default)]
    pub bid_iv: Option<f64>,
    #[serde(default)]
    pub ask_iv: Option<f64>,
    #[serde(default)]
    pub best_bid_price: Option<f64>,
    #[serde(default)]
    pub best_ask_price: Option<f64>,
    #[serde(default)]
    pub index_price: Option<f64>,
    #[serde(default)]
    pub underlying_price: Option<f64>,
    #[serde(default)]
    pub open_interest: Option<f64>,
    #[serde(default)]
    pub greeks: Option<TickerGreeks>,
    #[serde(default)]
    pub stats: TickerStats,
    #[serde(default)]
    pub current_funding: Option<f64>,
    #[serde(default)]
    pub funding_8h: Option<f64>,
}

impl Ticker {
    /// Midpoint of best bid and ask when both are positive.
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid_price, self.best_ask_price) {
            (Some(bid), Some(ask)) if bid > 0.0 && ask > 0.0 => Some((bid + ask) / 2.0),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Order book
// ---------------------------------------------------------------------------

/// Result of `public/get_order_book`. Levels are `[price, amount]` pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    pub instrument_name: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub bids: Vec<[f64; 2]>,
    #[serde(default)]
    pub asks: Vec<[f64; 2]>,
    #[serde(default)]
    pub best_bid_price: Option<f64>,
    #[serde(default)]
    pub best_ask_price: Option<f64>,
    #[serde(default)]
    pub mark_price: Option<f64>,
}

// ---------------------------------------------------------------------------
// Funding & platform status
// ---------------------------------------------------------------------------

/// One entry of `public/get_funding_rate_history`.
#[derive(Debug, Clone, Deserialize)]
pub struct FundingRateEntry {
    pub timestamp: i64,
    /// Funding rate accrued over the 8 hours ending at `timestamp`.
    #[serde(default)]
    pub interest_8h: f64,
    #[serde(default)]
    pub interest_1h: f64,
    #[serde(default)]
    pub index_price: Option<f64>,
}

/// Result of `public/status`.
///
/// `locked` is `"true"`, `"partial"` or `"false"`; older deployments send a
/// boolean.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformStatus {
    #[serde(default)]
    pub locked: serde_json::Value,
    #[serde(default)]
    pub locked_indices: Vec<String>,
}

impl PlatformStatus {
    /// Whether trading is locked on all or part of the platform.
    pub fn is_locked(&self) -> bool {
        match &self.locked {
            serde_json::Value::Bool(locked) => *locked,
            serde_json::Value::String(s) => s == "true" || s == "partial",
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Volatility index (DVOL)
// ---------------------------------------------------------------------------

/// Result of `public/get_volatility_index_data`.
///
/// Each candle is `[timestamp, open, high, low, close]`.
#[derive(Debug, Clone, Deserialize)]
pub struct VolatilityIndexData {
    #[serde(default)]
    pub data: Vec<Vec<f64>>,
    #[serde(default)]
    pub continuation: Option<i64>,
}

impl VolatilityIndexData {
    /// Close of a candle (last element when the candle is short).
    pub fn close_of(candle: &[f64]) -> Option<f64> {
        candle.get(4).or_else(|| candle.last()).copied()
    }

    /// Close of the most recent candle.
    pub fn latest_close(&self) -> Option<f64> {
        self.data.last().and_then(|c| Self::close_of(c))
    }

    /// Close of the oldest candle.
    pub fn first_close(&self) -> Option<f64> {
        self.data.first().and_then(|c| Self::close_of(c))
    }
}
