//! Option record: the uniform in-memory row every analytics function consumes.

use serde::{Deserialize, Serialize};

use super::enums::OptionType;
use super::market_data::{Instrument, Ticker};
use crate::analytics::chain::normalize_iv;

/// One option of a chain snapshot: contract terms plus the market fields
/// taken from its ticker.
///
/// IV is always decimal (`0.80` = 80%). Records are plain values built fresh
/// from each API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub strike: f64,
    pub option_type: OptionType,
    pub instrument_name: String,
    #[serde(default)]
    pub mark_iv: Option<f64>,
    #[serde(default)]
    pub delta: Option<f64>,
    #[serde(default)]
    pub gamma: Option<f64>,
    #[serde(default)]
    pub vega: Option<f64>,
    #[serde(default)]
    pub theta: Option<f64>,
    /// Open interest in contracts.
    #[serde(default)]
    pub open_interest: Option<f64>,
    /// 24h volume in contracts.
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub mark_price: Option<f64>,
    #[serde(default)]
    pub underlying_price: Option<f64>,
}

impl OptionRecord {
    /// A record with only contract terms set.
    pub fn new(strike: f64, option_type: OptionType, instrument_name: impl Into<String>) -> Self {
        Self {
            strike,
            option_type,
            instrument_name: instrument_name.into(),
            mark_iv: None,
            delta: None,
            gamma: None,
            vega: None,
            theta: None,
            open_interest: None,
            volume: None,
            mark_price: None,
            underlying_price: None,
        }
    }

    /// Shorthand for a call with a generated instrument name.
    pub fn call(strike: f64) -> Self {
        Self::new(strike, OptionType::Call, format!("{strike}-C"))
    }

    /// Shorthand for a put with a generated instrument name.
    pub fn put(strike: f64) -> Self {
        Self::new(strike, OptionType::Put, format!("{strike}-P"))
    }

    pub fn with_open_interest(mut self, oi: f64) -> Self {
        self.open_interest = Some(oi);
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }

    pub fn with_mark_iv(mut self, iv: f64) -> Self {
        self.mark_iv = Some(iv);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn is_call(&self) -> bool {
        self.option_type == OptionType::Call
    }

    /// Build a record from an instrument definition and its ticker.
    ///
    /// Returns `None` for non-option instruments (no strike or type).
    /// Mark IV published in percentage points is normalised to decimal.
    pub fn from_ticker(instrument: &Instrument, ticker: &Ticker) -> Option<Self> {
        let strike = instrument.strike?;
        let option_type = instrument.option_type?;
        let greeks = ticker.greeks.clone().unwrap_or_default();

        Some(Self {
            strike,
            option_type,
            instrument_name: instrument.instrument_name.clone(),
            mark_iv: ticker.mark_iv.map(normalize_iv),
            delta: greeks.delta,
            gamma: greeks.gamma,
            vega: greeks.vega,
            theta: greeks.theta,
            open_interest: ticker.open_interest,
            volume: ticker.stats.volume,
            mark_price: Some(ticker.mark_price),
            underlying_price: ticker.underlying_price,
        })
    }
}
