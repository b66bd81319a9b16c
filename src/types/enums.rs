//! Shared enum types that map directly to Deribit API string values, plus
//! the classification enums produced by the analytics engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{API_BASE_URL, TEST_API_BASE_URL};
use crate::error::DeribitError;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Deribit deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// `www.deribit.com`.
    #[default]
    Prod,
    /// `test.deribit.com`.
    Test,
}

impl Environment {
    /// REST base URL for this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Prod => API_BASE_URL,
            Self::Test => TEST_API_BASE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = DeribitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" | "mainnet" => Ok(Self::Prod),
            "test" | "testnet" => Ok(Self::Test),
            other => Err(DeribitError::InvalidArgument(format!(
                "unknown environment: {other}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Underlying of an inverse (coin-settled) options market.
///
/// Linear `USDC` markets list several underlyings under one settlement
/// currency and are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    BTC,
    ETH,
}

impl Currency {
    /// Wire value (`"BTC"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BTC => "BTC",
            Self::ETH => "ETH",
        }
    }

    /// Name of the index used as spot (`"btc_usd"`).
    pub fn index_name(self) -> &'static str {
        match self {
            Self::BTC => "btc_usd",
            Self::ETH => "eth_usd",
        }
    }

    /// Ticker name of the DVOL index instrument (`"BTC_DVOL"`).
    pub fn dvol_instrument(self) -> String {
        format!("{}_DVOL", self.as_str())
    }

    /// Name of the perpetual future (`"BTC-PERPETUAL"`).
    pub fn perpetual_instrument(self) -> String {
        format!("{}-PERPETUAL", self.as_str())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = DeribitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BTC" => Ok(Self::BTC),
            "ETH" => Ok(Self::ETH),
            other => Err(DeribitError::InvalidArgument(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Instrument Kind
// ---------------------------------------------------------------------------

/// Instrument kind filter for `public/get_instruments`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    Option,
    Future,
    Spot,
    FutureCombo,
    OptionCombo,
}

impl InstrumentKind {
    /// Wire value (`"option"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Option => "option",
            Self::Future => "future",
            Self::Spot => "spot",
            Self::FutureCombo => "future_combo",
            Self::OptionCombo => "option_combo",
        }
    }
}

// ---------------------------------------------------------------------------
// Option Type
// ---------------------------------------------------------------------------

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Suffix used in instrument names (`C` / `P`).
    pub fn suffix(self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }

    /// Parse an instrument-name suffix.
    pub fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "C" | "c" => Some(Self::Call),
            "P" | "p" => Some(Self::Put),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// IV Source
// ---------------------------------------------------------------------------

/// Where the volatility behind an expected move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IvSource {
    /// The exchange's 30-day volatility index.
    Dvol,
    /// Mark IV of the at-the-money call of the nearest expiry.
    AtmIv,
}

impl fmt::Display for IvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dvol => "dvol",
            Self::AtmIv => "atm_iv",
        })
    }
}

// ---------------------------------------------------------------------------
// Analytics classifications
// ---------------------------------------------------------------------------

/// Sign of the 25-delta risk reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkewDirection {
    /// Calls richer than puts.
    Bullish,
    /// Puts richer than calls.
    Bearish,
    Neutral,
}

/// How skew changes from the shortest to the longest tenor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkewTrend {
    /// Short-dated skew more extreme than long-dated.
    Steepening,
    /// Long-dated skew more extreme than short-dated.
    Flattening,
    Stable,
}

/// Shape of the ATM IV term structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermStructureShape {
    Contango,
    Backwardation,
    Flat,
}

/// Aggregate dealer gamma positioning implied by net GEX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GammaPositioning {
    LongGamma,
    ShortGamma,
    Neutral,
}
