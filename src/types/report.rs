#![allow(missing_docs)]
//! Report types: compact, size-bounded views of analytics results.
//!
//! Each report is what one orchestration method on
//! [`DeribitClient`](crate::client::DeribitClient) returns. Lists are capped
//! (see [`crate::constants::limits`]) and values are rounded to fixed
//! precision; the analytics engine itself never truncates.

use serde::{Deserialize, Serialize};

use super::analytics::PainPoint;
use super::enums::{
    Currency, Environment, GammaPositioning, InstrumentKind, IvSource, OptionType, SkewDirection,
    SkewTrend, TermStructureShape,
};

// ---------------------------------------------------------------------------
// Volatility
// ---------------------------------------------------------------------------

/// DVOL index snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DvolReport {
    #[serde(rename = "ccy")]
    pub currency: Currency,
    /// Latest DVOL in percentage points; `0` when unavailable.
    pub dvol: f64,
    pub dvol_chg_24h: Option<f64>,
    pub ts: i64,
    pub notes: Vec<String>,
}

/// One-sigma expected move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedMoveReport {
    #[serde(rename = "ccy")]
    pub currency: Currency,
    pub spot: f64,
    pub iv_used: f64,
    pub iv_source: IvSource,
    pub horizon_min: i64,
    pub move_1s_pts: f64,
    pub move_1s_bps: f64,
    pub up_1s: f64,
    pub down_1s: f64,
    pub confidence: f64,
    pub notes: Vec<String>,
}

/// ATM IV of one tenor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStructureRow {
    pub days: u32,
    pub expiry: String,
    pub atm_iv: Option<f64>,
    pub atm_iv_pct: Option<f64>,
}

/// ATM IV term structure with slopes and shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStructureReport {
    #[serde(rename = "ccy")]
    pub currency: Currency,
    pub spot: f64,
    pub term_structure: Vec<TermStructureRow>,
    /// IV change per 30 days between the 7d and 30d tenors, in vol points.
    pub slope_7d_30d: Option<f64>,
    /// IV change per 30 days between the 30d and 90d tenors, in vol points.
    pub slope_30d_90d: Option<f64>,
    pub shape: TermStructureShape,
    pub dvol_current: Option<f64>,
    pub notes: Vec<String>,
}

/// 25-delta skew of one tenor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenorSkewRow {
    pub days: u32,
    pub expiry: String,
    pub atm_iv: Option<f64>,
    pub rr25d: Option<f64>,
    pub rr25d_pct: Option<f64>,
    pub bf25d: Option<f64>,
    pub bf25d_pct: Option<f64>,
    pub skew_dir: Option<SkewDirection>,
}

/// Averages across the tenors of a skew report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkewSummary {
    pub avg_rr25d_pct: Option<f64>,
    pub avg_bf25d_pct: Option<f64>,
    pub dominant_direction: Option<SkewDirection>,
    pub tenors_analyzed: usize,
}

/// Skew across tenors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkewReport {
    #[serde(rename = "ccy")]
    pub currency: Currency,
    pub spot: f64,
    pub skew_by_tenor: Vec<TenorSkewRow>,
    pub skew_trend: Option<SkewTrend>,
    pub summary: SkewSummary,
    pub notes: Vec<String>,
}

/// ATM IV, 25-delta skew and forward of one surface tenor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceTenorRow {
    /// Days to the matched expiry, or the requested tenor when unmatched.
    pub days: u32,
    pub expiry: Option<String>,
    pub atm_iv: Option<f64>,
    pub rr25: Option<f64>,
    pub fly25: Option<f64>,
    pub skew_dir: Option<SkewDirection>,
    pub fwd: Option<f64>,
    /// Annualized rate implied by the expiry's future, in percent.
    pub basis_pct: Option<f64>,
}

/// Volatility surface snapshot over a few key tenors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceReport {
    #[serde(rename = "ccy")]
    pub currency: Currency,
    pub spot: f64,
    pub tenors: Vec<SurfaceTenorRow>,
    /// Share of requested tenors matched to a listed expiry.
    pub confidence: f64,
    pub ts: i64,
    pub notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// One option of a chain report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRow {
    pub strike: f64,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub mark_iv: Option<f64>,
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub vega: Option<f64>,
    pub oi: Option<f64>,
    pub vol: Option<f64>,
}

/// Totals over the rows of a chain report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSummary {
    pub total_oi: f64,
    pub total_volume: f64,
    pub avg_iv: Option<f64>,
    pub num_strikes: usize,
}

/// Strikes around ATM for one expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChainReport {
    #[serde(rename = "ccy")]
    pub currency: Currency,
    pub expiry: String,
    pub expiry_ts: i64,
    pub spot: f64,
    pub atm_strike: Option<f64>,
    pub days_to_expiry: f64,
    pub strikes: Vec<ChainRow>,
    pub summary: ChainSummary,
    pub notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Open interest
// ---------------------------------------------------------------------------

/// Open interest at one strike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeOiRow {
    pub strike: f64,
    pub call_oi: f64,
    pub put_oi: f64,
    pub total_oi: f64,
    pub pcr: Option<f64>,
}

/// Strike range holding the bulk of open interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OiPeak {
    pub low: f64,
    pub high: f64,
    /// Share of total OI inside `[low, high]`.
    pub concentration: f64,
}

/// Open interest distribution of one expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenInterestReport {
    #[serde(rename = "ccy")]
    pub currency: Currency,
    pub expiry: String,
    pub spot: f64,
    pub total_call_oi: f64,
    pub total_put_oi: f64,
    pub pcr_total: Option<f64>,
    pub oi_by_strike: Vec<StrikeOiRow>,
    pub top_strikes: Vec<StrikeOiRow>,
    pub peak_range: Option<OiPeak>,
    pub notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Gamma exposure
// ---------------------------------------------------------------------------

/// Gamma exposure at one strike, in millions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeGexRow {
    pub strike: f64,
    pub call_gex: f64,
    pub put_gex: f64,
    pub net_gex: f64,
}

/// Dealer gamma exposure over one or more expiries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GammaExposureReport {
    #[serde(rename = "ccy")]
    pub currency: Currency,
    pub spot: f64,
    pub expiries_included: Vec<String>,
    /// Total net GEX in millions.
    pub net_gex: f64,
    pub gamma_flip: Option<f64>,
    pub max_pos_gex_strike: Option<f64>,
    pub max_neg_gex_strike: Option<f64>,
    pub gex_by_strike: Vec<StrikeGexRow>,
    pub top_positive: Vec<StrikeGexRow>,
    pub top_negative: Vec<StrikeGexRow>,
    pub market_maker_positioning: GammaPositioning,
    pub notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Max pain
// ---------------------------------------------------------------------------

/// Max pain of one expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxPainReport {
    #[serde(rename = "ccy")]
    pub currency: Currency,
    pub expiry: String,
    pub expiry_ts: i64,
    pub spot: f64,
    pub max_pain_strike: f64,
    /// `(max_pain - spot) / spot * 100`.
    pub distance_from_spot_pct: f64,
    pub pain_curve_top3: Vec<PainPoint>,
    pub total_call_oi: f64,
    pub total_put_oi: f64,
    pub pcr: Option<f64>,
    pub notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Order book
// ---------------------------------------------------------------------------

/// One price level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    #[serde(rename = "p")]
    pub price: f64,
    #[serde(rename = "q")]
    pub amount: f64,
}

/// Top of book, depth and imbalance for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSummary {
    #[serde(rename = "inst")]
    pub instrument: String,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub spread_pts: Option<f64>,
    pub spread_bps: Option<f64>,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
    pub bid_depth: f64,
    pub ask_depth: f64,
    pub imbalance: Option<f64>,
    pub notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Funding
// ---------------------------------------------------------------------------

/// One past funding period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundingEntry {
    pub ts: i64,
    pub rate: f64,
}

/// Perpetual funding rate with recent history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingReport {
    #[serde(rename = "ccy")]
    pub currency: Currency,
    pub perp: String,
    /// Current funding rate; `0` when the ticker has none.
    pub rate: f64,
    /// `rate` over a year of 8-hour periods.
    pub rate_annualized: Option<f64>,
    pub funding_8h: Option<f64>,
    pub history: Vec<FundingEntry>,
    pub notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Status & instruments
// ---------------------------------------------------------------------------

/// Connectivity check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub env: Environment,
    pub api_ok: bool,
    pub server_time_ms: i64,
    pub notes: Vec<String>,
}

/// Compact instrument definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRow {
    pub name: String,
    pub exp_ts: i64,
    pub strike: Option<f64>,
    #[serde(rename = "type")]
    pub option_type: Option<OptionType>,
    pub tick: f64,
    pub size: f64,
}

/// Instrument listing, trimmed to the nearest expiries for options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentsReport {
    pub kind: InstrumentKind,
    /// Instruments listed before trimming.
    pub count: usize,
    pub instruments: Vec<InstrumentRow>,
    pub notes: Vec<String>,
}
