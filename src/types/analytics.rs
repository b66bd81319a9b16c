//! Result types of the analytics engine.
//!
//! All of these are created fresh by a single function call and carry no
//! identity beyond their fields. Values that may be undefined for a given
//! input are `Option`s; degenerate inputs produce zeroed results rather than
//! errors.

use serde::{Deserialize, Serialize};

use super::enums::{OptionType, SkewDirection};

// ---------------------------------------------------------------------------
// Expected move
// ---------------------------------------------------------------------------

/// One-sigma expected move over a horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedMoveResult {
    pub spot: f64,
    /// Annualized IV (decimal) the move was computed from.
    pub iv_used: f64,
    /// Free-form tag naming where the IV came from (`"dvol"`, `"atm_iv"`).
    pub iv_source: String,
    pub horizon_minutes: i64,
    /// 1σ move in price points.
    pub move_points: f64,
    /// 1σ move in basis points of spot.
    pub move_bps: f64,
    pub up_1sigma: f64,
    pub down_1sigma: f64,
    /// Confidence in `[0, 1]`; zero for degenerate inputs.
    pub confidence: f64,
}

impl ExpectedMoveResult {
    /// Whether the inputs were insufficient to compute a move.
    pub fn is_degenerate(&self) -> bool {
        self.confidence == 0.0 && self.move_points == 0.0
    }
}

// ---------------------------------------------------------------------------
// Open interest
// ---------------------------------------------------------------------------

/// Call and put open interest at one strike.
///
/// `total_oi` and `put_call_ratio` are derived and recomputed on every
/// mutation, so the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrikeOi {
    strike: f64,
    call_oi: f64,
    put_oi: f64,
    total_oi: f64,
    put_call_ratio: Option<f64>,
}

impl StrikeOi {
    /// Empty bucket for a strike.
    pub fn new(strike: f64) -> Self {
        Self::from_parts(strike, 0.0, 0.0)
    }

    pub fn from_parts(strike: f64, call_oi: f64, put_oi: f64) -> Self {
        let mut oi = Self {
            strike,
            call_oi,
            put_oi,
            total_oi: 0.0,
            put_call_ratio: None,
        };
        oi.recompute();
        oi
    }

    /// Add open interest on one side.
    pub fn add(&mut self, option_type: OptionType, open_interest: f64) {
        match option_type {
            OptionType::Call => self.call_oi += open_interest,
            OptionType::Put => self.put_oi += open_interest,
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.total_oi = self.call_oi + self.put_oi;
        self.put_call_ratio = (self.call_oi > 0.0).then(|| self.put_oi / self.call_oi);
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn call_oi(&self) -> f64 {
        self.call_oi
    }

    pub fn put_oi(&self) -> f64 {
        self.put_oi
    }

    pub fn total_oi(&self) -> f64 {
        self.total_oi
    }

    /// `put_oi / call_oi`, undefined without call open interest.
    pub fn put_call_ratio(&self) -> Option<f64> {
        self.put_call_ratio
    }
}

// ---------------------------------------------------------------------------
// Gamma exposure
// ---------------------------------------------------------------------------

/// Dealer gamma exposure at one strike. `net_gex` is always
/// `call_gex + put_gex`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GexResult {
    strike: f64,
    call_gex: f64,
    put_gex: f64,
    net_gex: f64,
}

impl GexResult {
    pub fn new(strike: f64) -> Self {
        Self::from_parts(strike, 0.0, 0.0)
    }

    pub fn from_parts(strike: f64, call_gex: f64, put_gex: f64) -> Self {
        Self {
            strike,
            call_gex,
            put_gex,
            net_gex: call_gex + put_gex,
        }
    }

    /// Accumulate a signed per-option GEX value on one side.
    pub fn add(&mut self, option_type: OptionType, gex: f64) {
        match option_type {
            OptionType::Call => self.call_gex += gex,
            OptionType::Put => self.put_gex += gex,
        }
        self.net_gex = self.call_gex + self.put_gex;
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn call_gex(&self) -> f64 {
        self.call_gex
    }

    pub fn put_gex(&self) -> f64 {
        self.put_gex
    }

    pub fn net_gex(&self) -> f64 {
        self.net_gex
    }
}

/// Gamma exposure across a chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GammaExposureProfile {
    /// Per-strike exposure, ascending by strike.
    pub gex_by_strike: Vec<GexResult>,
    /// Sum of per-strike net GEX.
    pub net_gex: f64,
    /// Interpolated price where net GEX first changes sign (scanning up).
    pub gamma_flip_level: Option<f64>,
    pub max_positive_gex_strike: Option<f64>,
    pub max_negative_gex_strike: Option<f64>,
    pub spot_price: f64,
    pub notes: Vec<String>,
}

impl GammaExposureProfile {
    /// Strictly positive strikes, largest net GEX first.
    pub fn top_positive(&self, n: usize) -> Vec<GexResult> {
        let mut positive: Vec<GexResult> = self
            .gex_by_strike
            .iter()
            .filter(|g| g.net_gex > 0.0)
            .cloned()
            .collect();
        positive.sort_by(|a, b| b.net_gex.total_cmp(&a.net_gex));
        positive.truncate(n);
        positive
    }

    /// Strictly negative strikes, most negative net GEX first.
    pub fn top_negative(&self, n: usize) -> Vec<GexResult> {
        let mut negative: Vec<GexResult> = self
            .gex_by_strike
            .iter()
            .filter(|g| g.net_gex < 0.0)
            .cloned()
            .collect();
        negative.sort_by(|a, b| a.net_gex.total_cmp(&b.net_gex));
        negative.truncate(n);
        negative
    }
}

// ---------------------------------------------------------------------------
// Max pain
// ---------------------------------------------------------------------------

/// Aggregate holder payout if the underlying settles at `strike`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PainPoint {
    pub strike: f64,
    pub pain: f64,
}

/// Max pain search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaxPainResult {
    pub max_pain_strike: f64,
    /// Pain at `max_pain_strike`, the minimum of the curve.
    pub pain_value: f64,
    /// Pain at every strike, ascending by strike.
    pub pain_curve: Vec<PainPoint>,
    /// The three lowest-pain points, ascending by pain.
    pub pain_curve_top3: Vec<PainPoint>,
    pub total_call_oi: f64,
    pub total_put_oi: f64,
    pub spot_price: f64,
}

impl MaxPainResult {
    /// Total put OI over total call OI.
    pub fn put_call_ratio(&self) -> Option<f64> {
        (self.total_call_oi > 0.0).then(|| self.total_put_oi / self.total_call_oi)
    }

    /// `(max_pain_strike - spot) / spot * 100`, undefined for a non-positive spot.
    pub fn distance_from_spot_pct(&self) -> Option<f64> {
        (self.spot_price > 0.0)
            .then(|| (self.max_pain_strike - self.spot_price) / self.spot_price * 100.0)
    }
}

// ---------------------------------------------------------------------------
// Term structure & skew
// ---------------------------------------------------------------------------

/// ATM IV of one expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStructurePoint {
    pub days: u32,
    pub atm_iv: Option<f64>,
    /// Expiry token, e.g. `28JUN24`.
    pub expiry_label: String,
    /// Expiry time in ms since the epoch.
    pub expiry_ts: i64,
}

impl TermStructurePoint {
    pub fn new(days: u32, atm_iv: Option<f64>) -> Self {
        Self {
            days,
            atm_iv,
            expiry_label: String::new(),
            expiry_ts: 0,
        }
    }
}

/// 25-delta skew of one tenor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkewMetrics {
    pub days: u32,
    pub rr25d: Option<f64>,
    pub bf25d: Option<f64>,
    pub atm_iv: Option<f64>,
    pub call_25d_iv: Option<f64>,
    pub put_25d_iv: Option<f64>,
    /// `None` when the risk reversal is undefined.
    pub skew_direction: Option<SkewDirection>,
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// One tenor of a volatility surface snapshot.
///
/// `expiry_label` and `metrics` are `None` when no listed expiry is close
/// enough to `target_days`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub target_days: u32,
    pub expiry_label: Option<String>,
    pub metrics: Option<SkewMetrics>,
    /// Forward price at the expiry.
    pub forward: Option<f64>,
    /// Continuously compounded rate implied by the expiry's future.
    pub implied_rate: Option<f64>,
}

impl SurfacePoint {
    /// A tenor with no matching expiry.
    pub fn unmatched(target_days: u32) -> Self {
        Self {
            target_days,
            expiry_label: None,
            metrics: None,
            forward: None,
            implied_rate: None,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.expiry_label.is_some()
    }
}
