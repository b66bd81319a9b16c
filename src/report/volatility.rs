//! DVOL, expected move, term structure, skew and surface reports.

use crate::analytics::skew::skew_trend;
use crate::analytics::term_structure::{term_structure_shape, term_structure_slope};
use crate::analytics::volatility::round_to;
use crate::constants::analytics::SURFACE_MIN_CONFIDENCE;
use crate::constants::limits::{MAX_TENORS, SURFACE_MAX_TENORS};
use crate::types::analytics::{
    ExpectedMoveResult, SkewMetrics, SurfacePoint, TermStructurePoint,
};
use crate::types::enums::{Currency, IvSource, SkewDirection};
use crate::types::market_data::VolatilityIndexData;
use crate::types::report::{
    DvolReport, ExpectedMoveReport, SkewReport, SkewSummary, SurfaceReport, SurfaceTenorRow,
    TenorSkewRow, TermStructureReport, TermStructureRow,
};

use super::{cap_notes, round_opt};

// ---------------------------------------------------------------------------
// DVOL
// ---------------------------------------------------------------------------

impl DvolReport {
    /// Latest close of the candles and its change against the first close.
    ///
    /// With no candles the report carries `dvol = 0` and a
    /// `dvol_unavailable` note.
    pub fn from_index_data(
        currency: Currency,
        data: &VolatilityIndexData,
        ts: i64,
        mut notes: Vec<String>,
    ) -> Self {
        let Some(latest) = data.latest_close() else {
            notes.push("dvol_unavailable".to_string());
            return Self::unavailable(currency, ts, notes);
        };

        let change = if data.data.len() >= 2 {
            data.first_close()
                .filter(|prev| *prev > 0.0)
                .map(|prev| latest - prev)
        } else {
            None
        };

        Self {
            currency,
            dvol: round_to(latest, 2),
            dvol_chg_24h: round_opt(change, 2),
            ts,
            notes: cap_notes(notes),
        }
    }

    /// DVOL read from the mark price of the `{CCY}_DVOL` ticker.
    pub fn from_ticker_mark(currency: Currency, mark_price: f64, ts: i64) -> Self {
        Self {
            currency,
            dvol: round_to(mark_price, 2),
            dvol_chg_24h: None,
            ts,
            notes: vec!["source:ticker_fallback".to_string()],
        }
    }

    /// Zero DVOL with the given notes.
    pub fn unavailable(currency: Currency, ts: i64, notes: Vec<String>) -> Self {
        Self {
            currency,
            dvol: 0.0,
            dvol_chg_24h: None,
            ts,
            notes: cap_notes(notes),
        }
    }

    /// DVOL as a decimal IV, if one was obtained.
    pub fn iv(&self) -> Option<f64> {
        (self.dvol > 0.0).then(|| self.dvol / 100.0)
    }
}

// ---------------------------------------------------------------------------
// Expected move
// ---------------------------------------------------------------------------

impl ExpectedMoveReport {
    pub fn from_result(
        currency: Currency,
        result: &ExpectedMoveResult,
        iv_source: IvSource,
        notes: Vec<String>,
    ) -> Self {
        Self {
            currency,
            spot: round_to(result.spot, 2),
            iv_used: round_to(result.iv_used, 4),
            iv_source,
            horizon_min: result.horizon_minutes,
            move_1s_pts: result.move_points,
            move_1s_bps: result.move_bps,
            up_1s: result.up_1sigma,
            down_1s: result.down_1sigma,
            confidence: round_to(result.confidence, 2),
            notes: cap_notes(notes),
        }
    }
}

// ---------------------------------------------------------------------------
// Term structure
// ---------------------------------------------------------------------------

impl From<&TermStructurePoint> for TermStructureRow {
    fn from(point: &TermStructurePoint) -> Self {
        Self {
            days: point.days,
            expiry: point.expiry_label.clone(),
            atm_iv: round_opt(point.atm_iv, 4),
            atm_iv_pct: round_opt(point.atm_iv.map(|iv| iv * 100.0), 2),
        }
    }
}

impl TermStructureReport {
    /// Slopes (7d→30d, 30d→90d) are reported in vol points per 30 days.
    pub fn build(
        currency: Currency,
        spot: f64,
        mut points: Vec<TermStructurePoint>,
        dvol_current: Option<f64>,
        notes: Vec<String>,
    ) -> Self {
        points.truncate(MAX_TENORS);

        let slope_short = term_structure_slope(&points, 7, 30);
        let slope_long = term_structure_slope(&points, 30, 90);
        let shape = term_structure_shape(&points);

        let mut rows: Vec<TermStructureRow> = points.iter().map(TermStructureRow::from).collect();
        rows.sort_by_key(|row| row.days);

        Self {
            currency,
            spot: round_to(spot, 2),
            term_structure: rows,
            slope_7d_30d: round_opt(slope_short.map(|s| s * 100.0), 4),
            slope_30d_90d: round_opt(slope_long.map(|s| s * 100.0), 4),
            shape,
            dvol_current,
            notes: cap_notes(notes),
        }
    }
}

// ---------------------------------------------------------------------------
// Skew
// ---------------------------------------------------------------------------

fn tenor_row(expiry: &str, metrics: &SkewMetrics) -> TenorSkewRow {
    TenorSkewRow {
        days: metrics.days,
        expiry: expiry.to_string(),
        atm_iv: round_opt(metrics.atm_iv, 4),
        rr25d: round_opt(metrics.rr25d, 4),
        rr25d_pct: round_opt(metrics.rr25d.map(|rr| rr * 100.0), 2),
        bf25d: round_opt(metrics.bf25d, 4),
        bf25d_pct: round_opt(metrics.bf25d.map(|bf| bf * 100.0), 2),
        skew_dir: metrics.skew_direction,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Majority of bullish vs bearish tenors; a tie is neutral. `None` when no
/// tenor has a defined direction.
pub fn dominant_direction(metrics: &[SkewMetrics]) -> Option<SkewDirection> {
    let directions: Vec<SkewDirection> = metrics.iter().filter_map(|m| m.skew_direction).collect();
    if directions.is_empty() {
        return None;
    }

    let bullish = directions.iter().filter(|d| **d == SkewDirection::Bullish).count();
    let bearish = directions.iter().filter(|d| **d == SkewDirection::Bearish).count();
    Some(match bullish.cmp(&bearish) {
        std::cmp::Ordering::Greater => SkewDirection::Bullish,
        std::cmp::Ordering::Less => SkewDirection::Bearish,
        std::cmp::Ordering::Equal => SkewDirection::Neutral,
    })
}

impl SkewReport {
    /// `tenors` pairs each tenor's expiry label with its metrics.
    pub fn build(
        currency: Currency,
        spot: f64,
        tenors: &[(String, SkewMetrics)],
        notes: Vec<String>,
    ) -> Self {
        let tenors = &tenors[..tenors.len().min(MAX_TENORS)];
        let metrics: Vec<SkewMetrics> = tenors.iter().map(|(_, m)| m.clone()).collect();

        let mut rows: Vec<TenorSkewRow> = tenors
            .iter()
            .map(|(expiry, m)| tenor_row(expiry, m))
            .collect();
        rows.sort_by_key(|row| row.days);

        let avg_rr = mean(metrics.iter().filter_map(|m| m.rr25d));
        let avg_bf = mean(metrics.iter().filter_map(|m| m.bf25d));

        let summary = SkewSummary {
            avg_rr25d_pct: round_opt(avg_rr.map(|v| v * 100.0), 2),
            avg_bf25d_pct: round_opt(avg_bf.map(|v| v * 100.0), 2),
            dominant_direction: dominant_direction(&metrics),
            tenors_analyzed: rows.len(),
        };

        Self {
            currency,
            spot: round_to(spot, 2),
            skew_by_tenor: rows,
            skew_trend: skew_trend(&metrics),
            summary,
            notes: cap_notes(notes),
        }
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

impl From<&SurfacePoint> for SurfaceTenorRow {
    fn from(point: &SurfacePoint) -> Self {
        let metrics = point.metrics.as_ref();
        Self {
            days: metrics.map_or(point.target_days, |m| m.days),
            expiry: point.expiry_label.clone(),
            atm_iv: round_opt(metrics.and_then(|m| m.atm_iv), 4),
            rr25: round_opt(metrics.and_then(|m| m.rr25d), 4),
            fly25: round_opt(metrics.and_then(|m| m.bf25d), 4),
            skew_dir: metrics.and_then(|m| m.skew_direction),
            fwd: round_opt(point.forward, 2),
            basis_pct: round_opt(point.implied_rate.map(|r| r * 100.0), 2),
        }
    }
}

impl SurfaceReport {
    /// Confidence is the share of tenors matched to an expiry; below one
    /// half a `low_confidence_sparse_data` note is added.
    pub fn build(
        currency: Currency,
        spot: f64,
        points: &[SurfacePoint],
        ts: i64,
        mut notes: Vec<String>,
    ) -> Self {
        let points = &points[..points.len().min(SURFACE_MAX_TENORS)];
        let matched = points.iter().filter(|p| p.is_matched()).count();
        let confidence = if points.is_empty() {
            0.0
        } else {
            matched as f64 / points.len() as f64
        };
        if confidence < SURFACE_MIN_CONFIDENCE {
            notes.push("low_confidence_sparse_data".to_string());
        }

        Self {
            currency,
            spot: round_to(spot, 2),
            tenors: points.iter().map(SurfaceTenorRow::from).collect(),
            confidence: round_to(confidence, 2),
            ts,
            notes: cap_notes(notes),
        }
    }
}
