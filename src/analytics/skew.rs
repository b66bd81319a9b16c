//! 25-delta skew: risk reversal, butterfly, delta-strike estimate and
//! the direction/trend classifications built on them.

use crate::constants::DAYS_PER_YEAR;
use crate::constants::analytics::{SKEW_DIRECTION_THRESHOLD, SKEW_TREND_THRESHOLD, Z_25_DELTA};
use crate::types::analytics::SkewMetrics;
use crate::types::enums::{OptionType, SkewDirection, SkewTrend};

/// `call_iv - put_iv`. Positive means upside demand.
pub fn risk_reversal(call_iv: Option<f64>, put_iv: Option<f64>) -> Option<f64> {
    Some(call_iv? - put_iv?)
}

/// `(call_iv + put_iv) / 2 - atm_iv`. Positive means the wings are bid.
pub fn butterfly(call_iv: Option<f64>, put_iv: Option<f64>, atm_iv: Option<f64>) -> Option<f64> {
    Some((call_iv? + put_iv?) / 2.0 - atm_iv?)
}

/// Approximate 25-delta strike: `spot × exp(±z × σ × √T)` with `z = 0.675`.
///
/// This skips solving for delta under Black-Scholes. Calls land above spot,
/// puts below; a non-positive IV or tenor returns `spot`.
pub fn estimate_25d_strike(
    spot: f64,
    atm_iv: f64,
    days_to_expiry: f64,
    option_type: OptionType,
) -> f64 {
    if atm_iv <= 0.0 || days_to_expiry <= 0.0 {
        return spot;
    }

    let t_years = days_to_expiry / DAYS_PER_YEAR;
    let width = Z_25_DELTA * atm_iv * t_years.sqrt();

    match option_type {
        OptionType::Call => spot * width.exp(),
        OptionType::Put => spot * (-width).exp(),
    }
}

/// Classify a risk reversal against a symmetric neutral band.
pub fn skew_direction(rr25d: Option<f64>, threshold: f64) -> Option<SkewDirection> {
    let rr = rr25d?;
    Some(if rr > threshold {
        SkewDirection::Bullish
    } else if rr < -threshold {
        SkewDirection::Bearish
    } else {
        SkewDirection::Neutral
    })
}

/// [`skew_direction`] with the default 0.5 vol-point band.
pub fn default_skew_direction(rr25d: Option<f64>) -> Option<SkewDirection> {
    skew_direction(rr25d, SKEW_DIRECTION_THRESHOLD)
}

/// Compare |RR| of the shortest and longest tenor with a 1 vol-point band.
pub fn skew_trend(metrics: &[SkewMetrics]) -> Option<SkewTrend> {
    skew_trend_with_threshold(metrics, SKEW_TREND_THRESHOLD)
}

/// Steepening when the short tenor's |RR| exceeds the long tenor's by more
/// than `threshold`, flattening for the reverse, stable otherwise. Needs at
/// least two tenors with a defined risk reversal.
pub fn skew_trend_with_threshold(metrics: &[SkewMetrics], threshold: f64) -> Option<SkewTrend> {
    let mut valid: Vec<(u32, f64)> = metrics
        .iter()
        .filter_map(|m| m.rr25d.map(|rr| (m.days, rr)))
        .collect();
    if valid.len() < 2 {
        return None;
    }
    valid.sort_by_key(|&(days, _)| days);

    let (_, short_rr) = valid[0];
    let (_, long_rr) = valid[valid.len() - 1];
    let diff = short_rr.abs() - long_rr.abs();

    Some(if diff > threshold {
        SkewTrend::Steepening
    } else if diff < -threshold {
        SkewTrend::Flattening
    } else {
        SkewTrend::Stable
    })
}

/// Assemble the skew metrics of one tenor from its three IVs.
pub fn skew_metrics(
    days: u32,
    atm_iv: Option<f64>,
    call_25d_iv: Option<f64>,
    put_25d_iv: Option<f64>,
) -> SkewMetrics {
    let rr25d = risk_reversal(call_25d_iv, put_25d_iv);
    SkewMetrics {
        days,
        rr25d,
        bf25d: butterfly(call_25d_iv, put_25d_iv, atm_iv),
        atm_iv,
        call_25d_iv,
        put_25d_iv,
        skew_direction: default_skew_direction(rr25d),
    }
}
