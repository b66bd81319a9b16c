//! Time and volatility scaling: horizon IV, expected move, days to expiry.
//!
//! The expected move is the one-standard-deviation band of a log-normal
//! approximation, `spot × σ × √T`. It is a statistical rule of thumb, not an
//! option price.

use crate::constants::{MINUTES_PER_YEAR, MS_PER_DAY};
use crate::types::analytics::ExpectedMoveResult;

/// Round to `decimals` places, ties to even (`0.125` → `0.12`).
///
/// Ties are decided on `value × 10^decimals` as computed in `f64`, which can
/// differ from a decimal-exact rounding when the product itself rounds.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Scale an annualized IV to a horizon: `iv × √(minutes / 525600)`.
///
/// Non-positive horizons give `0`.
pub fn scale_iv_to_horizon(iv_annualized: f64, horizon_minutes: i64) -> f64 {
    if horizon_minutes <= 0 {
        return 0.0;
    }
    let t_years = horizon_minutes as f64 / MINUTES_PER_YEAR;
    iv_annualized * t_years.sqrt()
}

/// One-sigma expected move of `spot` over `horizon_minutes`.
///
/// If any of `spot`, `iv_annualized` or `horizon_minutes` is non-positive the
/// result is degenerate: zero move, both bands at `spot`, confidence `0`.
/// Move, basis points and bands are rounded to 2 decimals; `confidence` is
/// passed through.
pub fn expected_move(
    spot: f64,
    iv_annualized: f64,
    horizon_minutes: i64,
    iv_source: impl Into<String>,
    confidence: f64,
) -> ExpectedMoveResult {
    let iv_source = iv_source.into();

    if spot <= 0.0 || iv_annualized <= 0.0 || horizon_minutes <= 0 {
        return ExpectedMoveResult {
            spot,
            iv_used: iv_annualized,
            iv_source,
            horizon_minutes,
            move_points: 0.0,
            move_bps: 0.0,
            up_1sigma: spot,
            down_1sigma: spot,
            confidence: 0.0,
        };
    }

    let t_years = horizon_minutes as f64 / MINUTES_PER_YEAR;
    let move_points = spot * iv_annualized * t_years.sqrt();
    let move_bps = move_points / spot * 10_000.0;

    ExpectedMoveResult {
        spot,
        iv_used: iv_annualized,
        iv_source,
        horizon_minutes,
        move_points: round_to(move_points, 2),
        move_bps: round_to(move_bps, 2),
        up_1sigma: round_to(spot + move_points, 2),
        down_1sigma: round_to(spot - move_points, 2),
        confidence,
    }
}

/// Fractional days between two millisecond timestamps; expired instruments
/// report `0`, never a negative value.
pub fn days_to_expiry(expiry_ts_ms: i64, now_ts_ms: i64) -> f64 {
    let diff_ms = expiry_ts_ms - now_ts_ms;
    if diff_ms <= 0 {
        return 0.0;
    }
    diff_ms as f64 / MS_PER_DAY
}

/// DVOL is quoted in percentage points; `80.5` → `0.805`.
pub fn dvol_to_decimal(dvol: f64) -> f64 {
    dvol / 100.0
}
