//! Chain helpers: IV normalisation, strike and expiry selection, instrument
//! naming, and the small basis, funding and order-book metrics.

use chrono::DateTime;

use crate::analytics::volatility::days_to_expiry;
use crate::constants::analytics::{FUNDING_PERIODS_PER_YEAR, TENOR_MATCH_FRACTION};
use crate::types::enums::{Currency, OptionType};
use crate::types::option::OptionRecord;

// ---------------------------------------------------------------------------
// IV units
// ---------------------------------------------------------------------------

/// Deribit publishes mark IV in percentage points. Values above `1` are
/// treated as percentages and divided by 100; smaller values are assumed to
/// be decimal already.
pub fn normalize_iv(raw: f64) -> f64 {
    if raw > 1.0 { raw / 100.0 } else { raw }
}

// ---------------------------------------------------------------------------
// Strike selection
// ---------------------------------------------------------------------------

/// Element of `strikes` closest to `target`; first on ties.
pub fn nearest_strike(target: f64, strikes: &[f64]) -> Option<f64> {
    strikes
        .iter()
        .copied()
        .min_by(|a, b| (a - target).abs().total_cmp(&(b - target).abs()))
}

/// At-the-money strike: the listed strike closest to spot.
pub fn atm_strike(strikes: &[f64], spot: f64) -> Option<f64> {
    nearest_strike(spot, strikes)
}

/// Option of the given type whose strike is closest to `target_strike`.
pub fn find_closest_strike_option<'a>(
    options: &'a [OptionRecord],
    target_strike: f64,
    option_type: OptionType,
) -> Option<&'a OptionRecord> {
    options
        .iter()
        .filter(|o| o.option_type == option_type)
        .min_by(|a, b| {
            (a.strike - target_strike)
                .abs()
                .total_cmp(&(b.strike - target_strike).abs())
        })
}

/// Option of the given type whose strike is closest to spot.
pub fn find_atm_option(
    options: &[OptionRecord],
    spot: f64,
    option_type: OptionType,
) -> Option<&OptionRecord> {
    find_closest_strike_option(options, spot, option_type)
}

/// Option of the given type whose |delta| is closest to `target_abs_delta`.
/// Options without a delta are ignored.
pub fn find_delta_option(
    options: &[OptionRecord],
    target_abs_delta: f64,
    option_type: OptionType,
) -> Option<&OptionRecord> {
    options
        .iter()
        .filter(|o| o.option_type == option_type)
        .filter_map(|o| o.delta.map(|d| (o, (d.abs() - target_abs_delta).abs())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(o, _)| o)
}

// ---------------------------------------------------------------------------
// Expiry selection
// ---------------------------------------------------------------------------

/// Expiry (ms timestamp) whose remaining days are closest to `target_days`,
/// provided the distance is below half the target. Expired entries are
/// skipped; ties keep the first candidate.
pub fn select_expiry_for_tenor(expiries_ms: &[i64], target_days: u32, now_ms: i64) -> Option<i64> {
    let target = f64::from(target_days);
    let tolerance = target * TENOR_MATCH_FRACTION;
    let mut best: Option<(i64, f64)> = None;

    for &expiry in expiries_ms {
        if expiry <= now_ms {
            continue;
        }
        let distance = (days_to_expiry(expiry, now_ms) - target).abs();
        if distance < tolerance && best.is_none_or(|(_, d)| distance < d) {
            best = Some((expiry, distance));
        }
    }

    best.map(|(expiry, _)| expiry)
}

/// Deribit expiry token for a timestamp: UTC day without padding, month
/// abbreviation and two-digit year, upper-cased (`28JUN24`, `5JUL24`).
pub fn format_expiry_label(expiry_ts_ms: i64) -> String {
    DateTime::from_timestamp_millis(expiry_ts_ms)
        .map(|dt| dt.format("%-d%b%y").to_string().to_ascii_uppercase())
        .unwrap_or_default()
}

/// Option instrument name, e.g. `BTC-28JUN24-50000-C`.
pub fn option_instrument_name(
    currency: Currency,
    expiry_label: &str,
    strike: f64,
    option_type: OptionType,
) -> String {
    format!(
        "{currency}-{expiry_label}-{strike}-{}",
        option_type.suffix()
    )
}

// ---------------------------------------------------------------------------
// Basis & order book
// ---------------------------------------------------------------------------

/// `spot × e^(rate × t)`.
pub fn forward_price(spot: f64, rate: f64, time_years: f64) -> f64 {
    spot * (rate * time_years).exp()
}

/// Continuously compounded rate implied by a futures price:
/// `ln(F / S) / t`.
pub fn implied_rate_from_futures(spot: f64, futures_price: f64, time_years: f64) -> Option<f64> {
    if spot <= 0.0 || futures_price <= 0.0 || time_years <= 0.0 {
        return None;
    }
    Some((futures_price / spot).ln() / time_years)
}

/// Annualize an 8-hourly funding rate (three periods a day).
pub fn annualize_funding(rate_8h: f64) -> f64 {
    rate_8h * FUNDING_PERIODS_PER_YEAR
}

/// `(bid - ask) / (bid + ask)`, from -1 (all asks) to 1 (all bids).
pub fn order_book_imbalance(bid_depth: f64, ask_depth: f64) -> Option<f64> {
    let total = bid_depth + ask_depth;
    if total == 0.0 {
        return None;
    }
    Some((bid_depth - ask_depth) / total)
}

/// Bid/ask spread in basis points of the mid.
pub fn spread_bps(bid: f64, ask: f64) -> Option<f64> {
    if bid <= 0.0 || ask <= 0.0 {
        return None;
    }
    let mid = (bid + ask) / 2.0;
    Some((ask - bid) / mid * 10_000.0)
}
