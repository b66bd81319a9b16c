//! Open interest: per-strike aggregation, top strikes and the strike range
//! holding most of the open interest.

use crate::analytics::aggregate::fold_by_strike;
use crate::types::analytics::StrikeOi;
use crate::types::option::OptionRecord;

/// Call and put open interest per strike, ascending by strike.
///
/// Options without open interest are skipped.
pub fn aggregate_by_strike(options: &[OptionRecord]) -> Vec<StrikeOi> {
    fold_by_strike(
        options.iter().filter(|o| o.open_interest.is_some()),
        StrikeOi::new,
        |bucket, option| {
            bucket.add(option.option_type, option.open_interest.unwrap_or(0.0));
        },
    )
}

/// The `n` strikes with the most total open interest, descending. Equal
/// totals keep their input order.
pub fn top_n_by_oi(data: &[StrikeOi], n: usize) -> Vec<StrikeOi> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| b.total_oi().total_cmp(&a.total_oi()));
    sorted.truncate(n);
    sorted
}

/// Smallest and largest strike among the highest-OI strikes that together
/// reach `percentile` of total open interest.
///
/// Undefined for empty data or zero total open interest.
pub fn peak_range(data: &[StrikeOi], percentile: f64) -> Option<(f64, f64)> {
    let total: f64 = data.iter().map(StrikeOi::total_oi).sum();
    if data.is_empty() || total == 0.0 {
        return None;
    }

    let mut sorted: Vec<&StrikeOi> = data.iter().collect();
    sorted.sort_by(|a, b| b.total_oi().total_cmp(&a.total_oi()));

    let mut cumulative = 0.0;
    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;
    for oi in sorted {
        cumulative += oi.total_oi() / total;
        low = low.min(oi.strike());
        high = high.max(oi.strike());
        if cumulative >= percentile {
            break;
        }
    }

    Some((low, high))
}

/// Share of total open interest held by strikes inside `range` (inclusive).
pub fn peak_concentration(data: &[StrikeOi], range: (f64, f64)) -> f64 {
    let total: f64 = data.iter().map(StrikeOi::total_oi).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let (low, high) = range;
    let inside: f64 = data
        .iter()
        .filter(|s| low <= s.strike() && s.strike() <= high)
        .map(StrikeOi::total_oi)
        .sum();
    inside / total
}
