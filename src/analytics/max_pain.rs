//! Max pain: the settlement strike that minimises the aggregate intrinsic
//! value paid out to option holders.

use crate::analytics::aggregate::unique_strikes;
use crate::types::analytics::{MaxPainResult, PainPoint};
use crate::types::enums::OptionType;
use crate::types::option::OptionRecord;

/// Total intrinsic value owed to holders if the underlying settles at
/// `target_strike`. Options without open interest contribute nothing.
pub fn pain_at_strike(target_strike: f64, options: &[OptionRecord]) -> f64 {
    options
        .iter()
        .filter_map(|option| {
            let oi = option.open_interest.filter(|oi| *oi != 0.0)?;
            let intrinsic = match option.option_type {
                OptionType::Call => (target_strike - option.strike).max(0.0),
                OptionType::Put => (option.strike - target_strike).max(0.0),
            };
            Some(intrinsic * oi)
        })
        .sum()
}

/// Pain at every listed strike and the strike where it is lowest.
///
/// An empty chain falls back to `spot` with an empty curve. Ties go to the
/// lowest strike.
pub fn max_pain(options: &[OptionRecord], spot: f64) -> MaxPainResult {
    let strikes = unique_strikes(options);

    if strikes.is_empty() {
        return MaxPainResult {
            max_pain_strike: spot,
            pain_value: 0.0,
            pain_curve: Vec::new(),
            pain_curve_top3: Vec::new(),
            total_call_oi: 0.0,
            total_put_oi: 0.0,
            spot_price: spot,
        };
    }

    let pain_curve: Vec<PainPoint> = strikes
        .iter()
        .map(|&strike| PainPoint {
            strike,
            pain: pain_at_strike(strike, options),
        })
        .collect();

    let mut min_pain = f64::INFINITY;
    let mut max_pain_strike = spot;
    for point in &pain_curve {
        if point.pain < min_pain {
            min_pain = point.pain;
            max_pain_strike = point.strike;
        }
    }

    let mut by_pain = pain_curve.clone();
    by_pain.sort_by(|a, b| a.pain.total_cmp(&b.pain));
    by_pain.truncate(3);

    let total_oi = |kind: OptionType| -> f64 {
        options
            .iter()
            .filter(|o| o.option_type == kind)
            .map(|o| o.open_interest.unwrap_or(0.0))
            .sum()
    };

    MaxPainResult {
        max_pain_strike,
        pain_value: min_pain,
        pain_curve,
        pain_curve_top3: by_pain,
        total_call_oi: total_oi(OptionType::Call),
        total_put_oi: total_oi(OptionType::Put),
        spot_price: spot,
    }
}
