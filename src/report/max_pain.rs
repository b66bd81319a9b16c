//! Max pain report.

use crate::analytics::max_pain::max_pain;
use crate::analytics::volatility::round_to;
use crate::types::analytics::PainPoint;
use crate::types::enums::Currency;
use crate::types::option::OptionRecord;
use crate::types::report::MaxPainReport;

use super::{cap_notes, round_opt};

impl MaxPainReport {
    /// Run the max pain search over one expiry's chain.
    pub fn build(
        currency: Currency,
        expiry: impl Into<String>,
        expiry_ts: i64,
        spot: f64,
        options: &[OptionRecord],
        notes: Vec<String>,
    ) -> Self {
        let result = max_pain(options, spot);

        let pain_curve_top3 = result
            .pain_curve_top3
            .iter()
            .map(|p| PainPoint {
                strike: p.strike,
                pain: round_to(p.pain, 2),
            })
            .collect();

        Self {
            currency,
            expiry: expiry.into().to_ascii_uppercase(),
            expiry_ts,
            spot: round_to(spot, 2),
            max_pain_strike: result.max_pain_strike,
            distance_from_spot_pct: round_to(result.distance_from_spot_pct().unwrap_or(0.0), 2),
            pain_curve_top3,
            total_call_oi: round_to(result.total_call_oi, 2),
            total_put_oi: round_to(result.total_put_oi, 2),
            pcr: round_opt(result.put_call_ratio(), 3),
            notes: cap_notes(notes),
        }
    }
}
