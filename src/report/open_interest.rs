//! Open interest report.

use crate::analytics::open_interest::{
    aggregate_by_strike, peak_concentration, peak_range, top_n_by_oi,
};
use crate::analytics::volatility::round_to;
use crate::constants::analytics::OI_PEAK_PERCENTILE;
use crate::constants::limits::{MAX_STRIKES, TOP_OI_STRIKES};
use crate::types::analytics::StrikeOi;
use crate::types::enums::Currency;
use crate::types::option::OptionRecord;
use crate::types::report::{OiPeak, OpenInterestReport, StrikeOiRow};

use super::{cap_notes, nearest_to_spot, round_opt};

impl From<&StrikeOi> for StrikeOiRow {
    fn from(oi: &StrikeOi) -> Self {
        Self {
            strike: oi.strike(),
            call_oi: round_to(oi.call_oi(), 2),
            put_oi: round_to(oi.put_oi(), 2),
            total_oi: round_to(oi.total_oi(), 2),
            pcr: round_opt(oi.put_call_ratio(), 3),
        }
    }
}

impl OpenInterestReport {
    /// Aggregate a single expiry's chain into an OI report.
    ///
    /// Totals, top strikes and the 80% concentration range use every strike;
    /// only the per-strike listing is cut to the strikes nearest spot. With
    /// no spot the listing keeps the lowest strikes.
    pub fn build(
        currency: Currency,
        expiry: impl Into<String>,
        spot: Option<f64>,
        options: &[OptionRecord],
        notes: Vec<String>,
    ) -> Self {
        let by_strike = aggregate_by_strike(options);

        let total_call_oi: f64 = by_strike.iter().map(StrikeOi::call_oi).sum();
        let total_put_oi: f64 = by_strike.iter().map(StrikeOi::put_oi).sum();
        let pcr_total = (total_call_oi > 0.0).then(|| total_put_oi / total_call_oi);

        let top_strikes = top_n_by_oi(&by_strike, TOP_OI_STRIKES)
            .iter()
            .map(StrikeOiRow::from)
            .collect();

        let peak = peak_range(&by_strike, OI_PEAK_PERCENTILE).map(|(low, high)| OiPeak {
            low,
            high,
            concentration: round_to(peak_concentration(&by_strike, (low, high)), 3),
        });

        let listed = match spot.filter(|s| *s > 0.0) {
            Some(spot) => nearest_to_spot(by_strike, spot, MAX_STRIKES, StrikeOi::strike),
            None => {
                let mut rows = by_strike;
                rows.truncate(MAX_STRIKES);
                rows
            }
        };

        Self {
            currency,
            expiry: expiry.into().to_ascii_uppercase(),
            spot: spot.map_or(0.0, |s| round_to(s, 2)),
            total_call_oi: round_to(total_call_oi, 2),
            total_put_oi: round_to(total_put_oi, 2),
            pcr_total: round_opt(pcr_total, 3),
            oi_by_strike: listed.iter().map(StrikeOiRow::from).collect(),
            top_strikes,
            peak_range: peak,
            notes: cap_notes(notes),
        }
    }
}
