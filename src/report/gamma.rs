//! Gamma exposure report.

use crate::analytics::gex::gamma_exposure_profile;
use crate::analytics::volatility::round_to;
use crate::constants::limits::{MAX_STRIKES, TOP_GEX_STRIKES};
use crate::types::analytics::GexResult;
use crate::types::enums::{Currency, GammaPositioning};
use crate::types::option::OptionRecord;
use crate::types::report::{GammaExposureReport, StrikeGexRow};

use super::{cap_notes, nearest_to_spot, round_opt};

/// GEX values are reported in millions.
const GEX_SCALE: f64 = 1_000_000.0;

impl From<&GexResult> for StrikeGexRow {
    fn from(gex: &GexResult) -> Self {
        Self {
            strike: gex.strike(),
            call_gex: round_to(gex.call_gex() / GEX_SCALE, 3),
            put_gex: round_to(gex.put_gex() / GEX_SCALE, 3),
            net_gex: round_to(gex.net_gex() / GEX_SCALE, 3),
        }
    }
}

impl GammaExposureReport {
    /// Compute the GEX profile of `options` and shape it for transport.
    ///
    /// Top positive/negative strikes and positioning use the full profile;
    /// the per-strike listing is cut to the strikes nearest spot.
    pub fn build(
        currency: Currency,
        spot: f64,
        expiries_included: Vec<String>,
        options: &[OptionRecord],
        mut notes: Vec<String>,
    ) -> Self {
        let profile = gamma_exposure_profile(options, spot);

        let top_positive = profile
            .top_positive(TOP_GEX_STRIKES)
            .iter()
            .map(StrikeGexRow::from)
            .collect();
        let top_negative = profile
            .top_negative(TOP_GEX_STRIKES)
            .iter()
            .map(StrikeGexRow::from)
            .collect();

        let net_gex_millions = profile.net_gex / GEX_SCALE;
        let positioning = GammaPositioning::from_net_gex_default(net_gex_millions);

        notes.extend(profile.notes.iter().cloned());

        let listed = nearest_to_spot(profile.gex_by_strike, spot, MAX_STRIKES, GexResult::strike);

        Self {
            currency,
            spot: round_to(spot, 2),
            expiries_included,
            net_gex: round_to(net_gex_millions, 3),
            gamma_flip: round_opt(profile.gamma_flip_level, 2),
            max_pos_gex_strike: profile.max_positive_gex_strike,
            max_neg_gex_strike: profile.max_negative_gex_strike,
            gex_by_strike: listed.iter().map(StrikeGexRow::from).collect(),
            top_positive,
            top_negative,
            market_maker_positioning: positioning,
            notes: cap_notes(notes),
        }
    }
}
