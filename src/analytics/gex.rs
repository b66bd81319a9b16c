//! Gamma exposure (GEX): per-option exposure, per-strike aggregation,
//! gamma flip and positioning extremes.
//!
//! Sign convention is the dealer's side: customers are assumed net long
//! options, so calls contribute negative exposure and puts positive.

use crate::analytics::aggregate::fold_by_strike;
use crate::constants::analytics::{
    GAMMA_POSITIONING_THRESHOLD, GEX_PERCENT_MOVE, STANDARD_CONTRACT_SIZE,
};
use crate::types::analytics::{GammaExposureProfile, GexResult};
use crate::types::enums::{GammaPositioning, OptionType};
use crate::types::option::OptionRecord;

/// Exposure of one option: `gamma × OI × spot² × contract_size × 0.01`,
/// negated for calls.
///
/// Missing or zero gamma or open interest gives `0`.
pub fn single_gex(
    gamma: Option<f64>,
    open_interest: Option<f64>,
    spot: f64,
    option_type: OptionType,
    contract_size: f64,
) -> f64 {
    let (Some(gamma), Some(open_interest)) = (gamma, open_interest) else {
        return 0.0;
    };
    if gamma == 0.0 || open_interest == 0.0 {
        return 0.0;
    }

    let raw = gamma * open_interest * spot * spot * contract_size * GEX_PERCENT_MOVE;
    match option_type {
        OptionType::Call => -raw,
        OptionType::Put => raw,
    }
}

/// Build the per-strike GEX profile of a chain at `spot`.
///
/// Options without gamma or open interest are ignored. The gamma flip is the
/// first sign change of net GEX scanning strikes upward, linearly
/// interpolated between the two strikes; later crossings are not reported.
pub fn gamma_exposure_profile(options: &[OptionRecord], spot: f64) -> GammaExposureProfile {
    let mut notes = Vec::new();

    let gex_by_strike = fold_by_strike(
        options
            .iter()
            .filter(|o| o.gamma.is_some() && o.open_interest.is_some()),
        GexResult::new,
        |bucket, option| {
            let gex = single_gex(
                option.gamma,
                option.open_interest,
                spot,
                option.option_type,
                STANDARD_CONTRACT_SIZE,
            );
            bucket.add(option.option_type, gex);
        },
    );

    let net_gex: f64 = gex_by_strike.iter().map(GexResult::net_gex).sum();
    let gamma_flip_level = gamma_flip(&gex_by_strike);
    let (max_positive_gex_strike, max_negative_gex_strike) = gex_extremes(&gex_by_strike);

    if gex_by_strike.is_empty() {
        notes.push("no_valid_gamma_data".to_owned());
    }

    tracing::debug!(
        strikes = gex_by_strike.len(),
        net_gex,
        ?gamma_flip_level,
        "computed gamma exposure profile"
    );

    GammaExposureProfile {
        gex_by_strike,
        net_gex,
        gamma_flip_level,
        max_positive_gex_strike,
        max_negative_gex_strike,
        spot_price: spot,
        notes,
    }
}

/// First zero crossing of net GEX over strikes sorted ascending.
pub fn gamma_flip(gex_by_strike: &[GexResult]) -> Option<f64> {
    gex_by_strike.windows(2).find_map(|pair| {
        let (curr, next) = (&pair[0], &pair[1]);
        let (a, b) = (curr.net_gex(), next.net_gex());
        if a * b < 0.0 && a != b {
            let ratio = a.abs() / (b - a).abs();
            Some(curr.strike() + ratio * (next.strike() - curr.strike()))
        } else {
            None
        }
    })
}

/// Strikes of the largest positive and most negative net GEX. Strict
/// comparisons keep the lowest strike on ties.
fn gex_extremes(gex_by_strike: &[GexResult]) -> (Option<f64>, Option<f64>) {
    let mut max_positive: Option<f64> = None;
    let mut max_negative: Option<f64> = None;
    let mut max_positive_value = 0.0;
    let mut max_negative_value = 0.0;

    for gex in gex_by_strike {
        if gex.net_gex() > max_positive_value {
            max_positive_value = gex.net_gex();
            max_positive = Some(gex.strike());
        }
        if gex.net_gex() < max_negative_value {
            max_negative_value = gex.net_gex();
            max_negative = Some(gex.strike());
        }
    }

    (max_positive, max_negative)
}

impl GammaPositioning {
    /// Classify net GEX expressed in millions against a symmetric band.
    pub fn from_net_gex(net_gex_millions: f64, threshold: f64) -> Self {
        if net_gex_millions > threshold {
            Self::LongGamma
        } else if net_gex_millions < -threshold {
            Self::ShortGamma
        } else {
            Self::Neutral
        }
    }

    /// [`GammaPositioning::from_net_gex`] with the default 0.5 M band.
    pub fn from_net_gex_default(net_gex_millions: f64) -> Self {
        Self::from_net_gex(net_gex_millions, GAMMA_POSITIONING_THRESHOLD)
    }
}
