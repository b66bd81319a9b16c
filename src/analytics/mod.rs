//! The analytics engine: pure, synchronous transformations over option-chain
//! snapshots.
//!
//! Nothing in here performs I/O, holds state between calls, or fails. Missing
//! inputs produce `None` or a degenerate zeroed result that callers can
//! detect and report as "insufficient data".
//!
//! ## Modules
//!
//! | Module | Description |
//! |---|---|
//! | [`volatility`] | Horizon IV scaling, expected move, days to expiry |
//! | [`skew`] | Risk reversal, butterfly, 25-delta strike, skew direction/trend |
//! | [`term_structure`] | Tenor interpolation, slope, contango and shape |
//! | [`gex`] | Gamma exposure per option and per strike, gamma flip |
//! | [`max_pain`] | Pain curve and max pain strike |
//! | [`open_interest`] | OI per strike, top strikes, concentration range |
//! | [`chain`] | Strike/expiry lookup, IV units, basis and book metrics |
//! | [`aggregate`] | Fold options into sorted per-strike buckets |

pub mod aggregate;
pub mod chain;
pub mod gex;
pub mod max_pain;
pub mod open_interest;
pub mod skew;
pub mod term_structure;
pub mod volatility;

pub use chain::{normalize_iv, order_book_imbalance, spread_bps};
pub use gex::{gamma_exposure_profile, single_gex};
pub use max_pain::{max_pain, pain_at_strike};
pub use open_interest::{aggregate_by_strike, peak_range, top_n_by_oi};
pub use skew::{butterfly, estimate_25d_strike, risk_reversal, skew_direction, skew_trend};
pub use term_structure::{
    interpolate_iv, term_structure_is_contango, term_structure_shape, term_structure_slope,
};
pub use volatility::{days_to_expiry, expected_move, scale_iv_to_horizon};
