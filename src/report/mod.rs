//! Report builders: turn analytics results into the size-bounded shapes in
//! [`crate::types::report`].
//!
//! Builders are pure: they take already-fetched data, call into
//! [`crate::analytics`], then cap list lengths and round values for
//! transport. The orchestration methods in [`crate::api`] call them after
//! fetching a snapshot.

pub mod chain;
pub mod gamma;
pub mod market;
pub mod max_pain;
pub mod open_interest;
pub mod volatility;

use crate::analytics::volatility::round_to;
use crate::constants::limits::MAX_NOTES;

/// Round an optional value.
pub(crate) fn round_opt(value: Option<f64>, decimals: i32) -> Option<f64> {
    value.map(|v| round_to(v, decimals))
}

/// Keep at most [`MAX_NOTES`] notes.
pub(crate) fn cap_notes(mut notes: Vec<String>) -> Vec<String> {
    notes.truncate(MAX_NOTES);
    notes
}

/// Keep the `max` rows whose strike is nearest `spot`, returned ascending by
/// strike.
pub(crate) fn nearest_to_spot<T>(
    mut rows: Vec<T>,
    spot: f64,
    max: usize,
    strike: impl Fn(&T) -> f64,
) -> Vec<T> {
    rows.sort_by(|a, b| (strike(a) - spot).abs().total_cmp(&(strike(b) - spot).abs()));
    rows.truncate(max);
    rows.sort_by(|a, b| strike(a).total_cmp(&strike(b)));
    rows
}
