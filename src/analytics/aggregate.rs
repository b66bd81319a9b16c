//! Per-strike aggregation shared by the open-interest, gamma-exposure and
//! max-pain engines.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::types::option::OptionRecord;

/// Strike wrapped with a total order so it can key a `BTreeMap`.
#[derive(Debug, Clone, Copy)]
struct StrikeKey(f64);

impl PartialEq for StrikeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for StrikeKey {}

impl PartialOrd for StrikeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StrikeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Fold options into one accumulator per distinct strike and return the
/// accumulators ascending by strike.
///
/// `init` creates the accumulator the first time a strike is seen; `fold`
/// is applied for every option at that strike, in input order. Options with
/// a non-finite strike are skipped.
pub fn fold_by_strike<'a, I, A>(
    options: I,
    mut init: impl FnMut(f64) -> A,
    mut fold: impl FnMut(&mut A, &'a OptionRecord),
) -> Vec<A>
where
    I: IntoIterator<Item = &'a OptionRecord>,
{
    let mut buckets: BTreeMap<StrikeKey, A> = BTreeMap::new();

    for option in options {
        if !option.strike.is_finite() {
            continue;
        }
        let acc = buckets
            .entry(StrikeKey(option.strike))
            .or_insert_with(|| init(option.strike));
        fold(acc, option);
    }

    buckets.into_values().collect()
}

/// Distinct finite strikes, ascending.
pub fn unique_strikes<'a, I>(options: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a OptionRecord>,
{
    fold_by_strike(options, |strike| strike, |_, _| {})
}
