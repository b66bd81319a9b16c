//! IV term structure: tenor interpolation, slope and shape.

use crate::constants::analytics::{
    FLAT_TERM_STRUCTURE_WIDTH, SLOPE_NORMALIZATION_DAYS, TENOR_MATCH_FRACTION,
};
use crate::types::analytics::TermStructurePoint;
use crate::types::enums::TermStructureShape;

/// Linearly interpolate IV at `target_days` from `(days, iv)` points.
///
/// A single point is returned as is. Targets outside the covered range take
/// the nearest endpoint's IV (flat extrapolation). When two points share a
/// day count the bracket weight is `0.5`.
pub fn interpolate_iv(points: &[(f64, f64)], target_days: f64) -> Option<f64> {
    match points {
        [] => return None,
        [(_, iv)] => return Some(*iv),
        _ => {}
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    for pair in sorted.windows(2) {
        let (d1, iv1) = pair[0];
        let (d2, iv2) = pair[1];
        if d1 <= target_days && target_days <= d2 {
            let weight = if d2 != d1 {
                (target_days - d1) / (d2 - d1)
            } else {
                0.5
            };
            return Some(iv1 + weight * (iv2 - iv1));
        }
    }

    let (first_days, first_iv) = sorted[0];
    let (last_days, last_iv) = sorted[sorted.len() - 1];
    if target_days < first_days {
        Some(first_iv)
    } else if target_days > last_days {
        Some(last_iv)
    } else {
        None
    }
}

/// Closest point with a defined IV whose distance to `target` is below half
/// the target. Ties keep the earliest point.
fn closest_point(points: &[TermStructurePoint], target: u32) -> Option<&TermStructurePoint> {
    let target = f64::from(target);
    let tolerance = target * TENOR_MATCH_FRACTION;
    let mut best: Option<(&TermStructurePoint, f64)> = None;

    for point in points.iter().filter(|p| p.atm_iv.is_some()) {
        let distance = (f64::from(point.days) - target).abs();
        if distance >= tolerance {
            continue;
        }
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((point, distance));
        }
    }

    best.map(|(point, _)| point)
}

/// IV change per 30 days between the points nearest `start_days` and
/// `end_days`.
///
/// Undefined when either tenor has no point within half its length, or when
/// both resolve to the same day count.
pub fn term_structure_slope(
    points: &[TermStructurePoint],
    start_days: u32,
    end_days: u32,
) -> Option<f64> {
    let start = closest_point(points, start_days)?;
    let end = closest_point(points, end_days)?;
    if start.days == end.days {
        return None;
    }

    let iv_diff = end.atm_iv? - start.atm_iv?;
    let days_diff = f64::from(end.days) - f64::from(start.days);
    Some(iv_diff / days_diff * SLOPE_NORMALIZATION_DAYS)
}

/// Whether IV rises from the shortest to the longest tenor.
///
/// Fewer than two points with a defined IV count as contango.
pub fn term_structure_is_contango(points: &[TermStructurePoint]) -> bool {
    let mut valid: Vec<(u32, f64)> = points
        .iter()
        .filter_map(|p| p.atm_iv.map(|iv| (p.days, iv)))
        .collect();
    if valid.len() < 2 {
        return true;
    }
    valid.sort_by_key(|&(days, _)| days);

    let (_, first_iv) = valid[0];
    let (_, last_iv) = valid[valid.len() - 1];
    last_iv > first_iv
}

/// Contango per [`term_structure_is_contango`]; otherwise flat when the IV
/// range across points is under `flat_width`, else backwardation.
pub fn term_structure_shape_with_width(
    points: &[TermStructurePoint],
    flat_width: f64,
) -> TermStructureShape {
    if term_structure_is_contango(points) {
        return TermStructureShape::Contango;
    }
    if points.len() < 2 {
        return TermStructureShape::Flat;
    }

    let ivs: Vec<f64> = points
        .iter()
        .filter_map(|p| p.atm_iv)
        .filter(|iv| *iv != 0.0)
        .collect();
    let max = ivs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = ivs.iter().copied().fold(f64::INFINITY, f64::min);

    if !ivs.is_empty() && max - min < flat_width {
        TermStructureShape::Flat
    } else {
        TermStructureShape::Backwardation
    }
}

/// [`term_structure_shape_with_width`] with the default 2 vol-point width.
pub fn term_structure_shape(points: &[TermStructurePoint]) -> TermStructureShape {
    term_structure_shape_with_width(points, FLAT_TERM_STRUCTURE_WIDTH)
}
