//! Horizon scaling, expected move and time helpers.

use deribit_analytics::analytics::volatility::{
    days_to_expiry, dvol_to_decimal, expected_move, round_to, scale_iv_to_horizon,
};

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn one_year_horizon_keeps_annual_iv() {
    assert!(approx(scale_iv_to_horizon(0.8, 525_600), 0.8, 1e-12));
    assert_eq!(scale_iv_to_horizon(0.8, 0), 0.0);
    assert_eq!(scale_iv_to_horizon(0.8, -5), 0.0);
}

#[test]
fn expected_move_over_one_year() {
    let r = expected_move(100_000.0, 0.5, 525_600, "dvol", 1.0);
    assert!(approx(r.move_points, 50_000.0, 1e-6));
    assert!(approx(r.move_bps, 5_000.0, 1e-6));
    assert!(approx(r.up_1sigma, 150_000.0, 1e-6));
    assert!(approx(r.down_1sigma, 50_000.0, 1e-6));
    assert_eq!(r.iv_source, "dvol");
    assert_eq!(r.confidence, 1.0);
    assert!(!r.is_degenerate());
}

#[test]
fn quadrupling_horizon_doubles_move() {
    let short = expected_move(50_000.0, 0.8, 60, "dvol", 1.0);
    let long = expected_move(50_000.0, 0.8, 240, "dvol", 1.0);
    assert!(approx(long.move_points, 2.0 * short.move_points, 0.02));
}

#[test]
fn degenerate_inputs_give_zero_move() {
    for r in [
        expected_move(50_000.0, 0.0, 60, "atm_iv", 0.7),
        expected_move(0.0, 0.8, 60, "atm_iv", 0.7),
        expected_move(50_000.0, 0.8, 0, "atm_iv", 0.7),
    ] {
        assert_eq!(r.move_points, 0.0);
        assert_eq!(r.move_bps, 0.0);
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.up_1sigma, r.spot);
        assert_eq!(r.down_1sigma, r.spot);
        assert!(r.is_degenerate());
    }
}

#[test]
fn expected_move_is_rounded_to_cents() {
    let r = expected_move(61_234.5678, 0.55, 60, "dvol", 1.0);
    assert_eq!(r.move_points, round_to(r.move_points, 2));
    assert_eq!(r.up_1sigma, round_to(r.up_1sigma, 2));
}

#[test]
fn days_to_expiry_never_negative() {
    let now = 1_719_561_600_000;
    assert!(approx(days_to_expiry(now + 2 * 86_400_000, now), 2.0, 1e-12));
    assert!(approx(days_to_expiry(now + 43_200_000, now), 0.5, 1e-12));
    assert_eq!(days_to_expiry(now - 1, now), 0.0);
    assert_eq!(days_to_expiry(now, now), 0.0);
}

#[test]
fn dvol_is_percentage_points() {
    assert!(approx(dvol_to_decimal(80.5), 0.805, 1e-12));
}

#[test]
fn round_to_decimals() {
    assert_eq!(round_to(1.23456, 2), 1.23);
    assert_eq!(round_to(1.23556, 3), 1.236);
    assert_eq!(round_to(12_345.0, 0), 12_345.0);
}

#[test]
fn round_to_breaks_ties_to_even() {
    assert_eq!(round_to(0.125, 2), 0.12);
    assert_eq!(round_to(0.375, 2), 0.38);
    assert_eq!(round_to(-0.125, 2), -0.12);
    assert_eq!(round_to(2.5, 0), 2.0);
    assert_eq!(round_to(3.5, 0), 4.0);
}
