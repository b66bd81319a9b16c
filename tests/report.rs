//! Report builders: caps, rounding, classification and wire names.

use deribit_analytics::DeribitError;
use deribit_analytics::analytics::skew::skew_metrics;
use deribit_analytics::analytics::volatility::expected_move;
use deribit_analytics::constants::limits::{
    MAX_INSTRUMENTS, MAX_NOTES, MAX_STRIKES, STATUS_MESSAGE_LEN, TOP_OI_STRIKES,
};
use deribit_analytics::types::analytics::{SurfacePoint, TermStructurePoint};
use deribit_analytics::types::market_data::{
    FundingRateEntry, Instrument, OrderBook, PlatformStatus, Ticker, VolatilityIndexData,
};
use deribit_analytics::types::option::OptionRecord;
use deribit_analytics::types::report::*;
use deribit_analytics::types::{
    Currency, Environment, GammaPositioning, InstrumentKind, IvSource, SkewDirection, SkewTrend,
    TermStructureShape,
};
use serde_json::json;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn notes(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("note:{i}")).collect()
}

// ===================================================================
// Open interest
// ===================================================================

#[test]
fn open_interest_listing_is_capped_near_spot() {
    let options: Vec<OptionRecord> = (10..90)
        .flat_map(|k| {
            let strike = f64::from(k) * 1_000.0;
            [
                OptionRecord::call(strike).with_open_interest(f64::from(k)),
                OptionRecord::put(strike).with_open_interest(1.0),
            ]
        })
        .collect();

    let report = OpenInterestReport::build(Currency::BTC, "28jun24", Some(50_000.0), &options, notes(10));

    assert_eq!(report.expiry, "28JUN24");
    assert_eq!(report.oi_by_strike.len(), MAX_STRIKES);
    assert!(report.oi_by_strike.windows(2).all(|w| w[0].strike < w[1].strike));
    assert!(report.oi_by_strike.iter().any(|r| r.strike == 50_000.0));
    assert_eq!(report.oi_by_strike.first().map(|r| r.strike), Some(25_000.0));

    assert_eq!(report.top_strikes.len(), TOP_OI_STRIKES);
    assert_eq!(report.top_strikes[0].strike, 89_000.0);
    assert_eq!(report.total_put_oi, 80.0);
    assert_eq!(report.notes.len(), MAX_NOTES);
    assert!(report.peak_range.is_some());
}

#[test]
fn open_interest_without_spot_keeps_lowest_strikes() {
    let options: Vec<OptionRecord> = (1..=60)
        .map(|k| OptionRecord::call(f64::from(k) * 100.0).with_open_interest(1.0))
        .collect();

    let report = OpenInterestReport::build(Currency::ETH, "5JUL24", None, &options, Vec::new());

    assert_eq!(report.spot, 0.0);
    assert_eq!(report.oi_by_strike.len(), MAX_STRIKES);
    assert_eq!(report.oi_by_strike[0].strike, 100.0);
    assert_eq!(report.pcr_total, Some(0.0));
}

// ===================================================================
// Gamma exposure
// ===================================================================

#[test]
fn gamma_report_scales_to_millions() {
    let options = vec![
        OptionRecord::call(40_000.0).with_gamma(0.0001).with_open_interest(100.0),
        OptionRecord::put(60_000.0).with_gamma(0.0001).with_open_interest(1_000.0),
    ];

    let report = GammaExposureReport::build(
        Currency::BTC,
        50_000.0,
        vec!["28JUN24".to_string()],
        &options,
        vec!["expiries:1".to_string()],
    );

    assert!(approx(report.net_gex, 2.25));
    assert_eq!(report.market_maker_positioning, GammaPositioning::LongGamma);
    assert_eq!(report.gex_by_strike.len(), 2);
    assert!(approx(report.gex_by_strike[0].call_gex, -0.25));
    assert!(approx(report.gex_by_strike[1].put_gex, 2.5));

    let flip = report.gamma_flip.unwrap();
    assert!(40_000.0 < flip && flip < 60_000.0);

    assert_eq!(report.top_positive.len(), 1);
    assert_eq!(report.top_positive[0].strike, 60_000.0);
    assert_eq!(report.top_negative[0].strike, 40_000.0);
    assert_eq!(report.max_pos_gex_strike, Some(60_000.0));
    assert_eq!(report.notes, vec!["expiries:1".to_string()]);
}

#[test]
fn gamma_report_carries_profile_notes() {
    let report = GammaExposureReport::build(Currency::ETH, 3_000.0, Vec::new(), &[], Vec::new());
    assert_eq!(report.net_gex, 0.0);
    assert_eq!(report.market_maker_positioning, GammaPositioning::Neutral);
    assert_eq!(report.notes, vec!["no_valid_gamma_data".to_string()]);
}

// ===================================================================
// Max pain
// ===================================================================

#[test]
fn max_pain_report() {
    let options = vec![
        OptionRecord::call(45_000.0).with_open_interest(10.0),
        OptionRecord::call(50_000.0).with_open_interest(5.0),
        OptionRecord::put(50_000.0).with_open_interest(5.0),
        OptionRecord::put(55_000.0).with_open_interest(10.0),
    ];

    let report = MaxPainReport::build(Currency::BTC, "28JUN24", 1_719_561_600_000, 40_000.0, &options, Vec::new());

    assert_eq!(report.max_pain_strike, 50_000.0);
    assert_eq!(report.distance_from_spot_pct, 25.0);
    assert_eq!(report.pain_curve_top3.len(), 3);
    assert_eq!(report.pain_curve_top3[0].pain, 100_000.0);
    assert_eq!(report.pcr, Some(1.0));
}

// ===================================================================
// Volatility
// ===================================================================

#[test]
fn term_structure_report() {
    let mut points = vec![
        TermStructurePoint::new(30, Some(0.75)),
        TermStructurePoint::new(7, Some(0.80)),
    ];
    points[0].expiry_label = "26JUL24".into();
    points[1].expiry_label = "5JUL24".into();

    let report = TermStructureReport::build(Currency::BTC, 61_234.567, points, Some(55.2), Vec::new());

    assert_eq!(report.spot, 61_234.57);
    assert_eq!(report.term_structure[0].days, 7);
    assert_eq!(report.term_structure[0].expiry, "5JUL24");
    assert_eq!(report.term_structure[0].atm_iv_pct, Some(80.0));
    assert_eq!(report.slope_7d_30d, Some(-6.5217));
    assert_eq!(report.slope_30d_90d, None);
    assert_eq!(report.shape, TermStructureShape::Backwardation);
    assert_eq!(report.dvol_current, Some(55.2));
}

#[test]
fn term_structure_report_caps_tenors() {
    let points = (1..=9)
        .map(|k| TermStructurePoint::new(k * 10, Some(0.5 + f64::from(k) / 100.0)))
        .collect();
    let report = TermStructureReport::build(Currency::ETH, 3_000.0, points, None, Vec::new());
    assert_eq!(report.term_structure.len(), 6);
    assert_eq!(report.shape, TermStructureShape::Contango);
}

#[test]
fn skew_report_summary() {
    let tenors = vec![
        ("26JUL24".to_string(), skew_metrics(30, Some(0.6), Some(0.58), Some(0.60))),
        ("5JUL24".to_string(), skew_metrics(7, Some(0.6), Some(0.55), Some(0.60))),
    ];

    let report = SkewReport::build(Currency::BTC, 60_000.0, &tenors, Vec::new());

    assert_eq!(report.skew_by_tenor.len(), 2);
    assert_eq!(report.skew_by_tenor[0].days, 7);
    assert_eq!(report.skew_by_tenor[0].rr25d_pct, Some(-5.0));
    assert_eq!(report.skew_trend, Some(SkewTrend::Steepening));
    assert_eq!(report.summary.dominant_direction, Some(SkewDirection::Bearish));
    assert_eq!(report.summary.avg_rr25d_pct, Some(-3.5));
    assert_eq!(report.summary.tenors_analyzed, 2);
}

#[test]
fn skew_report_without_tenors() {
    let report = SkewReport::build(Currency::BTC, 60_000.0, &[], Vec::new());
    assert!(report.skew_by_tenor.is_empty());
    assert_eq!(report.skew_trend, None);
    assert_eq!(report.summary.dominant_direction, None);
    assert_eq!(report.summary.avg_rr25d_pct, None);
}

#[test]
fn dvol_report_from_candles() {
    let data: VolatilityIndexData = serde_json::from_value(json!({
        "data": [
            [1_719_475_200_000i64, 60.0, 61.0, 59.0, 60.0],
            [1_719_478_800_000i64, 60.0, 63.0, 60.0, 62.5]
        ],
        "continuation": null
    }))
    .unwrap();

    let report = DvolReport::from_index_data(Currency::BTC, &data, 1, Vec::new());
    assert_eq!(report.dvol, 62.5);
    assert_eq!(report.dvol_chg_24h, Some(2.5));
    assert_eq!(report.iv(), Some(0.625));

    let empty = VolatilityIndexData { data: Vec::new(), continuation: None };
    let report = DvolReport::from_index_data(Currency::ETH, &empty, 1, Vec::new());
    assert_eq!(report.dvol, 0.0);
    assert_eq!(report.iv(), None);
    assert_eq!(report.notes, vec!["dvol_unavailable".to_string()]);
}

#[test]
fn expected_move_report_serializes_source() {
    let result = expected_move(60_000.0, 0.5, 60, "atm_iv", 0.7);
    let report = ExpectedMoveReport::from_result(Currency::BTC, &result, IvSource::AtmIv, notes(8));

    assert_eq!(report.confidence, 0.7);
    assert_eq!(report.notes.len(), MAX_NOTES);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["ccy"], "BTC");
    assert_eq!(value["iv_source"], "atm_iv");
    assert_eq!(value["horizon_min"], 60);
}

// ===================================================================
// Chain & order book
// ===================================================================

#[test]
fn option_chain_report() {
    let now = 1_719_000_000_000;
    let expiry_ts = now + 2 * 86_400_000;
    let options = vec![
        OptionRecord::call(55_000.0).with_mark_iv(0.0),
        OptionRecord::put(50_000.0).with_mark_iv(0.6).with_open_interest(5.0),
        OptionRecord::call(50_000.0)
            .with_mark_iv(0.5)
            .with_open_interest(10.0)
            .with_volume(2.0)
            .with_gamma(0.000_012_345_6),
    ];

    let report = OptionChainReport::build(
        Currency::BTC,
        "28jun24",
        expiry_ts,
        51_000.0,
        now,
        &[50_000.0, 55_000.0],
        &options,
        Vec::new(),
    );

    assert_eq!(report.atm_strike, Some(50_000.0));
    assert_eq!(report.days_to_expiry, 2.0);
    let order: Vec<(f64, &str)> = report
        .strikes
        .iter()
        .map(|r| (r.strike, if r.option_type.suffix() == 'C' { "C" } else { "P" }))
        .collect();
    assert_eq!(order, vec![(50_000.0, "C"), (50_000.0, "P"), (55_000.0, "C")]);
    assert_eq!(report.strikes[0].gamma, Some(0.000_012));
    assert_eq!(report.summary.total_oi, 15.0);
    assert_eq!(report.summary.total_volume, 2.0);
    assert_eq!(report.summary.avg_iv, Some(0.55));
    assert_eq!(report.summary.num_strikes, 2);

    let row = serde_json::to_value(&report.strikes[0]).unwrap();
    assert_eq!(row["type"], "call");
}

#[test]
fn order_book_summary() {
    let book: OrderBook = serde_json::from_value(json!({
        "instrument_name": "BTC-PERPETUAL",
        "timestamp": 1_719_000_000_000i64,
        "bids": [[100.0, 1.0], [99.5, 2.0], [99.0, 3.0], [98.5, 1.0], [98.0, 1.0], [97.5, 1.0], [97.0, 1.0]],
        "asks": [[101.0, 2.0], [101.5, 1.0], [102.0, 1.0]],
        "best_bid_price": 100.0,
        "best_ask_price": 101.0,
        "mark_price": 100.4
    }))
    .unwrap();

    let summary = OrderBookSummary::from_book(&book, 20);

    assert_eq!(summary.bids.len(), 5);
    assert_eq!(summary.asks.len(), 3);
    assert_eq!(summary.bid_depth, 10.0);
    assert_eq!(summary.ask_depth, 4.0);
    assert_eq!(summary.spread_pts, Some(1.0));
    assert_eq!(summary.imbalance, Some(0.4286));
    assert_eq!(summary.notes, vec!["levels_truncated_from:7".to_string()]);

    let shallow = OrderBookSummary::from_book(&book, 2);
    assert_eq!(shallow.bid_depth, 3.0);

    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["inst"], "BTC-PERPETUAL");
    assert_eq!(value["bids"][0]["p"], 100.0);
    assert_eq!(value["bids"][0]["q"], 1.0);
}

#[test]
fn empty_book_has_no_spread() {
    let book: OrderBook = serde_json::from_value(json!({
        "instrument_name": "ETH-PERPETUAL",
        "bids": [],
        "asks": []
    }))
    .unwrap();

    let summary = OrderBookSummary::from_book(&book, 5);
    assert_eq!(summary.spread_pts, None);
    assert_eq!(summary.spread_bps, None);
    assert_eq!(summary.imbalance, None);
    assert!(summary.notes.is_empty());
}

// ===================================================================
// Surface
// ===================================================================

#[test]
fn surface_report_with_sparse_tenors() {
    let points = [
        SurfacePoint {
            target_days: 7,
            expiry_label: Some("5JUL24".to_string()),
            metrics: Some(skew_metrics(6, Some(0.5), Some(0.55), Some(0.6))),
            forward: Some(60_100.004),
            implied_rate: Some(0.0523),
        },
        SurfacePoint::unmatched(14),
        SurfacePoint::unmatched(30),
        SurfacePoint::unmatched(60),
    ];

    let report = SurfaceReport::build(Currency::BTC, 60_000.123, &points, 1_719_000_000_000, Vec::new());

    assert_eq!(report.spot, 60_000.12);
    assert_eq!(report.confidence, 0.25);
    assert_eq!(report.notes, vec!["low_confidence_sparse_data".to_string()]);

    let first = &report.tenors[0];
    assert_eq!(first.days, 6);
    assert_eq!(first.expiry.as_deref(), Some("5JUL24"));
    assert_eq!(first.rr25, Some(-0.05));
    assert_eq!(first.fly25, Some(0.075));
    assert_eq!(first.skew_dir, Some(SkewDirection::Bearish));
    assert_eq!(first.fwd, Some(60_100.0));
    assert_eq!(first.basis_pct, Some(5.23));

    let days: Vec<u32> = report.tenors[1..].iter().map(|t| t.days).collect();
    assert_eq!(days, vec![14, 30, 60]);
    assert!(report.tenors[1..].iter().all(|t| t.expiry.is_none() && t.fwd.is_none()));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["ccy"], "BTC");
    assert_eq!(json["tenors"][1]["expiry"], serde_json::Value::Null);
}

#[test]
fn surface_report_at_half_coverage_is_confident() {
    let matched = |days: u32| SurfacePoint {
        target_days: days,
        expiry_label: Some(format!("{days}D")),
        metrics: Some(skew_metrics(days, Some(0.5), None, None)),
        forward: Some(60_000.0),
        implied_rate: None,
    };
    let points = [
        matched(7),
        SurfacePoint::unmatched(14),
        matched(30),
        SurfacePoint::unmatched(60),
        matched(90),
    ];

    let report = SurfaceReport::build(Currency::ETH, 3_000.0, &points, 0, Vec::new());

    assert_eq!(report.tenors.len(), 4);
    assert_eq!(report.confidence, 0.5);
    assert!(report.notes.is_empty());
    assert_eq!(report.tenors[2].rr25, None);
    assert_eq!(report.tenors[2].basis_pct, None);
}

#[test]
fn empty_surface_has_zero_confidence() {
    let report = SurfaceReport::build(Currency::BTC, 60_000.0, &[], 0, Vec::new());
    assert!(report.tenors.is_empty());
    assert_eq!(report.confidence, 0.0);
    assert_eq!(report.notes, vec!["low_confidence_sparse_data".to_string()]);
}

// ===================================================================
// Funding, status, instruments
// ===================================================================

fn perpetual_ticker(fields: serde_json::Value) -> Ticker {
    let mut ticker = json!({ "instrument_name": "BTC-PERPETUAL", "mark_price": 60_000.0 });
    if let (Some(ticker), Some(extra)) = (ticker.as_object_mut(), fields.as_object()) {
        ticker.extend(extra.clone());
    }
    serde_json::from_value(ticker).unwrap()
}

#[test]
fn funding_report_annualizes_and_keeps_recent_history() {
    let ticker = perpetual_ticker(json!({ "current_funding": 0.00012, "funding_8h": 0.000_095 }));
    let history: Vec<FundingRateEntry> = (1..=7)
        .map(|k| FundingRateEntry {
            timestamp: k * 28_800_000,
            interest_8h: 0.000_01 * k as f64,
            interest_1h: 0.0,
            index_price: None,
        })
        .collect();

    let report = FundingReport::build(Currency::BTC, &ticker, &history, Vec::new());

    assert_eq!(report.perp, "BTC-PERPETUAL");
    assert_eq!(report.rate, 0.00012);
    assert_eq!(report.rate_annualized, Some(0.1314));
    assert_eq!(report.funding_8h, Some(0.000_095));
    assert_eq!(report.history.len(), 5);
    assert_eq!(report.history[0].ts, 3 * 28_800_000);
    assert_eq!(report.history[4].ts, 7 * 28_800_000);
    assert!(approx(report.history[4].rate, 0.000_07));
    assert!(report.notes.is_empty());
}

#[test]
fn funding_report_without_current_rate() {
    let report = FundingReport::build(Currency::BTC, &perpetual_ticker(json!({})), &[], Vec::new());

    assert_eq!(report.rate, 0.0);
    assert_eq!(report.rate_annualized, None);
    assert_eq!(report.funding_8h, None);
    assert!(report.history.is_empty());
    assert_eq!(report.notes, vec!["funding_unavailable".to_string()]);
}

#[test]
fn status_report_flags_locked_platform() {
    let locked: PlatformStatus =
        serde_json::from_value(json!({ "locked": "partial", "locked_indices": ["btc_usdc"] })).unwrap();
    let open: PlatformStatus = serde_json::from_value(json!({ "locked": "false" })).unwrap();

    let report = StatusReport::online(Environment::Test, 1_719_000_000_000, Some(&locked));
    assert!(report.api_ok);
    assert_eq!(report.notes, vec!["platform_locked".to_string()]);

    assert!(StatusReport::online(Environment::Test, 1, Some(&open)).notes.is_empty());
    assert!(StatusReport::online(Environment::Test, 1, None).notes.is_empty());
}

#[test]
fn status_report_offline() {
    let err = DeribitError::Unavailable("x".repeat(120));
    let report = StatusReport::offline(Environment::Prod, &err);

    assert!(!report.api_ok);
    assert_eq!(report.server_time_ms, 0);
    assert_eq!(report.notes[0], "error:404");
    assert_eq!(report.notes[1].chars().count(), STATUS_MESSAGE_LEN);
}

fn listed(name: &str, kind: &str, expiry_ts: i64) -> Instrument {
    serde_json::from_value(json!({
        "instrument_name": name,
        "kind": kind,
        "expiration_timestamp": expiry_ts,
        "strike": if kind == "option" { json!(50_000.0) } else { serde_json::Value::Null },
        "option_type": if kind == "option" { json!("call") } else { serde_json::Value::Null },
        "tick_size": 0.0005,
        "contract_size": 1.0
    }))
    .unwrap()
}

#[test]
fn large_option_listing_keeps_nearest_expiries() {
    let now = 1_000;
    let mut instruments: Vec<Instrument> = (0..10)
        .map(|i| listed(&format!("BTC-OLD-{i}-C"), "option", 500))
        .collect();
    // Listed farthest expiry first.
    for expiry in [5_000, 4_000, 3_000, 2_000] {
        instruments.extend((0..20).map(|i| listed(&format!("BTC-{expiry}-{i}-C"), "option", expiry)));
    }

    let report = InstrumentsReport::build(InstrumentKind::Option, &instruments, now);

    assert_eq!(report.count, 90);
    assert_eq!(report.instruments.len(), MAX_INSTRUMENTS);
    assert_eq!(
        report.notes,
        vec!["truncated_from:90".to_string(), "nearest_3_expiries".to_string()]
    );
    assert!(report.instruments[..20].iter().all(|r| r.exp_ts == 2_000));
    assert!(report.instruments[20..40].iter().all(|r| r.exp_ts == 3_000));
    assert!(report.instruments[40..].iter().all(|r| r.exp_ts == 4_000));

    let json = serde_json::to_value(&report.instruments[0]).unwrap();
    assert_eq!(json["type"], "call");
    assert_eq!(json["strike"], 50_000.0);
}

#[test]
fn large_future_listing_keeps_first_rows() {
    let instruments: Vec<Instrument> = (0..60)
        .map(|i| listed(&format!("BTC-F{i}"), "future", 10_000 + i))
        .collect();

    let report = InstrumentsReport::build(InstrumentKind::Future, &instruments, 0);

    assert_eq!(report.count, 60);
    assert_eq!(report.instruments.len(), MAX_INSTRUMENTS);
    assert_eq!(report.instruments[0].name, "BTC-F0");
    assert_eq!(report.instruments[49].name, "BTC-F49");
    assert_eq!(report.instruments[0].strike, None);
    assert_eq!(report.notes, vec!["truncated_from:60".to_string()]);
}

#[test]
fn small_listing_is_untouched() {
    let instruments = vec![
        listed("BTC-PERPETUAL", "future", 32_503_680_000_000),
        listed("BTC-28JUN24", "future", 1_719_561_600_000),
    ];

    let report = InstrumentsReport::build(InstrumentKind::Future, &instruments, 0);

    assert_eq!(report.count, 2);
    assert_eq!(report.instruments.len(), 2);
    assert!(report.notes.is_empty());
}
