//! Orchestration methods: fetch a snapshot, run the analytics engine and
//! shape the result into a report.
//!
//! Spot comes from the currency's USD index. Chains are gathered one ticker
//! per instrument; a ticker that fails is logged, skipped and leaves a note
//! on the report instead of failing the whole call.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, warn};

use crate::analytics::chain::{
    atm_strike, format_expiry_label, forward_price, implied_rate_from_futures, nearest_strike,
    normalize_iv, option_instrument_name, select_expiry_for_tenor,
};
use crate::analytics::skew::{self, estimate_25d_strike};
use crate::analytics::volatility::{days_to_expiry, expected_move};
use crate::client::DeribitClient;
use crate::constants::analytics::ATM_FALLBACK_CONFIDENCE;
use crate::constants::limits::{
    CHAIN_STRIKES_PER_SIDE, DEFAULT_GEX_EXPIRIES, FUNDING_HISTORY_LEN, MAX_TENORS,
    SURFACE_MAX_TENORS,
};
use crate::constants::{
    DAYS_PER_YEAR, DEFAULT_SKEW_TENORS, DEFAULT_SURFACE_TENORS, DEFAULT_TERM_STRUCTURE_TENORS,
    FUNDING_PERIOD_MS,
};
use crate::error::{DeribitError, Result};
use crate::report::chain::select_chain_strikes;
use crate::types::analytics::{SurfacePoint, TermStructurePoint};
use crate::types::enums::{Currency, InstrumentKind, IvSource, OptionType};
use crate::types::market_data::{
    FundingRateHistoryRequest, Instrument, InstrumentsRequest, VolatilityIndexRequest,
};
use crate::types::option::OptionRecord;
use crate::types::report::{
    DvolReport, ExpectedMoveReport, FundingReport, GammaExposureReport, InstrumentsReport,
    MaxPainReport, OpenInterestReport, OptionChainReport, OrderBookSummary, SkewReport,
    StatusReport, SurfaceReport, TermStructureReport,
};

const ONE_DAY_MS: i64 = 86_400_000;

/// Hourly DVOL candles, so the first candle of a 24h window is ~24h old.
const DVOL_RESOLUTION: &str = "3600";

/// Characters of an instrument name kept in a `ticker_error` note.
const NOTE_NAME_LEN: usize = 20;

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Live options keyed by expiry timestamp, ascending.
fn group_by_expiry(instruments: Vec<Instrument>, now_ms: i64) -> BTreeMap<i64, Vec<Instrument>> {
    let mut groups: BTreeMap<i64, Vec<Instrument>> = BTreeMap::new();
    for inst in instruments {
        if inst.expiration_timestamp <= now_ms
            || inst.strike.is_none()
            || inst.option_type.is_none()
        {
            continue;
        }
        groups.entry(inst.expiration_timestamp).or_default().push(inst);
    }
    groups
}

/// Expiry label of a group, preferring the exchange's own spelling.
fn group_label(expiry_ts: i64, instruments: &[Instrument]) -> String {
    instruments
        .first()
        .and_then(Instrument::expiry_label)
        .unwrap_or_else(|| format_expiry_label(expiry_ts))
}

fn listed_strikes(instruments: &[Instrument]) -> Vec<f64> {
    instruments
        .iter()
        .filter_map(|i| i.strike)
        .filter(|s| *s > 0.0)
        .collect()
}

/// Name of the listed option at `strike`, or the conventional name when it
/// is not in the list.
fn instrument_name_for(
    currency: Currency,
    expiry_ts: i64,
    instruments: &[Instrument],
    strike: f64,
    option_type: OptionType,
) -> String {
    instruments
        .iter()
        .find(|i| i.strike == Some(strike) && i.option_type == Some(option_type))
        .map(|i| i.instrument_name.clone())
        .unwrap_or_else(|| {
            option_instrument_name(currency, &format_expiry_label(expiry_ts), strike, option_type)
        })
}

fn has_open_interest(record: &OptionRecord) -> bool {
    record.open_interest.is_some_and(|oi| oi > 0.0)
}

/// ATM call of one expiry and its mark IV.
struct AtmQuote {
    instrument_name: String,
    iv: Option<f64>,
}

impl DeribitClient {
    // -----------------------------------------------------------------------
    // Snapshot helpers
    // -----------------------------------------------------------------------

    /// Positive index price, or [`DeribitError::Unavailable`].
    pub async fn spot_price(&self, currency: Currency) -> Result<f64> {
        let price = self.get_index_price(currency).await?.index_price;
        if price > 0.0 {
            Ok(price)
        } else {
            Err(DeribitError::Unavailable(format!(
                "spot price unavailable for {currency}"
            )))
        }
    }

    /// Options of one expiry label, or [`DeribitError::Unavailable`] when
    /// none are listed.
    async fn expiry_instruments(&self, currency: Currency, label: &str) -> Result<Vec<Instrument>> {
        let matching: Vec<Instrument> = self
            .get_option_instruments(currency)
            .await?
            .into_iter()
            .filter(|i| i.strike.is_some() && i.option_type.is_some())
            .filter(|i| i.expiry_label().as_deref() == Some(label))
            .collect();

        if matching.is_empty() {
            return Err(DeribitError::Unavailable(format!(
                "no options found for expiry: {label}"
            )));
        }
        Ok(matching)
    }

    /// Fetch one ticker per instrument and build option records.
    ///
    /// Failed tickers are skipped with a warning and a `ticker_error` note.
    pub async fn option_records(
        &self,
        instruments: &[Instrument],
        notes: &mut Vec<String>,
    ) -> Vec<OptionRecord> {
        let mut records = Vec::with_capacity(instruments.len());
        for inst in instruments {
            match self.ticker(&inst.instrument_name).await {
                Ok(ticker) => records.extend(OptionRecord::from_ticker(inst, &ticker)),
                Err(err) => {
                    warn!(
                        instrument = %inst.instrument_name,
                        error = %err,
                        "ticker fetch failed, skipping"
                    );
                    let short: String = inst.instrument_name.chars().take(NOTE_NAME_LEN).collect();
                    notes.push(format!("ticker_error:{short}"));
                }
            }
        }
        records
    }

    async fn atm_quote(
        &self,
        currency: Currency,
        expiry_ts: i64,
        instruments: &[Instrument],
        spot: f64,
    ) -> Result<Option<AtmQuote>> {
        let Some(strike) = atm_strike(&listed_strikes(instruments), spot) else {
            return Ok(None);
        };
        let instrument_name =
            instrument_name_for(currency, expiry_ts, instruments, strike, OptionType::Call);
        let iv = self.mark_iv(&instrument_name).await?;
        Ok(Some(AtmQuote {
            instrument_name,
            iv,
        }))
    }

    /// Positive decimal mark IV of an instrument.
    async fn mark_iv(&self, instrument_name: &str) -> Result<Option<f64>> {
        let ticker = self.ticker(instrument_name).await?;
        Ok(ticker.mark_iv.map(normalize_iv).filter(|iv| *iv > 0.0))
    }

    /// Mark IV of a wing option; fetch failures count as a missing IV.
    async fn wing_iv(
        &self,
        currency: Currency,
        expiry_ts: i64,
        instruments: &[Instrument],
        strike: Option<f64>,
        option_type: OptionType,
    ) -> Option<f64> {
        let name = instrument_name_for(currency, expiry_ts, instruments, strike?, option_type);
        match self.mark_iv(&name).await {
            Ok(iv) => iv,
            Err(err) => {
                debug!(instrument = %name, error = %err, "wing ticker unavailable");
                None
            }
        }
    }

    /// ATM call IV of the nearest expiry more than a day out.
    async fn nearest_expiry_atm_iv(
        &self,
        currency: Currency,
        spot: f64,
        notes: &mut Vec<String>,
    ) -> Result<Option<f64>> {
        let now = now_ms();
        let groups = group_by_expiry(self.get_option_instruments(currency).await?, now);
        let Some((expiry_ts, instruments)) = groups
            .iter()
            .find(|(ts, _)| days_to_expiry(**ts, now) > 1.0)
        else {
            return Ok(None);
        };

        match self.atm_quote(currency, *expiry_ts, instruments, spot).await {
            Ok(Some(quote)) => {
                if quote.iv.is_some() {
                    notes.push(format!("atm_from:{}", quote.instrument_name));
                }
                Ok(quote.iv)
            }
            Ok(None) => Ok(None),
            Err(err) => {
                warn!(%currency, error = %err, "ATM ticker fetch failed");
                notes.push(format!("atm_ticker_error:{}", err.code()));
                Ok(None)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Volatility
    // -----------------------------------------------------------------------

    /// Latest DVOL and its change over the last 24 hours.
    ///
    /// Falls back to the mark of the `{CCY}_DVOL` ticker when the candle
    /// endpoint fails, and to a zero DVOL with notes when both fail.
    pub async fn dvol_snapshot(&self, currency: Currency) -> Result<DvolReport> {
        let now = now_ms();
        let req = VolatilityIndexRequest {
            currency: currency.as_str().to_owned(),
            start_timestamp: now - ONE_DAY_MS,
            end_timestamp: now,
            resolution: DVOL_RESOLUTION.to_owned(),
        };

        match self.get_volatility_index_data(&req).await {
            Ok(data) => Ok(DvolReport::from_index_data(currency, &data, now, Vec::new())),
            Err(err) => {
                warn!(%currency, error = %err, "DVOL candles unavailable, trying ticker");
                match self.ticker(&currency.dvol_instrument()).await {
                    Ok(ticker) if ticker.mark_price > 0.0 => {
                        Ok(DvolReport::from_ticker_mark(currency, ticker.mark_price, now))
                    }
                    Ok(_) => Ok(DvolReport::unavailable(
                        currency,
                        now,
                        vec!["dvol_unavailable".to_owned()],
                    )),
                    Err(err) => {
                        warn!(%currency, error = %err, "DVOL ticker unavailable");
                        Ok(DvolReport::unavailable(
                            currency,
                            now,
                            vec!["dvol_unavailable".to_owned(), "dvol_fetch_failed".to_owned()],
                        ))
                    }
                }
            }
        }
    }

    /// One-sigma expected move over `horizon_minutes`.
    ///
    /// With [`IvSource::Dvol`] the DVOL is tried first; if it is missing the
    /// ATM IV of the nearest expiry is used with a reduced confidence. A
    /// missing spot or IV gives a zero move with confidence `0`.
    pub async fn expected_move_iv(
        &self,
        currency: Currency,
        horizon_minutes: i64,
        source: IvSource,
    ) -> Result<ExpectedMoveReport> {
        let mut notes = Vec::new();

        let spot = match self.spot_price(currency).await {
            Ok(spot) => spot,
            Err(DeribitError::Unavailable(_)) => {
                notes.push("spot_unavailable".to_owned());
                let result = expected_move(0.0, 0.0, horizon_minutes, source.to_string(), 0.0);
                return Ok(ExpectedMoveReport::from_result(currency, &result, source, notes));
            }
            Err(err) => return Err(err),
        };

        let mut iv = None;
        let mut iv_source = source;
        let mut confidence = 1.0;

        if source == IvSource::Dvol {
            let dvol = self.dvol_snapshot(currency).await?;
            match dvol.iv() {
                Some(value) => {
                    iv = Some(value);
                    notes.push(format!("dvol_raw:{}", dvol.dvol));
                }
                None => {
                    notes.push("dvol_unavailable_fallback_atm".to_owned());
                    confidence = ATM_FALLBACK_CONFIDENCE;
                }
            }
        }

        if iv.is_none() {
            iv_source = IvSource::AtmIv;
            iv = self.nearest_expiry_atm_iv(currency, spot, &mut notes).await?;
        }

        let result = match iv {
            Some(iv) => expected_move(spot, iv, horizon_minutes, iv_source.to_string(), confidence),
            None => {
                notes.push("iv_unavailable_cannot_calculate".to_owned());
                expected_move(spot, 0.0, horizon_minutes, iv_source.to_string(), 0.0)
            }
        };

        debug!(%currency, horizon_minutes, move_points = result.move_points, "expected move");
        Ok(ExpectedMoveReport::from_result(currency, &result, iv_source, notes))
    }

    /// ATM IV at each requested tenor (default 7/14/30/60/90 days, at most
    /// six), with slopes and shape.
    pub async fn iv_term_structure(
        &self,
        currency: Currency,
        tenors_days: &[u32],
    ) -> Result<TermStructureReport> {
        let tenors = if tenors_days.is_empty() {
            &DEFAULT_TERM_STRUCTURE_TENORS[..]
        } else {
            tenors_days
        };
        let mut notes = Vec::new();

        let spot = self.spot_price(currency).await?;
        let dvol_current = match self.dvol_snapshot(currency).await {
            Ok(report) if report.dvol > 0.0 => Some(report.dvol),
            _ => None,
        };

        let now = now_ms();
        let groups = group_by_expiry(self.get_option_instruments(currency).await?, now);
        let expiries: Vec<i64> = groups.keys().copied().collect();

        let mut points = Vec::new();
        for &target in tenors.iter().take(MAX_TENORS) {
            let Some(expiry_ts) = select_expiry_for_tenor(&expiries, target, now) else {
                continue;
            };
            let Some(instruments) = groups.get(&expiry_ts) else {
                continue;
            };

            match self.atm_quote(currency, expiry_ts, instruments, spot).await {
                Ok(Some(quote)) => points.push(TermStructurePoint {
                    days: days_to_expiry(expiry_ts, now) as u32,
                    atm_iv: quote.iv,
                    expiry_label: group_label(expiry_ts, instruments),
                    expiry_ts,
                }),
                Ok(None) => {}
                Err(err) => {
                    warn!(%currency, tenor = target, error = %err, "ATM ticker fetch failed");
                    notes.push(format!("atm_ticker_failed:{target}d"));
                }
            }
        }

        debug!(%currency, points = points.len(), "term structure");
        Ok(TermStructureReport::build(currency, spot, points, dvol_current, notes))
    }

    /// 25-delta risk reversal and butterfly at each requested tenor (default
    /// 7/30 days, at most six).
    ///
    /// Wing strikes are estimated from ATM IV and snapped to listed strikes.
    /// Tenors without an ATM IV are skipped.
    pub async fn skew_metrics(
        &self,
        currency: Currency,
        tenors_days: &[u32],
    ) -> Result<SkewReport> {
        let tenors = if tenors_days.is_empty() {
            &DEFAULT_SKEW_TENORS[..]
        } else {
            tenors_days
        };

        let mut notes = Vec::new();

        let spot = self.spot_price(currency).await?;
        let now = now_ms();
        let groups = group_by_expiry(self.get_option_instruments(currency).await?, now);
        let expiries: Vec<i64> = groups.keys().copied().collect();

        let mut tenor_metrics = Vec::new();
        for &target in tenors.iter().take(MAX_TENORS) {
            let Some(expiry_ts) = select_expiry_for_tenor(&expiries, target, now) else {
                continue;
            };
            let Some(instruments) = groups.get(&expiry_ts) else {
                continue;
            };

            let atm_iv = match self.atm_quote(currency, expiry_ts, instruments, spot).await {
                Ok(Some(AtmQuote { iv: Some(iv), .. })) => iv,
                Ok(_) => {
                    notes.push(format!("atm_iv_missing:{target}d"));
                    continue;
                }
                Err(err) => {
                    warn!(%currency, tenor = target, error = %err, "ATM ticker fetch failed");
                    notes.push(format!("atm_ticker_failed:{target}d"));
                    continue;
                }
            };

            let days = days_to_expiry(expiry_ts, now);
            let strikes = listed_strikes(instruments);

            let call_strike = nearest_strike(
                estimate_25d_strike(spot, atm_iv, days, OptionType::Call),
                &strikes,
            );
            let put_strike = nearest_strike(
                estimate_25d_strike(spot, atm_iv, days, OptionType::Put),
                &strikes,
            );
            let call_iv = self
                .wing_iv(currency, expiry_ts, instruments, call_strike, OptionType::Call)
                .await;
            let put_iv = self
                .wing_iv(currency, expiry_ts, instruments, put_strike, OptionType::Put)
                .await;

            let metrics = skew::skew_metrics(days as u32, Some(atm_iv), call_iv, put_iv);
            tenor_metrics.push((group_label(expiry_ts, instruments), metrics));
        }

        debug!(%currency, tenors = tenor_metrics.len(), "skew metrics");
        Ok(SkewReport::build(currency, spot, &tenor_metrics, notes))
    }

    /// ATM IV, 25-delta risk reversal and butterfly, and forward at up to
    /// four tenors (default 7/14/30/60 days).
    ///
    /// Tenors with no expiry within half their length are kept as empty rows
    /// and lower the report's confidence. The forward comes from the
    /// expiry's future when one is listed, and is spot otherwise.
    pub async fn surface_snapshot(
        &self,
        currency: Currency,
        tenors_days: &[u32],
    ) -> Result<SurfaceReport> {
        let tenors = if tenors_days.is_empty() {
            &DEFAULT_SURFACE_TENORS[..]
        } else {
            tenors_days
        };
        let mut notes = Vec::new();

        let spot = self.spot_price(currency).await?;
        let now = now_ms();
        let groups = group_by_expiry(self.get_option_instruments(currency).await?, now);
        let expiries: Vec<i64> = groups.keys().copied().collect();

        let mut points = Vec::new();
        let mut forward_from_spot = false;
        for &target in tenors.iter().take(SURFACE_MAX_TENORS) {
            let matched = select_expiry_for_tenor(&expiries, target, now)
                .and_then(|ts| groups.get(&ts).map(|instruments| (ts, instruments)));
            let Some((expiry_ts, instruments)) = matched else {
                points.push(SurfacePoint::unmatched(target));
                continue;
            };

            let label = group_label(expiry_ts, instruments);
            let days = days_to_expiry(expiry_ts, now);

            let atm_iv = match self.atm_quote(currency, expiry_ts, instruments, spot).await {
                Ok(quote) => quote.and_then(|q| q.iv),
                Err(err) => {
                    warn!(%currency, tenor = target, error = %err, "ATM ticker fetch failed");
                    notes.push(format!("atm_ticker_failed:{target}d"));
                    None
                }
            };

            let (call_iv, put_iv) = match atm_iv {
                Some(iv) => {
                    let strikes = listed_strikes(instruments);
                    let call_strike = nearest_strike(
                        estimate_25d_strike(spot, iv, days, OptionType::Call),
                        &strikes,
                    );
                    let put_strike = nearest_strike(
                        estimate_25d_strike(spot, iv, days, OptionType::Put),
                        &strikes,
                    );
                    (
                        self.wing_iv(currency, expiry_ts, instruments, call_strike, OptionType::Call)
                            .await,
                        self.wing_iv(currency, expiry_ts, instruments, put_strike, OptionType::Put)
                            .await,
                    )
                }
                None => (None, None),
            };

            let years = days / DAYS_PER_YEAR;
            let future = format!("{currency}-{label}");
            let implied_rate = match self.ticker(&future).await {
                Ok(ticker) => implied_rate_from_futures(spot, ticker.mark_price, years),
                Err(err) => {
                    debug!(instrument = %future, error = %err, "no future for expiry");
                    None
                }
            };
            forward_from_spot |= implied_rate.is_none();

            points.push(SurfacePoint {
                target_days: target,
                expiry_label: Some(label),
                metrics: Some(skew::skew_metrics(days as u32, atm_iv, call_iv, put_iv)),
                forward: Some(forward_price(spot, implied_rate.unwrap_or(0.0), years)),
                implied_rate,
            });
        }
        if forward_from_spot {
            notes.push("fwd_from_spot".to_owned());
        }

        debug!(%currency, tenors = points.len(), "surface snapshot");
        Ok(SurfaceReport::build(currency, spot, &points, now, notes))
    }

    // -----------------------------------------------------------------------
    // Chain
    // -----------------------------------------------------------------------

    /// Strikes around ATM for one expiry label (e.g. `28JUN24`), with
    /// greeks, open interest and volume.
    pub async fn option_chain(
        &self,
        currency: Currency,
        expiry: &str,
    ) -> Result<OptionChainReport> {
        let label = expiry.to_ascii_uppercase();
        let mut notes = Vec::new();

        let spot = self.spot_price(currency).await?;
        let matching = self.expiry_instruments(currency, &label).await?;
        let expiry_ts = matching
            .first()
            .map(|i| i.expiration_timestamp)
            .unwrap_or_default();

        let strikes = listed_strikes(&matching);
        let selected = select_chain_strikes(&strikes, spot, CHAIN_STRIKES_PER_SIDE);

        let mut unique = strikes.clone();
        unique.sort_by(f64::total_cmp);
        unique.dedup();
        if unique.len() > 2 * CHAIN_STRIKES_PER_SIDE + 1 {
            notes.push(format!("strikes_limited:{}_of_{}", selected.len(), unique.len()));
        }

        let chosen: Vec<Instrument> = matching
            .into_iter()
            .filter(|i| i.strike.is_some_and(|s| selected.contains(&s)))
            .collect();
        let records = self.option_records(&chosen, &mut notes).await;

        Ok(OptionChainReport::build(
            currency,
            label,
            expiry_ts,
            spot,
            now_ms(),
            &selected,
            &records,
            notes,
        ))
    }

    /// Call and put open interest per strike for one expiry label.
    pub async fn open_interest_by_strike(
        &self,
        currency: Currency,
        expiry: &str,
    ) -> Result<OpenInterestReport> {
        let label = expiry.to_ascii_uppercase();
        let mut notes = Vec::new();

        let spot = Some(self.get_index_price(currency).await?.index_price).filter(|s| *s > 0.0);
        let matching = self.expiry_instruments(currency, &label).await?;

        let mut records = self.option_records(&matching, &mut notes).await;
        records.retain(has_open_interest);

        Ok(OpenInterestReport::build(currency, label, spot, &records, notes))
    }

    /// Dealer gamma exposure over the given expiry labels, or the nearest
    /// three expiries when none are given.
    pub async fn gamma_exposure(
        &self,
        currency: Currency,
        expiries: &[String],
    ) -> Result<GammaExposureReport> {
        let mut notes = Vec::new();

        let spot = self.spot_price(currency).await?;
        let groups = group_by_expiry(self.get_option_instruments(currency).await?, now_ms());
        let mut by_label: Vec<(String, Vec<Instrument>)> = groups
            .into_iter()
            .map(|(ts, instruments)| (group_label(ts, &instruments), instruments))
            .collect();

        let targets: Vec<String> = if expiries.is_empty() {
            by_label
                .iter()
                .take(DEFAULT_GEX_EXPIRIES)
                .map(|(label, _)| label.clone())
                .collect()
        } else {
            expiries.iter().map(|e| e.to_ascii_uppercase()).collect()
        };
        notes.push(format!("expiries:{}", targets.len()));

        let mut included = Vec::new();
        let mut chosen = Vec::new();
        for label in targets {
            match by_label.iter().position(|(l, _)| *l == label) {
                Some(idx) => {
                    let (_, instruments) = by_label.swap_remove(idx);
                    chosen.extend(instruments);
                    included.push(label);
                }
                None => notes.push(format!("missing_expiry:{label}")),
            }
        }

        let mut records = self.option_records(&chosen, &mut notes).await;
        records.retain(|r| r.gamma.is_some() && has_open_interest(r));
        if records.is_empty() {
            return Err(DeribitError::Unavailable(
                "no valid gamma/OI data found".to_owned(),
            ));
        }

        Ok(GammaExposureReport::build(currency, spot, included, &records, notes))
    }

    /// Max pain strike of one expiry label.
    pub async fn max_pain(&self, currency: Currency, expiry: &str) -> Result<MaxPainReport> {
        let label = expiry.to_ascii_uppercase();
        let mut notes = Vec::new();

        let spot = self.spot_price(currency).await?;
        let matching = self.expiry_instruments(currency, &label).await?;
        let expiry_ts = matching
            .first()
            .map(|i| i.expiration_timestamp)
            .unwrap_or_default();

        let mut records = self.option_records(&matching, &mut notes).await;
        records.retain(has_open_interest);
        if records.is_empty() {
            return Err(DeribitError::Unavailable(format!(
                "no valid OI data found for expiry: {label}"
            )));
        }

        Ok(MaxPainReport::build(currency, label, expiry_ts, spot, &records, notes))
    }

    // -----------------------------------------------------------------------
    // Perpetual & platform
    // -----------------------------------------------------------------------

    /// Current funding rate of the currency's perpetual and its most recent
    /// funding periods.
    ///
    /// A failed history request leaves the history empty with a
    /// `history_unavailable` note.
    pub async fn funding_snapshot(&self, currency: Currency) -> Result<FundingReport> {
        let perp = currency.perpetual_instrument();
        let mut notes = Vec::new();

        let ticker = self.ticker(&perp).await?;

        let now = now_ms();
        let req = FundingRateHistoryRequest {
            instrument_name: perp,
            start_timestamp: now - FUNDING_HISTORY_LEN as i64 * FUNDING_PERIOD_MS,
            end_timestamp: now,
        };
        let history = match self.get_funding_rate_history(&req).await {
            Ok(history) => history,
            Err(err) => {
                warn!(%currency, error = %err, "funding history unavailable");
                notes.push("history_unavailable".to_owned());
                Vec::new()
            }
        };

        Ok(FundingReport::build(currency, &ticker, &history, notes))
    }

    /// Connectivity check. Never fails: an unreachable API is reported with
    /// `api_ok = false` and the error in the notes.
    pub async fn status(&self) -> StatusReport {
        match self.get_time().await {
            Ok(server_time) => {
                let platform = match self.get_status().await {
                    Ok(platform) => Some(platform),
                    Err(err) => {
                        debug!(error = %err, "platform status unavailable");
                        None
                    }
                };
                StatusReport::online(self.environment(), server_time, platform.as_ref())
            }
            Err(err) => {
                warn!(error = %err, "API unreachable");
                StatusReport::offline(self.environment(), &err)
            }
        }
    }

    /// Compact instrument listing, trimmed to the nearest expiries for
    /// large option listings.
    pub async fn instruments_summary(
        &self,
        currency: Currency,
        kind: InstrumentKind,
        expired: bool,
    ) -> Result<InstrumentsReport> {
        let req = InstrumentsRequest {
            currency: currency.as_str().to_owned(),
            kind,
            expired,
        };
        let instruments = self.get_instruments(&req).await?;
        Ok(InstrumentsReport::build(kind, &instruments, now_ms()))
    }

    // -----------------------------------------------------------------------
    // Order book
    // -----------------------------------------------------------------------

    /// Top levels, spread and depth imbalance of one instrument's book.
    pub async fn order_book_summary(
        &self,
        instrument_name: &str,
        depth: u32,
    ) -> Result<OrderBookSummary> {
        let book = self.get_order_book(instrument_name, depth).await?;
        Ok(OrderBookSummary::from_book(&book, depth))
    }
}
