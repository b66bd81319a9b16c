//! Funding, status and instrument listing reports.

use crate::analytics::chain::annualize_funding;
use crate::analytics::volatility::round_to;
use crate::constants::limits::{
    FUNDING_HISTORY_LEN, INSTRUMENT_EXPIRIES, MAX_INSTRUMENTS, STATUS_MESSAGE_LEN,
};
use crate::error::DeribitError;
use crate::types::enums::{Currency, Environment, InstrumentKind};
use crate::types::market_data::{FundingRateEntry, Instrument, PlatformStatus, Ticker};
use crate::types::report::{
    FundingEntry, FundingReport, InstrumentRow, InstrumentsReport, StatusReport,
};

use super::{cap_notes, round_opt};

// ---------------------------------------------------------------------------
// Funding
// ---------------------------------------------------------------------------

impl FundingReport {
    /// Current rate from the perpetual's ticker plus the last
    /// [`FUNDING_HISTORY_LEN`] periods of `history` (oldest first).
    pub fn build(
        currency: Currency,
        ticker: &Ticker,
        history: &[FundingRateEntry],
        mut notes: Vec<String>,
    ) -> Self {
        if ticker.current_funding.is_none() {
            notes.push("funding_unavailable".to_string());
        }

        let recent = &history[history.len().saturating_sub(FUNDING_HISTORY_LEN)..];
        Self {
            currency,
            perp: ticker.instrument_name.clone(),
            rate: round_to(ticker.current_funding.unwrap_or(0.0), 8),
            rate_annualized: round_opt(ticker.current_funding.map(annualize_funding), 4),
            funding_8h: round_opt(ticker.funding_8h, 8),
            history: recent
                .iter()
                .map(|entry| FundingEntry {
                    ts: entry.timestamp,
                    rate: round_to(entry.interest_8h, 8),
                })
                .collect(),
            notes: cap_notes(notes),
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

impl StatusReport {
    /// Reachable API; `status` is `None` when `public/status` failed.
    pub fn online(env: Environment, server_time_ms: i64, status: Option<&PlatformStatus>) -> Self {
        let mut notes = Vec::new();
        if status.is_some_and(PlatformStatus::is_locked) {
            notes.push("platform_locked".to_string());
        }
        Self {
            env,
            api_ok: true,
            server_time_ms,
            notes,
        }
    }

    /// Unreachable API, with the error code and a short message.
    pub fn offline(env: Environment, err: &DeribitError) -> Self {
        Self {
            env,
            api_ok: false,
            server_time_ms: 0,
            notes: cap_notes(vec![
                format!("error:{}", err.code()),
                err.to_string().chars().take(STATUS_MESSAGE_LEN).collect(),
            ]),
        }
    }
}

// ---------------------------------------------------------------------------
// Instruments
// ---------------------------------------------------------------------------

impl From<&Instrument> for InstrumentRow {
    fn from(inst: &Instrument) -> Self {
        Self {
            name: inst.instrument_name.clone(),
            exp_ts: inst.expiration_timestamp,
            strike: inst.strike,
            option_type: inst.option_type,
            tick: inst.tick_size,
            size: inst.contract_size,
        }
    }
}

impl InstrumentsReport {
    /// Listings over [`MAX_INSTRUMENTS`] are trimmed: options to the
    /// [`INSTRUMENT_EXPIRIES`] nearest live expiries, other kinds to the
    /// first rows.
    pub fn build(kind: InstrumentKind, instruments: &[Instrument], now_ms: i64) -> Self {
        let count = instruments.len();
        let mut notes = Vec::new();

        let kept: Vec<&Instrument> = if count <= MAX_INSTRUMENTS {
            instruments.iter().collect()
        } else {
            notes.push(format!("truncated_from:{count}"));
            if kind == InstrumentKind::Option {
                let mut expiries: Vec<i64> = instruments
                    .iter()
                    .map(|i| i.expiration_timestamp)
                    .filter(|ts| *ts > now_ms)
                    .collect();
                expiries.sort_unstable();
                expiries.dedup();
                expiries.truncate(INSTRUMENT_EXPIRIES);
                notes.push(format!("nearest_{}_expiries", expiries.len()));

                // Grouped by expiry, nearest first.
                expiries
                    .iter()
                    .flat_map(|ts| instruments.iter().filter(move |i| i.expiration_timestamp == *ts))
                    .take(MAX_INSTRUMENTS)
                    .collect()
            } else {
                instruments.iter().take(MAX_INSTRUMENTS).collect()
            }
        };

        Self {
            kind,
            count,
            instruments: kept.into_iter().map(InstrumentRow::from).collect(),
            notes: cap_notes(notes),
        }
    }
}
