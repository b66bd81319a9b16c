//! Option chain and order book reports.

use crate::analytics::chain::{atm_strike, order_book_imbalance, spread_bps};
use crate::analytics::volatility::{days_to_expiry, round_to};
use crate::constants::limits::{BOOK_LEVELS, MAX_CHAIN_ROWS};
use crate::constants::rate_limits::MAX_ORDER_BOOK_DEPTH;
use crate::types::enums::Currency;
use crate::types::market_data::OrderBook;
use crate::types::option::OptionRecord;
use crate::types::report::{ChainRow, ChainSummary, OptionChainReport, OrderBookSummary, PriceLevel};

use super::{cap_notes, round_opt};

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// Window of listed strikes centred on the ATM strike: up to `per_side`
/// strikes below it, the ATM strike, and up to `per_side` above. The input
/// may be unsorted and contain duplicates; the output is ascending.
pub fn select_chain_strikes(strikes: &[f64], spot: f64, per_side: usize) -> Vec<f64> {
    let mut sorted: Vec<f64> = strikes.iter().copied().filter(|s| s.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();

    let Some(atm) = atm_strike(&sorted, spot) else {
        return Vec::new();
    };
    let atm_idx = sorted.iter().position(|s| *s == atm).unwrap_or(sorted.len() / 2);
    let start = atm_idx.saturating_sub(per_side);
    let end = (atm_idx + per_side + 1).min(sorted.len());
    sorted[start..end].to_vec()
}

impl From<&OptionRecord> for ChainRow {
    fn from(option: &OptionRecord) -> Self {
        Self {
            strike: option.strike,
            option_type: option.option_type,
            mark_iv: round_opt(option.mark_iv, 4),
            delta: round_opt(option.delta, 4),
            gamma: round_opt(option.gamma, 6),
            vega: round_opt(option.vega, 4),
            oi: round_opt(option.open_interest, 2),
            vol: round_opt(option.volume, 2),
        }
    }
}

impl OptionChainReport {
    /// Shape the records of the selected strikes of one expiry.
    ///
    /// Rows are ordered by strike, calls before puts. The average IV skips
    /// options without a positive mark IV.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        currency: Currency,
        expiry: impl Into<String>,
        expiry_ts: i64,
        spot: f64,
        now_ms: i64,
        selected_strikes: &[f64],
        options: &[OptionRecord],
        notes: Vec<String>,
    ) -> Self {
        let mut rows: Vec<ChainRow> = options.iter().map(ChainRow::from).collect();
        rows.sort_by(|a, b| {
            a.strike
                .total_cmp(&b.strike)
                .then(a.option_type.cmp(&b.option_type))
        });
        rows.truncate(MAX_CHAIN_ROWS);

        let total_oi: f64 = options.iter().filter_map(|o| o.open_interest).sum();
        let total_volume: f64 = options.iter().filter_map(|o| o.volume).sum();
        let ivs: Vec<f64> = options
            .iter()
            .filter_map(|o| o.mark_iv)
            .filter(|iv| *iv > 0.0)
            .collect();
        let avg_iv = (!ivs.is_empty()).then(|| ivs.iter().sum::<f64>() / ivs.len() as f64);

        Self {
            currency,
            expiry: expiry.into().to_ascii_uppercase(),
            expiry_ts,
            spot: round_to(spot, 2),
            atm_strike: atm_strike(selected_strikes, spot),
            days_to_expiry: round_to(days_to_expiry(expiry_ts, now_ms), 2),
            strikes: rows,
            summary: ChainSummary {
                total_oi: round_to(total_oi, 2),
                total_volume: round_to(total_volume, 2),
                avg_iv: round_opt(avg_iv, 4),
                num_strikes: selected_strikes.len(),
            },
            notes: cap_notes(notes),
        }
    }
}

// ---------------------------------------------------------------------------
// Order book
// ---------------------------------------------------------------------------

fn top_levels(levels: &[[f64; 2]]) -> Vec<PriceLevel> {
    levels
        .iter()
        .take(BOOK_LEVELS)
        .map(|[price, amount]| PriceLevel {
            price: round_to(*price, 4),
            amount: round_to(*amount, 4),
        })
        .collect()
}

impl OrderBookSummary {
    /// Summarise a book: top [`BOOK_LEVELS`] levels per side, depth summed
    /// over the first `depth` levels (at most 20), spread and imbalance.
    pub fn from_book(book: &OrderBook, depth: u32) -> Self {
        let depth = depth.min(MAX_ORDER_BOOK_DEPTH) as usize;
        let mut notes = Vec::new();

        let bid_depth: f64 = book.bids.iter().take(depth).map(|[_, q]| q).sum();
        let ask_depth: f64 = book.asks.iter().take(depth).map(|[_, q]| q).sum();

        let (spread_pts, spread) = match (book.best_bid_price, book.best_ask_price) {
            (Some(bid), Some(ask)) if bid > 0.0 && ask > 0.0 => {
                (Some(ask - bid), spread_bps(bid, ask))
            }
            _ => (None, None),
        };

        let deepest = book.bids.len().max(book.asks.len());
        if deepest > BOOK_LEVELS {
            notes.push(format!("levels_truncated_from:{deepest}"));
        }

        Self {
            instrument: book.instrument_name.clone(),
            bid: round_opt(book.best_bid_price, 4),
            ask: round_opt(book.best_ask_price, 4),
            spread_pts: round_opt(spread_pts, 4),
            spread_bps: round_opt(spread, 2),
            bids: top_levels(&book.bids),
            asks: top_levels(&book.asks),
            bid_depth: round_to(bid_depth, 4),
            ask_depth: round_to(ask_depth, 4),
            imbalance: round_opt(order_book_imbalance(bid_depth, ask_depth), 4),
            notes,
        }
    }
}
