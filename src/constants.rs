//! Constants for the Deribit API v2 and the analytics engine.
//!
//! Contains base URLs, request limits, the numeric thresholds used by the
//! analytics functions, and the size caps applied by the report builders.
//! These are used internally by [`DeribitClient`](crate::client::DeribitClient),
//! [`crate::analytics`] and [`crate::report`], but are also exported for
//! callers that want to pass their own overrides.

// ---------------------------------------------------------------------------
// Base URLs
// ---------------------------------------------------------------------------

/// Base URL for the Deribit production API v2.
pub const API_BASE_URL: &str = "https://www.deribit.com/api/v2";

/// Base URL for the Deribit testnet API v2.
pub const TEST_API_BASE_URL: &str = "https://test.deribit.com/api/v2";

/// Per-request timeout applied by the HTTP client, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Minutes in a (365-day) year, used for horizon scaling.
pub const MINUTES_PER_YEAR: f64 = 525_600.0;

/// Days per year used for tenor-to-years conversion.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Milliseconds in a day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

// ---------------------------------------------------------------------------
// Request limits
// ---------------------------------------------------------------------------

/// Request limits of the public endpoints.
pub mod rate_limits {
    /// Maximum order book depth accepted by `public/get_order_book`.
    pub const MAX_ORDER_BOOK_DEPTH: u32 = 20;
}

// ---------------------------------------------------------------------------
// Analytics thresholds
// ---------------------------------------------------------------------------

/// Numeric thresholds used by the analytics engine.
///
/// These are heuristics carried as named values; functions that use them
/// also take an explicit override.
pub mod analytics {
    /// Contract size of Deribit BTC/ETH options (one coin per contract).
    pub const STANDARD_CONTRACT_SIZE: f64 = 1.0;
    /// Scale factor applied to raw GEX (a 1% move).
    pub const GEX_PERCENT_MOVE: f64 = 0.01;
    /// Approximate inverse normal CDF at 0.25, used for 25-delta strikes.
    pub const Z_25_DELTA: f64 = 0.675;
    /// Risk reversal magnitude below which skew is neutral.
    pub const SKEW_DIRECTION_THRESHOLD: f64 = 0.005;
    /// Short-vs-long |RR| difference that marks a steepening/flattening trend.
    pub const SKEW_TREND_THRESHOLD: f64 = 0.01;
    /// IV range under which a non-contango term structure counts as flat.
    pub const FLAT_TERM_STRUCTURE_WIDTH: f64 = 0.02;
    /// A tenor matches an expiry if the distance is below this fraction of it.
    pub const TENOR_MATCH_FRACTION: f64 = 0.5;
    /// Net GEX (in millions) beyond which dealers count as long/short gamma.
    pub const GAMMA_POSITIONING_THRESHOLD: f64 = 0.5;
    /// Cumulative OI share used for the concentration range.
    pub const OI_PEAK_PERCENTILE: f64 = 0.8;
    /// Slopes are expressed as IV change per this many days.
    pub const SLOPE_NORMALIZATION_DAYS: f64 = 30.0;
    /// Confidence attached to an ATM-IV fallback when DVOL is unavailable.
    pub const ATM_FALLBACK_CONFIDENCE: f64 = 0.7;
    /// Surface confidence below which a sparse-data note is attached.
    pub const SURFACE_MIN_CONFIDENCE: f64 = 0.5;
    /// 8-hour funding periods per year (3 × 365).
    pub const FUNDING_PERIODS_PER_YEAR: f64 = 1_095.0;
}

// ---------------------------------------------------------------------------
// Report caps
// ---------------------------------------------------------------------------

/// Size caps applied by the report builders.
pub mod limits {
    /// Maximum notes attached to any report.
    pub const MAX_NOTES: usize = 6;
    /// Maximum per-strike rows in OI and GEX reports.
    pub const MAX_STRIKES: usize = 50;
    /// Maximum top-OI strikes.
    pub const TOP_OI_STRIKES: usize = 5;
    /// Maximum top positive / negative GEX strikes.
    pub const TOP_GEX_STRIKES: usize = 3;
    /// Strikes on each side of ATM kept in a chain report.
    pub const CHAIN_STRIKES_PER_SIDE: usize = 10;
    /// Maximum rows in a chain report.
    pub const MAX_CHAIN_ROWS: usize = 100;
    /// Maximum tenors in term structure and skew reports.
    pub const MAX_TENORS: usize = 6;
    /// Order book levels kept per side.
    pub const BOOK_LEVELS: usize = 5;
    /// Expiries used by the GEX report when none are requested.
    pub const DEFAULT_GEX_EXPIRIES: usize = 3;
    /// Error messages are cut to this many characters in notes.
    pub const MAX_MESSAGE_LEN: usize = 100;
    /// Error messages are cut to this many characters in a status note.
    pub const STATUS_MESSAGE_LEN: usize = 50;
    /// Maximum tenors in a surface snapshot.
    pub const SURFACE_MAX_TENORS: usize = 4;
    /// Past funding periods kept in a funding report.
    pub const FUNDING_HISTORY_LEN: usize = 5;
    /// Maximum rows in an instrument listing.
    pub const MAX_INSTRUMENTS: usize = 50;
    /// Expiries kept when an option listing is trimmed.
    pub const INSTRUMENT_EXPIRIES: usize = 3;
}

/// Default tenors (days) for the term structure report.
pub const DEFAULT_TERM_STRUCTURE_TENORS: [u32; 5] = [7, 14, 30, 60, 90];

/// Default tenors (days) for the skew report.
pub const DEFAULT_SKEW_TENORS: [u32; 2] = [7, 30];

/// Default tenors (days) for the surface snapshot.
pub const DEFAULT_SURFACE_TENORS: [u32; 4] = [7, 14, 30, 60];

/// Length of one perpetual funding period in ms.
pub const FUNDING_PERIOD_MS: i64 = 8 * 3_600_000;
