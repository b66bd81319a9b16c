//! # deribit-analytics
//!
//! Options analytics over the public [Deribit API v2](https://docs.deribit.com/):
//! expected move, 25-delta skew, IV term structure, gamma exposure, max pain
//! and open interest distribution.
//!
//! The crate has two layers:
//!
//! - [`analytics`]: pure, synchronous functions over option-chain snapshots
//!   ([`OptionRecord`](types::option::OptionRecord) slices). No I/O.
//! - [`DeribitClient`]: an async JSON-RPC client whose orchestration
//!   methods fetch a snapshot, run the analytics and return a report from
//!   [`types::report`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use deribit_analytics::DeribitClient;
//! use deribit_analytics::types::{Currency, Environment, IvSource};
//!
//! #[tokio::main]
//! async fn main() -> deribit_analytics::Result<()> {
//!     let client = DeribitClient::new(Environment::Prod)?;
//!     let em = client.expected_move_iv(Currency::BTC, 60, IvSource::Dvol).await?;
//!     println!("1h 1σ move: {} pts", em.move_1s_pts);
//!     Ok(())
//! }
//! ```
//!
//! The analytics can also be used on their own:
//!
//! ```
//! use deribit_analytics::analytics::max_pain;
//! use deribit_analytics::types::option::OptionRecord;
//!
//! let chain = vec![
//!     OptionRecord::call(50_000.0).with_open_interest(100.0),
//!     OptionRecord::put(50_000.0).with_open_interest(100.0),
//! ];
//! assert_eq!(max_pain(&chain, 50_000.0).max_pain_strike, 50_000.0);
//! ```

pub mod analytics;
pub mod api;
pub mod client;
pub mod constants;
pub mod error;
pub mod report;
pub mod types;

/// Re-export the main client type at crate root for convenience.
pub use client::DeribitClient;
/// Re-export the error type and Result alias.
pub use error::{DeribitError, Result};
