//! Endpoint and orchestration methods.
//!
//! Each sub-module adds `async` methods to
//! [`DeribitClient`](crate::client::DeribitClient) via `impl` blocks.
//!
//! ## Usage
//!
//! ```no_run
//! use deribit_analytics::DeribitClient;
//! use deribit_analytics::types::{Currency, Environment};
//!
//! # #[tokio::main]
//! # async fn main() -> deribit_analytics::Result<()> {
//! let client = DeribitClient::new(Environment::Prod)?;
//! let gex = client.gamma_exposure(Currency::BTC, &[]).await?;
//! let skew = client.skew_metrics(Currency::ETH, &[7, 30]).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Methods | Description |
//! |---|---|---|
//! | [`market_data`] | 9 | Time, status, index price, instruments, ticker, order book, funding, DVOL candles |
//! | [`analytics`] | 15 | Snapshot → analytics → report |

pub mod analytics;
pub mod market_data;
