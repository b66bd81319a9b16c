//! Market data endpoints: server time, platform status, index price,
//! instruments, ticker, order book, funding history and DVOL candles.

use crate::client::DeribitClient;
use crate::constants::rate_limits::MAX_ORDER_BOOK_DEPTH;
use crate::error::Result;
use crate::types::enums::{Currency, InstrumentKind};
use crate::types::market_data::*;

impl DeribitClient {
    /// Current server time in ms since the epoch.
    ///
    /// **Method:** `public/get_time`
    pub async fn get_time(&self) -> Result<i64> {
        self.call_public("public/get_time", &()).await
    }

    /// Platform lock state.
    ///
    /// **Method:** `public/status`
    pub async fn get_status(&self) -> Result<PlatformStatus> {
        self.call_public("public/status", &()).await
    }

    /// Index price of a currency's USD index (used as spot).
    ///
    /// **Method:** `public/get_index_price`
    pub async fn get_index_price(&self, currency: Currency) -> Result<IndexPrice> {
        let req = IndexPriceRequest {
            index_name: currency.index_name().to_owned(),
        };
        self.call_public("public/get_index_price", &req).await
    }

    /// Instrument definitions matching a filter.
    ///
    /// **Method:** `public/get_instruments`
    pub async fn get_instruments(&self, req: &InstrumentsRequest) -> Result<Vec<Instrument>> {
        self.call_public("public/get_instruments", req).await
    }

    /// All non-expired options on `currency`'s own inverse market.
    pub async fn get_option_instruments(&self, currency: Currency) -> Result<Vec<Instrument>> {
        let req = InstrumentsRequest {
            currency: currency.as_str().to_owned(),
            kind: InstrumentKind::Option,
            expired: false,
        };
        let mut instruments = self.get_instruments(&req).await?;
        instruments.retain(|i| i.is_underlying(currency));
        Ok(instruments)
    }

    /// Ticker of one instrument, including greeks and open interest for
    /// options.
    ///
    /// **Method:** `public/ticker`
    pub async fn ticker(&self, instrument_name: &str) -> Result<Ticker> {
        let req = TickerRequest {
            instrument_name: instrument_name.to_owned(),
        };
        self.call_public("public/ticker", &req).await
    }

    /// Order book snapshot. `depth` is capped at 20.
    ///
    /// **Method:** `public/get_order_book`
    pub async fn get_order_book(&self, instrument_name: &str, depth: u32) -> Result<OrderBook> {
        let req = OrderBookRequest {
            instrument_name: instrument_name.to_owned(),
            depth: depth.clamp(1, MAX_ORDER_BOOK_DEPTH),
        };
        self.call_public("public/get_order_book", &req).await
    }

    /// Funding rate entries of a perpetual over a time window.
    ///
    /// **Method:** `public/get_funding_rate_history`
    pub async fn get_funding_rate_history(
        &self,
        req: &FundingRateHistoryRequest,
    ) -> Result<Vec<FundingRateEntry>> {
        self.call_public("public/get_funding_rate_history", req).await
    }

    /// DVOL candles over a time window.
    ///
    /// **Method:** `public/get_volatility_index_data`
    pub async fn get_volatility_index_data(
        &self,
        req: &VolatilityIndexRequest,
    ) -> Result<VolatilityIndexData> {
        self.call_public("public/get_volatility_index_data", req).await
    }
}
