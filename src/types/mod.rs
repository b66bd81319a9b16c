//! Request, response, domain and report types.
//!
//! | Module | Description |
//! |---|---|
//! | [`enums`] | Wire enums and analytics classifications |
//! | [`market_data`] | Deribit request parameters and `result` payloads |
//! | [`option`] | [`OptionRecord`](option::OptionRecord), the row the analytics consume |
//! | [`analytics`] | Results of the analytics engine |
//! | [`report`] | Size-bounded report shapes |

pub mod analytics;
pub mod enums;
pub mod market_data;
pub mod option;
pub mod report;

pub use enums::*;
