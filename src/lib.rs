//! # fuel-price-engine
//!
//! Regulated retail fuel price calculation and lagged price forecasting.
//!
//! Given the economic inputs of a regulated price structure, this engine
//! computes every intermediate figure and the final pump price. Given a
//! daily feed of commodity quotes and exchange rates, it reconstructs recent
//! prices and extrapolates upcoming ones using a fixed day lag.
//!
//! ## Architecture
//!
//! - **core** — Parameter and result records, feed samples, rounding
//! - **pricing** — The multi-stage pricing formula
//! - **series** — Date index, series builder, live parameters, summaries
//! - **feed** — Price feed providers: JSON file and synthetic
//! - **session** — Current params and series kept across refreshes

pub mod core;
pub mod feed;
pub mod pricing;
pub mod series;
pub mod session;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::feed_item::RawDataItem;
    pub use crate::core::params::{CalculationParams, ParamsOverride, DEFAULT_PARAMS};
    pub use crate::core::result::CalculationResult;
    pub use crate::feed::provider::{FeedError, PriceFeedProvider};
    pub use crate::pricing::engine::PricingEngine;
    pub use crate::series::builder::{ForecastSeriesBuilder, HistoryPoint, SeriesConfig};
    pub use crate::series::live::update_current_params;
    pub use crate::session::PricingSession;
}
