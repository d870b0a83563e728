use crate::core::feed_item::RawDataItem;
use crate::core::params::{CalculationParams, ParamsOverride, DEFAULT_PARAMS};
use crate::core::result::CalculationResult;
use crate::feed::provider::{load_raw_items, FeedError, PriceFeedProvider};
use crate::pricing::engine::PricingEngine;
use crate::series::builder::{ForecastSeriesBuilder, HistoryPoint, SeriesConfig};
use crate::series::date_index::DateIndex;
use crate::series::live::live_overrides;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Caller-facing state around the pure engine: the current parameter record
/// and the last generated series. Every change replaces the stored record;
/// results are recomputed from whichever record is current.
#[derive(Debug, Clone)]
pub struct PricingSession {
    config: SeriesConfig,
    params: CalculationParams,
    history: Vec<HistoryPoint>,
    last_error: Option<String>,
}

impl Default for PricingSession {
    fn default() -> Self {
        Self::new(SeriesConfig::default())
    }
}

impl PricingSession {
    pub fn new(config: SeriesConfig) -> Self {
        Self {
            config,
            params: DEFAULT_PARAMS,
            history: Vec::new(),
            last_error: None,
        }
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    pub fn params(&self) -> &CalculationParams {
        &self.params
    }

    pub fn history(&self) -> &[HistoryPoint] {
        &self.history
    }

    /// Message of the last failed refresh, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the current params with a copy carrying `overrides`.
    pub fn update_params(&mut self, overrides: &ParamsOverride) {
        self.params = self.params.with_overrides(overrides);
    }

    /// Engine output for the current params.
    pub fn result(&self) -> CalculationResult {
        PricingEngine::calculate(&self.params)
    }

    pub fn final_price(&self) -> Decimal {
        self.result().final_price
    }

    /// Rebuild the series from a feed snapshot and refresh the live params.
    ///
    /// An empty feed changes nothing.
    pub fn apply_feed(&mut self, feed: &[RawDataItem], today: NaiveDate) {
        if feed.is_empty() {
            log::warn!("empty feed, keeping previous series and params");
            return;
        }
        let index = DateIndex::new(feed);
        self.history = ForecastSeriesBuilder::build_from_index(&index, today, &self.config);

        match live_overrides(&index, today, self.config.lag_days) {
            Some(overrides) => self.update_params(&overrides),
            None => log::debug!("no live market data for {}, params unchanged", today),
        }
    }

    /// Fetch from `provider` and apply. A failed fetch is recorded and
    /// leaves the previous state in place.
    pub fn refresh(&mut self, provider: &dyn PriceFeedProvider, today: NaiveDate) -> Result<(), FeedError> {
        match load_raw_items(provider) {
            Ok(feed) => {
                self.last_error = None;
                self.apply_feed(&feed, today);
                Ok(())
            }
            Err(e) => {
                log::error!("failed to load price data: {}", e);
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
