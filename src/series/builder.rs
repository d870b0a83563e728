use crate::core::feed_item::RawDataItem;
use crate::core::params::DEFAULT_PARAMS;
use crate::pricing::engine::PricingEngine;
use crate::series::date_index::DateIndex;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Window and lag of a generated price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Days before `today` to reconstruct.
    pub history_days: u32,
    /// Days after `today` to extrapolate.
    pub forecast_days: u32,
    /// Delay between a commodity quote and the retail price it drives.
    pub lag_days: u32,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            history_days: 15,
            forecast_days: 15,
            lag_days: 15,
        }
    }
}

impl SeriesConfig {
    /// Upper bound on the number of points a build can emit.
    pub fn max_points(&self) -> usize {
        (self.history_days as usize)
            .saturating_add(self.forecast_days as usize)
            .saturating_add(1)
    }
}

/// One point of the generated price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: NaiveDate,
    pub price: Decimal,
    /// True for dates strictly after `today`.
    pub is_forecast: bool,
}

/// Reconstructs recent retail prices and extrapolates upcoming ones.
///
/// Every point at date `d` prices the commodity quote observed at
/// `d - lag_days`. Historical points (on or before `today`) use the exchange
/// rate recorded on `d`; forecast points reuse the latest known rate since
/// no future rate is observable.
///
/// Missing samples leave holes in the series instead of failing the build,
/// so callers must accept fewer than [`SeriesConfig::max_points`] points.
pub struct ForecastSeriesBuilder;

impl ForecastSeriesBuilder {
    /// Build the series for the window `[today - history_days, today + forecast_days]`.
    pub fn build(
        feed: &[RawDataItem],
        today: NaiveDate,
        history_days: u32,
        forecast_days: u32,
        lag_days: u32,
    ) -> Vec<HistoryPoint> {
        let config = SeriesConfig {
            history_days,
            forecast_days,
            lag_days,
        };
        Self::build_with(feed, today, &config)
    }

    pub fn build_with(feed: &[RawDataItem], today: NaiveDate, config: &SeriesConfig) -> Vec<HistoryPoint> {
        if feed.is_empty() {
            log::debug!("empty feed, no series generated");
            return Vec::new();
        }
        let index = DateIndex::new(feed);
        Self::build_from_index(&index, today, config)
    }

    /// Build from an already indexed feed snapshot.
    pub fn build_from_index(index: &DateIndex, today: NaiveDate, config: &SeriesConfig) -> Vec<HistoryPoint> {
        let (latest_rate, (first, last)) = match (index.latest(), index.date_range()) {
            (Some(item), Some(range)) => (item.exchange_rate, range),
            _ => return Vec::new(),
        };

        log::debug!(
            "generating series around {} (-{}/+{} days, lag {}) from feed {}..{} ({} duplicates ignored)",
            today,
            config.history_days,
            config.forecast_days,
            config.lag_days,
            first,
            last,
            index.duplicates()
        );

        // Every emitted offset needs a lagged quote inside the feed, so only
        // offsets in [first + lag, last + lag] - today can produce a point.
        let lag_days = i64::from(config.lag_days);
        let lowest = (-i64::from(config.history_days)).max((first - today).num_days() + lag_days);
        let highest = i64::from(config.forecast_days).min((last - today).num_days() + lag_days);

        let lag = Duration::days(lag_days);
        let mut points = Vec::with_capacity(config.max_points().min(index.len()));

        for offset in lowest..=highest {
            let Some(target) = today.checked_add_signed(Duration::days(offset)) else {
                log::debug!("offset {} overflows the calendar, skipped", offset);
                continue;
            };

            let exchange_rate = if offset <= 0 {
                match index.get(target) {
                    Some(item) => item.exchange_rate,
                    None => {
                        log::debug!("no exchange rate for offset {} ({})", offset, target);
                        continue;
                    }
                }
            } else {
                latest_rate
            };

            let lagged = target
                .checked_sub_signed(lag)
                .and_then(|date| index.get(date));
            let Some(lagged) = lagged else {
                log::debug!("no lagged commodity price for offset {} ({})", offset, target);
                continue;
            };

            let params = DEFAULT_PARAMS
                .with_commodity_quote(lagged.commodity_price)
                .with_exchange_rate(exchange_rate);

            points.push(HistoryPoint {
                timestamp: target,
                price: PricingEngine::final_price(&params),
                is_forecast: offset > 0,
            });
        }

        log::info!(
            "generated {} of {} series points",
            points.len(),
            config.max_points()
        );
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()
    }

    fn days(n: i64) -> NaiveDate {
        today() + Duration::days(n)
    }

    /// One sample per day for offsets `from..=to` relative to today.
    fn continuous_feed(from: i64, to: i64) -> Vec<RawDataItem> {
        (from..=to)
            .map(|n| RawDataItem::new(days(n), dec!(750) + Decimal::from(n + 100), dec!(9.3)))
            .collect()
    }

    #[test]
    fn test_empty_feed_gives_empty_series() {
        assert!(ForecastSeriesBuilder::build(&[], today(), 15, 15, 15).is_empty());
    }

    #[test]
    fn test_full_feed_fills_window() {
        let feed = continuous_feed(-30, 0);
        let series = ForecastSeriesBuilder::build(&feed, today(), 15, 15, 15);
        assert_eq!(series.len(), 31);
        assert_eq!(series.first().unwrap().timestamp, days(-15));
        assert_eq!(series.last().unwrap().timestamp, days(15));
        assert_eq!(series.iter().filter(|p| p.is_forecast).count(), 15);
    }

    #[test]
    fn test_point_prices_lagged_quote() {
        let feed = continuous_feed(-30, 0);
        let series = ForecastSeriesBuilder::build(&feed, today(), 15, 15, 15);
        let today_point = series.iter().find(|p| p.timestamp == today()).unwrap();
        let lagged = feed.iter().find(|i| i.date == days(-15)).unwrap();
        let expected = PricingEngine::final_price(
            &DEFAULT_PARAMS
                .with_commodity_quote(lagged.commodity_price)
                .with_exchange_rate(dec!(9.3)),
        );
        assert_eq!(today_point.price, expected);
        assert!(!today_point.is_forecast);
    }

    #[test]
    fn test_forecast_uses_latest_rate() {
        let mut feed = continuous_feed(-30, 0);
        // latest sample carries a distinct rate
        feed.last_mut().unwrap().exchange_rate = dec!(10.5);
        let series = ForecastSeriesBuilder::build(&feed, today(), 0, 3, 15);
        let tomorrow = series.iter().find(|p| p.timestamp == days(1)).unwrap();
        let lagged = feed.iter().find(|i| i.date == days(-14)).unwrap();
        let expected = PricingEngine::final_price(
            &DEFAULT_PARAMS
                .with_commodity_quote(lagged.commodity_price)
                .with_exchange_rate(dec!(10.5)),
        );
        assert!(tomorrow.is_forecast);
        assert_eq!(tomorrow.price, expected);
    }

    #[test]
    fn test_gap_skips_offset() {
        let mut feed = continuous_feed(-30, 0);
        feed.retain(|i| i.date != days(-5));
        let series = ForecastSeriesBuilder::build(&feed, today(), 15, 15, 15);
        // -5 loses its rate, +10 loses its lagged quote
        assert_eq!(series.len(), 29);
        assert!(series.iter().all(|p| p.timestamp != days(-5) && p.timestamp != days(10)));
    }

    #[test]
    fn test_single_lagged_pair_emits_today_only() {
        let feed = vec![
            RawDataItem::new(days(0), dec!(780), dec!(9.3)),
            RawDataItem::new(days(-15), dec!(760), dec!(9.2)),
        ];
        let series = ForecastSeriesBuilder::build(&feed, today(), 15, 15, 15);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].timestamp, today());
        assert!(!series[0].is_forecast);
    }

    #[test]
    fn test_zero_lag_uses_same_day() {
        let feed = continuous_feed(-5, 0);
        let series = ForecastSeriesBuilder::build(&feed, today(), 5, 5, 0);
        // forecast days have no same-day quote
        assert_eq!(series.len(), 6);
        assert!(series.iter().all(|p| !p.is_forecast));
        assert!(series.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_huge_window_stays_bounded_by_feed() {
        let feed = vec![RawDataItem::new(today(), dec!(780), dec!(9.3))];
        let series = ForecastSeriesBuilder::build(&feed, today(), u32::MAX, u32::MAX, 0);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].timestamp, today());

        let lagged = ForecastSeriesBuilder::build(&continuous_feed(-30, 0), today(), u32::MAX, u32::MAX, 15);
        // history from the first date with a lagged quote, forecast up to the lag
        assert_eq!(lagged.len(), 16 + 15);
        assert_eq!(lagged.first().unwrap().timestamp, days(-15));
    }

    #[test]
    fn test_feed_far_from_today_gives_empty_series() {
        let feed = continuous_feed(-400, -300);
        assert!(ForecastSeriesBuilder::build(&feed, today(), 15, 15, 15).is_empty());
    }

    #[test]
    fn test_build_with_default_config() {
        let feed = continuous_feed(-30, 0);
        let a = ForecastSeriesBuilder::build_with(&feed, today(), &SeriesConfig::default());
        let b = ForecastSeriesBuilder::build(&feed, today(), 15, 15, 15);
        assert_eq!(a, b);
    }
}
