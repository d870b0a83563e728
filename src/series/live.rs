use crate::core::feed_item::RawDataItem;
use crate::core::params::{CalculationParams, ParamsOverride};
use crate::series::date_index::DateIndex;
use chrono::{Duration, NaiveDate};

/// Market override for `today`: the commodity quote observed `lag_days`
/// earlier and today's exchange rate. `None` unless both samples exist.
pub fn live_overrides(index: &DateIndex, today: NaiveDate, lag_days: u32) -> Option<ParamsOverride> {
    let lagged_date = today.checked_sub_signed(Duration::days(i64::from(lag_days)))?;
    let lagged = index.get(lagged_date)?;
    let current = index.get(today)?;
    Some(ParamsOverride::market(lagged.commodity_price, current.exchange_rate))
}

/// Refresh `current` from the feed. Returns `current` unchanged when either
/// sample is missing; never applies a partial update.
pub fn update_current_params(
    feed: &[RawDataItem],
    today: NaiveDate,
    lag_days: u32,
    current: &CalculationParams,
) -> CalculationParams {
    let index = DateIndex::new(feed);
    match live_overrides(&index, today, lag_days) {
        Some(overrides) => current.with_overrides(&overrides),
        None => {
            log::debug!("no live market data for {} (lag {}), params unchanged", today, lag_days);
            *current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::DEFAULT_PARAMS;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    #[test]
    fn test_update_uses_lagged_quote_and_today_rate() {
        let feed = vec![
            RawDataItem::new(today(), dec!(790), dec!(9.34)),
            RawDataItem::new(today() - Duration::days(15), dec!(765), dec!(9.27)),
        ];
        let current = DEFAULT_PARAMS.with_overrides(&ParamsOverride {
            retail_margin: Some(dec!(30)),
            ..Default::default()
        });
        let updated = update_current_params(&feed, today(), 15, &current);
        assert_eq!(updated.commodity_quote, dec!(765));
        assert_eq!(updated.exchange_rate, dec!(9.34));
        // unrelated edits survive
        assert_eq!(updated.retail_margin, dec!(30));
    }

    #[test]
    fn test_missing_today_leaves_params_unchanged() {
        let feed = vec![RawDataItem::new(today() - Duration::days(15), dec!(765), dec!(9.27))];
        let current = DEFAULT_PARAMS.with_commodity_quote(dec!(1));
        assert_eq!(update_current_params(&feed, today(), 15, &current), current);
    }

    #[test]
    fn test_missing_lagged_leaves_params_unchanged() {
        let feed = vec![RawDataItem::new(today(), dec!(790), dec!(9.34))];
        assert_eq!(
            update_current_params(&feed, today(), 15, &DEFAULT_PARAMS),
            DEFAULT_PARAMS
        );
    }

    #[test]
    fn test_zero_lag_reads_one_sample() {
        let feed = vec![RawDataItem::new(today(), dec!(790), dec!(9.34))];
        let ov = live_overrides(&DateIndex::new(&feed), today(), 0).unwrap();
        assert_eq!(ov, ParamsOverride::market(dec!(790), dec!(9.34)));
    }
}
