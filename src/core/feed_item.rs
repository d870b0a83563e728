use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily sample of the market feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDataItem {
    pub date: NaiveDate,
    /// Commodity quote, USD per ton.
    pub commodity_price: Decimal,
    /// Local currency units per USD.
    pub exchange_rate: Decimal,
}

impl RawDataItem {
    pub fn new(date: NaiveDate, commodity_price: Decimal, exchange_rate: Decimal) -> Self {
        Self {
            date,
            commodity_price,
            exchange_rate,
        }
    }
}

/// Sort samples ascending by date. The sort is stable, so samples sharing a
/// date keep their relative input order.
pub fn sort_by_date(items: &[RawDataItem]) -> Vec<RawDataItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| item.date);
    sorted
}
