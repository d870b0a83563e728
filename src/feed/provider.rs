use crate::core::feed_item::RawDataItem;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading or decoding a price feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed feed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid date '{0}', expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),
    #[error("invalid {field} {value} on {date}")]
    InvalidNumber {
        field: &'static str,
        value: f64,
        date: String,
    },
}

/// One feed sample as delivered by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceFeedEntry {
    /// ISO-8601 calendar date or timestamp.
    pub date: String,
    pub oil_price: f64,
    pub exchange_rate: f64,
}

/// Envelope returned by the data provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceFeedResponse {
    pub items: Vec<PriceFeedEntry>,
    #[serde(default)]
    pub count: usize,
}

impl PriceFeedResponse {
    pub fn new(items: Vec<PriceFeedEntry>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

/// Source of raw daily market samples.
///
/// No ordering or uniqueness is promised; callers sort and index.
pub trait PriceFeedProvider {
    fn fetch(&self) -> Result<Vec<PriceFeedEntry>, FeedError>;
}

/// Reads a [`PriceFeedResponse`] JSON document from disk.
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    path: PathBuf,
}

impl JsonFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceFeedProvider for JsonFileFeed {
    fn fetch(&self) -> Result<Vec<PriceFeedEntry>, FeedError> {
        let content = fs::read_to_string(&self.path).map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })?;
        let response: PriceFeedResponse = serde_json::from_str(&content)?;
        if response.count != 0 && response.count != response.items.len() {
            log::warn!(
                "feed count {} does not match {} items",
                response.count,
                response.items.len()
            );
        }
        log::debug!("loaded {} feed items from {}", response.items.len(), self.path.display());
        Ok(response.items)
    }
}

/// Parse a feed date. Timestamps keep their full value for ordering; the
/// calendar date is the one written in the timestamp's own offset.
pub fn parse_feed_timestamp(raw: &str) -> Result<NaiveDateTime, FeedError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default());
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|_| FeedError::InvalidDate(raw.to_string()))
}

fn to_decimal(field: &'static str, value: f64, date: &str) -> Result<Decimal, FeedError> {
    let invalid = || FeedError::InvalidNumber {
        field,
        value,
        date: date.to_string(),
    };
    if !value.is_finite() {
        return Err(invalid());
    }
    // Shortest round-trip text keeps "9.3" as 9.3 rather than its binary expansion.
    Decimal::from_str(&value.to_string()).map_err(|_| invalid())
}

/// Decode provider entries into samples, ordered ascending by full timestamp
/// and then reduced to calendar dates.
pub fn into_raw_items(entries: &[PriceFeedEntry]) -> Result<Vec<RawDataItem>, FeedError> {
    let mut decoded = entries
        .iter()
        .map(|entry| -> Result<(NaiveDateTime, RawDataItem), FeedError> {
            let timestamp = parse_feed_timestamp(&entry.date)?;
            let commodity_price = to_decimal("oil_price", entry.oil_price, &entry.date)?;
            let exchange_rate = to_decimal("exchange_rate", entry.exchange_rate, &entry.date)?;
            Ok((timestamp, RawDataItem::new(timestamp.date(), commodity_price, exchange_rate)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    decoded.sort_by_key(|(timestamp, _)| *timestamp);
    Ok(decoded.into_iter().map(|(_, item)| item).collect())
}

/// Fetch from `provider` and decode.
pub fn load_raw_items(provider: &dyn PriceFeedProvider) -> Result<Vec<RawDataItem>, FeedError> {
    let entries = provider.fetch()?;
    into_raw_items(&entries)
}
