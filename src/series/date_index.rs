use crate::core::feed_item::{sort_by_date, RawDataItem};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Calendar-day lookup over a feed snapshot.
///
/// Built from a feed sorted ascending by date. When several samples share a
/// date, the first one in sort order is the one returned by [`get`].
///
/// [`get`]: DateIndex::get
#[derive(Debug, Clone, Default)]
pub struct DateIndex {
    by_date: HashMap<NaiveDate, RawDataItem>,
    latest: Option<RawDataItem>,
    duplicates: usize,
}

impl DateIndex {
    /// Sort `feed` and index it by date. The input is not modified.
    pub fn new(feed: &[RawDataItem]) -> Self {
        let sorted = sort_by_date(feed);
        let mut by_date = HashMap::with_capacity(sorted.len());
        let mut duplicates = 0;

        for item in &sorted {
            if by_date.contains_key(&item.date) {
                duplicates += 1;
                continue;
            }
            by_date.insert(item.date, *item);
        }

        if duplicates > 0 {
            log::warn!("feed has {} duplicate-date samples; keeping the first per day", duplicates);
        }

        Self {
            by_date,
            latest: sorted.last().copied(),
            duplicates,
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&RawDataItem> {
        self.by_date.get(&date)
    }

    /// The last sample after sorting (chronologically latest).
    pub fn latest(&self) -> Option<&RawDataItem> {
        self.latest.as_ref()
    }

    /// Number of distinct dates.
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    /// Samples ignored because an earlier one had the same date.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Earliest and latest indexed dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.by_date.keys().min()?;
        let last = self.by_date.keys().max()?;
        Some((*first, *last))
    }
}
