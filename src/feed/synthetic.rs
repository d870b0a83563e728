use crate::feed::provider::{FeedError, PriceFeedEntry, PriceFeedProvider};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration for a synthetic feed.
#[derive(Debug, Clone)]
pub struct SyntheticFeedConfig {
    /// Last sample date.
    pub today: NaiveDate,
    /// Samples are generated for `today - days_back ..= today`.
    pub days_back: u32,
    pub oil_price_min: f64,
    pub oil_price_max: f64,
    pub exchange_rate_min: f64,
    pub exchange_rate_max: f64,
    /// Fixed seed for reproducible output; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl SyntheticFeedConfig {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            days_back: 30,
            oil_price_min: 750.0,
            oil_price_max: 800.0,
            exchange_rate_min: 9.25,
            exchange_rate_max: 9.35,
            seed: None,
        }
    }
}

/// Uniformly distributed daily samples within the configured bands.
#[derive(Debug, Clone)]
pub struct SyntheticFeed {
    config: SyntheticFeedConfig,
}

impl SyntheticFeed {
    pub fn new(config: SyntheticFeedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SyntheticFeedConfig {
        &self.config
    }

    pub fn generate(&self) -> Vec<PriceFeedEntry> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let c = &self.config;

        let entries: Vec<PriceFeedEntry> = (-i64::from(c.days_back)..=0)
            .filter_map(|offset| c.today.checked_add_signed(Duration::days(offset)))
            .map(|date| PriceFeedEntry {
                date: date.format("%Y-%m-%d").to_string(),
                oil_price: round2(sample(&mut rng, c.oil_price_min, c.oil_price_max)),
                exchange_rate: round2(sample(&mut rng, c.exchange_rate_min, c.exchange_rate_max)),
            })
            .collect();

        log::debug!(
            "synthetic feed: {} items ending {}",
            entries.len(),
            c.today
        );
        entries
    }
}

fn sample(rng: &mut StdRng, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl PriceFeedProvider for SyntheticFeed {
    fn fetch(&self) -> Result<Vec<PriceFeedEntry>, FeedError> {
        Ok(self.generate())
    }
}
