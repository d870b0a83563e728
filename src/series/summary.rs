use crate::series::builder::HistoryPoint;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate view of a generated series, split at `today`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub historical_points: usize,
    pub forecast_points: usize,
    /// Most recent non-forecast point.
    pub current: Option<HistoryPoint>,
    /// Furthest forecast point.
    pub horizon: Option<HistoryPoint>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl SeriesSummary {
    /// Summarize points ordered ascending by date, as produced by the builder.
    pub fn from_points(points: &[HistoryPoint]) -> Self {
        let historical_points = points.iter().filter(|p| !p.is_forecast).count();
        Self {
            historical_points,
            forecast_points: points.len() - historical_points,
            current: points.iter().rev().find(|p| !p.is_forecast).copied(),
            horizon: points.iter().rev().find(|p| p.is_forecast).copied(),
            min_price: points.iter().map(|p| p.price).min(),
            max_price: points.iter().map(|p| p.price).max(),
        }
    }

    /// Expected change from the current price to the forecast horizon.
    pub fn forecast_change(&self) -> Option<Decimal> {
        Some(self.horizon?.price - self.current?.price)
    }

    /// First and last dates covered.
    pub fn span(points: &[HistoryPoint]) -> Option<(NaiveDate, NaiveDate)> {
        Some((points.first()?.timestamp, points.last()?.timestamp))
    }
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Series Summary ===")?;
        writeln!(f, "Historical points: {}", self.historical_points)?;
        writeln!(f, "Forecast points:   {}", self.forecast_points)?;
        if let Some(current) = &self.current {
            writeln!(f, "Current price:     {} ({})", current.price, current.timestamp)?;
        }
        if let Some(horizon) = &self.horizon {
            writeln!(f, "Horizon price:     {} ({})", horizon.price, horizon.timestamp)?;
        }
        if let Some(change) = self.forecast_change() {
            writeln!(f, "Forecast change:   {}", change)?;
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            writeln!(f, "Range:             {} .. {}", min, max)?;
        }
        Ok(())
    }
}
