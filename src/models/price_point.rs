use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AnalyticsError;

// Represents a historical closing price for a given date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close_price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close_price: f64) -> Self {
        Self { date, close_price }
    }
}

/// An ordered, non-empty price history with strictly increasing dates.
///
/// The series is immutable once constructed; every derived series
/// (returns, rolling statistics) is a new value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, AnalyticsError> {
        if points.is_empty() {
            return Err(AnalyticsError::EmptyInput("price series"));
        }

        if let Some(bad) = points
            .iter()
            .find(|p| !p.close_price.is_finite() || p.close_price <= 0.0)
        {
            return Err(AnalyticsError::InvalidSeries(format!(
                "close price on {} must be a positive finite number, got {}",
                bad.date, bad.close_price
            )));
        }

        if let Some(w) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(AnalyticsError::InvalidSeries(format!(
                "dates must be strictly increasing: {} follows {}",
                w[1].date, w[0].date
            )));
        }

        Ok(Self { points })
    }

    /// Convenience constructor pairing dates with closes.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, AnalyticsError>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(date, close)| PricePoint::new(date, close))
                .collect(),
        )
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close_price).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

// A fractional return dated at the later of the two closes it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Consecutive relative differences of a `PriceSeries`.
///
/// Has exactly one fewer point than its source: the first price has no
/// predecessor and is dropped rather than null-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    pub(crate) fn from_points(points: Vec<ReturnPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pairs up returns that share a date with `other`, dropping unmatched dates.
    ///
    /// Both series are date-ordered, so a single merge walk suffices.
    pub fn inner_join(&self, other: &ReturnSeries) -> Vec<(NaiveDate, f64, f64)> {
        let mut joined = Vec::with_capacity(self.len().min(other.len()));
        let (mut i, mut j) = (0, 0);

        while i < self.points.len() && j < other.points.len() {
            let (a, b) = (&self.points[i], &other.points[j]);
            match a.date.cmp(&b.date) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    joined.push((a.date, a.value, b.value));
                    i += 1;
                    j += 1;
                }
            }
        }

        joined
    }
}
