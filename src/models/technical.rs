use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::signal::{MacdSignal, RsiSignal, Trend};

/// Indicator values at the latest observation plus the labels derived from them.
///
/// Indicators that have not yet warmed up are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalMetrics {
    pub as_of: NaiveDate,
    pub close: f64,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal_line: Option<f64>,

    /// MACD line minus signal line
    pub macd_histogram: Option<f64>,

    pub trend: Trend,
    pub macd_signal: MacdSignal,
    pub rsi_signal: RsiSignal,
}

/// Descriptive statistics of the closes over the analysed period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub observations: usize,
    pub average_close: f64,
    pub max_close: f64,
    pub min_close: f64,
}
