use serde::{Deserialize, Serialize};

use crate::models::risk::RiskMetrics;
use crate::models::technical::{PriceSummary, TechnicalMetrics};

/// Complete analytics for one security over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub period: String,
    pub summary: PriceSummary,
    pub risk: RiskMetrics,
    pub technical: TechnicalMetrics,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportSection {
    Summary,
    Risk,
    Technical,
}

/// A single cell value. Undefined results stay distinguishable from numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ReportValue {
    Number(f64),
    Undefined,
    Label(String),
}

impl From<f64> for ReportValue {
    fn from(value: f64) -> Self {
        ReportValue::Number(value)
    }
}

impl From<Option<f64>> for ReportValue {
    fn from(value: Option<f64>) -> Self {
        value.map(ReportValue::Number).unwrap_or(ReportValue::Undefined)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub section: ReportSection,
    pub label: &'static str,
    pub value: ReportValue,
}

impl AnalysisReport {
    /// Flattens the report into labelled rows for tabular rendering.
    pub fn rows(&self) -> Vec<ReportRow> {
        use ReportSection::*;

        let s = &self.summary;
        let r = &self.risk;
        let t = &self.technical;

        let row = |section: ReportSection, label: &'static str, value: ReportValue| ReportRow {
            section,
            label,
            value,
        };

        vec![
            row(Summary, "Observations", (s.observations as f64).into()),
            row(Summary, "Stock Price Avg (Period)", s.average_close.into()),
            row(Summary, "Stock Price Max (Period)", s.max_close.into()),
            row(Summary, "Stock Price Min (Period)", s.min_close.into()),
            row(Risk, "Annualized Volatility", r.volatility.into()),
            row(Risk, "Beta", r.beta.into()),
            row(Risk, "Value at Risk (95%)", r.value_at_risk_95.into()),
            row(Risk, "Expected Shortfall (95%)", r.expected_shortfall_95.into()),
            row(Risk, "Maximum Drawdown", r.max_drawdown.into()),
            row(Risk, "Annualized Return", r.annualized_return.into()),
            row(Risk, "Sharpe Ratio", r.sharpe.into()),
            row(Risk, "Sortino Ratio", r.sortino.into()),
            row(Technical, "Current Price", t.close.into()),
            row(Technical, "Short SMA", t.sma_short.into()),
            row(Technical, "Long SMA", t.sma_long.into()),
            row(Technical, "RSI", t.rsi.into()),
            row(Technical, "MACD", t.macd.into()),
            row(Technical, "MACD Signal Line", t.macd_signal_line.into()),
            row(Technical, "MACD Histogram", t.macd_histogram.into()),
            row(Technical, "Trend", ReportValue::Label(t.trend.to_string())),
            row(Technical, "MACD Signal", ReportValue::Label(t.macd_signal.to_string())),
            row(Technical, "RSI Signal", ReportValue::Label(t.rsi_signal.to_string())),
        ]
    }
}
