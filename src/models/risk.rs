use serde::{Deserialize, Serialize};

/// Risk metrics for a single security.
///
/// All values are fractions (e.g. 0.105 for 10.5%), not percentages.
/// `None` marks a result that is undefined for the given input, typically a
/// zero denominator on a flat or one-directional series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Sample standard deviation of daily returns scaled by sqrt(trading days).
    /// Undefined with a single return.
    pub volatility: Option<f64>,

    /// Covariance with the benchmark over benchmark variance, on date-aligned returns.
    /// Undefined without a benchmark, with fewer than 2 aligned dates, or a flat benchmark.
    pub beta: Option<f64>,

    /// Number of return dates shared by the asset and benchmark
    pub benchmark_observations: usize,

    /// 5th percentile of daily returns (1-day horizon), usually negative
    pub value_at_risk_95: f64,

    /// Mean of the daily returns at or below `value_at_risk_95`
    pub expected_shortfall_95: f64,

    /// Worst peak-to-trough decline, always <= 0
    pub max_drawdown: f64,

    /// Mean daily return extrapolated to one year
    pub annualized_return: f64,

    /// Annualized Sharpe ratio on excess daily returns
    pub sharpe: Option<f64>,

    /// Annualized Sortino ratio; undefined when nothing falls below the target return
    pub sortino: Option<f64>,
}
