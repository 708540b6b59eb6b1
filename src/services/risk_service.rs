use tracing::{debug, warn};

use crate::config::RiskConfig;
use crate::errors::AnalyticsError;
use crate::models::risk::RiskMetrics;
use crate::models::{PriceSeries, ReturnSeries};
use crate::services::series_ops::{self, mean, sample_covariance, sample_std, sample_variance};

/// Compute risk metrics for a price series, with beta measured against an
/// optional benchmark.
///
/// # Arguments
/// * `series` – price history of the security
/// * `benchmark` – price history of the benchmark index; aligned to `series` by date
/// * `config` – risk-free rate, downside target and annualization constant
///
/// # Returns
/// A `RiskMetrics` record. Fails only when fewer than 2 prices are supplied;
/// degenerate ratios come back as `None` fields.
pub fn compute_risk_metrics(
    series: &PriceSeries,
    benchmark: Option<&PriceSeries>,
    config: &RiskConfig,
) -> Result<RiskMetrics, AnalyticsError> {
    let returns = series_ops::returns(series)?;
    let values = returns.values();
    let days = config.trading_days_per_year as f64;

    let volatility = compute_volatility(&values, days);

    let (beta, benchmark_observations) = match benchmark {
        Some(bench) => compute_beta(&returns, bench),
        None => (None, 0),
    };

    let value_at_risk_95 = compute_var(&values, 95.0)?;
    let expected_shortfall_95 = compute_expected_shortfall(&values, value_at_risk_95);
    let max_drawdown = compute_max_drawdown(&series.closes());
    let annualized_return = values.iter().sum::<f64>() / values.len() as f64 * days;
    let sharpe = compute_sharpe(&values, config.risk_free_rate, days);
    let sortino = compute_sortino(&values, config.risk_free_rate, config.target_return, days);

    debug!(
        ?volatility,
        ?beta,
        value_at_risk_95,
        max_drawdown,
        ?sharpe,
        ?sortino,
        "Computed risk metrics over {} returns",
        values.len()
    );

    Ok(RiskMetrics {
        volatility,
        beta,
        benchmark_observations,
        value_at_risk_95,
        expected_shortfall_95,
        max_drawdown,
        annualized_return,
        sharpe,
        sortino,
    })
}

/// Annualized volatility: sample standard deviation of daily returns times sqrt(days).
pub fn compute_volatility(returns: &[f64], trading_days: f64) -> Option<f64> {
    sample_std(returns).map(|sd| sd * trading_days.sqrt())
}

/// Compute beta relative to a benchmark price series.
///
/// Returns are inner-joined on date, so holidays or gaps on either side only
/// drop the affected days. Returns `(beta, joined_observations)`.
pub fn compute_beta(returns: &ReturnSeries, benchmark: &PriceSeries) -> (Option<f64>, usize) {
    let bench_returns = match series_ops::returns(benchmark) {
        Ok(r) => r,
        Err(e) => {
            warn!("Benchmark unusable for beta: {}", e);
            return (None, 0);
        }
    };

    let joined = returns.inner_join(&bench_returns);
    let n = joined.len();
    if n < 2 {
        warn!("Only {} common return dates with benchmark, beta undefined", n);
        return (None, n);
    }

    let asset: Vec<f64> = joined.iter().map(|(_, a, _)| *a).collect();
    let bench: Vec<f64> = joined.iter().map(|(_, _, b)| *b).collect();

    let beta = match (sample_covariance(&asset, &bench), sample_variance(&bench)) {
        (Some(cov), Some(var_b)) if var_b.abs() >= f64::EPSILON => Some(cov / var_b),
        _ => {
            warn!("Benchmark variance is zero, beta undefined");
            None
        }
    };

    (beta, n)
}

/// Historical-simulation VaR: the `confidence` complement percentile of daily returns.
///
/// At 95% confidence this is the 5th percentile, a loss threshold that is
/// negative for a losing position.
pub fn compute_var(returns: &[f64], confidence: f64) -> Result<f64, AnalyticsError> {
    series_ops::percentile(returns, 100.0 - confidence)
}

/// Expected Shortfall: the average of returns at or below the VaR threshold.
fn compute_expected_shortfall(returns: &[f64], var: f64) -> f64 {
    let tail: Vec<f64> = returns.iter().copied().filter(|&r| r <= var).collect();
    // The minimum return is always at or below any percentile, so the tail is never empty
    // unless the input holds NaN.
    mean(&tail).unwrap_or(var)
}

/// Maximum peak-to-trough decline relative to the running peak, always <= 0.
pub fn compute_max_drawdown(prices: &[f64]) -> f64 {
    series_ops::cumulative_max(prices)
        .iter()
        .zip(prices.iter())
        .map(|(&peak, &price)| (price - peak) / peak)
        .fold(0.0_f64, f64::min)
}

fn excess_returns(returns: &[f64], risk_free_rate: f64, trading_days: f64) -> Vec<f64> {
    let risk_free_daily = risk_free_rate / trading_days;
    returns.iter().map(|r| r - risk_free_daily).collect()
}

/// Annualized Sharpe ratio: sqrt(days) * mean(excess) / std(excess).
///
/// `None` when the excess returns have no dispersion.
pub fn compute_sharpe(returns: &[f64], risk_free_rate: f64, trading_days: f64) -> Option<f64> {
    let excess = excess_returns(returns, risk_free_rate, trading_days);
    let mean_excess = mean(&excess)?;
    let sd = sample_std(&excess)?;

    if sd.abs() < f64::EPSILON {
        warn!("Excess returns have zero dispersion, Sharpe undefined");
        return None;
    }

    Some(trading_days.sqrt() * mean_excess / sd)
}

/// Annualized Sortino ratio: the Sharpe numerator over the downside deviation,
/// i.e. the root-mean-square of excess returns below `target_return`.
///
/// `None` when no excess return falls below the target. A flat price series,
/// whose returns are all zero, is undefined as well.
pub fn compute_sortino(
    returns: &[f64],
    risk_free_rate: f64,
    target_return: f64,
    trading_days: f64,
) -> Option<f64> {
    let excess = excess_returns(returns, risk_free_rate, trading_days);
    let mean_excess = mean(&excess)?;

    if returns.iter().all(|&r| r == 0.0) {
        warn!("Prices never moved, Sortino undefined");
        return None;
    }

    let downside: Vec<f64> = excess
        .iter()
        .copied()
        .filter(|&r| r < target_return)
        .collect();

    if downside.is_empty() {
        warn!("No excess return below target {}, Sortino undefined", target_return);
        return None;
    }

    let downside_deviation = (downside.iter().map(|r| r * r).sum::<f64>() / downside.len() as f64).sqrt();
    if downside_deviation < f64::EPSILON {
        return None;
    }

    Some(trading_days.sqrt() * mean_excess / downside_deviation)
}
