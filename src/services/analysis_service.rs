use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info};

use crate::config::AnalysisConfig;
use crate::errors::AnalyticsError;
use crate::models::{AnalysisReport, PriceSeries};
use crate::services::{risk_service, technical_service};

/// Build the full report for one security.
///
/// # Arguments
/// * `ticker` – label carried into the report
/// * `series` – price history of the security
/// * `benchmark` – optional benchmark history for beta
/// * `config` – period label plus risk and indicator settings
pub fn analyze_security(
    ticker: &str,
    series: &PriceSeries,
    benchmark: Option<&PriceSeries>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalyticsError> {
    config.validate()?;

    info!(
        "Analyzing {} over {} ({} observations, benchmark: {})",
        ticker,
        config.period,
        series.len(),
        benchmark.is_some()
    );

    let summary = technical_service::summarize_prices(series)?;
    let risk = risk_service::compute_risk_metrics(series, benchmark, &config.risk)?;
    let technical = technical_service::compute_technical_metrics(series, &config.technical)?;

    Ok(AnalysisReport {
        ticker: ticker.to_string(),
        period: config.period.clone(),
        summary,
        risk,
        technical,
    })
}

/// Analyze many securities concurrently against a shared benchmark.
///
/// Each analysis runs on the blocking pool; results keep the input order and
/// one failing security does not affect the others.
pub async fn analyze_batch(
    securities: Vec<(String, PriceSeries)>,
    benchmark: Option<Arc<PriceSeries>>,
    config: Arc<AnalysisConfig>,
) -> Vec<(String, Result<AnalysisReport, AnalyticsError>)> {
    let tasks = securities.into_iter().map(|(ticker, series)| {
        let benchmark = benchmark.clone();
        let config = Arc::clone(&config);
        let label = ticker.clone();

        let handle = tokio::task::spawn_blocking(move || {
            analyze_security(&ticker, &series, benchmark.as_deref(), &config)
        });

        async move {
            match handle.await {
                Ok(result) => (label, result),
                Err(e) => {
                    error!("Analysis task for {} did not complete: {}", label, e);
                    (label, Err(AnalyticsError::TaskFailed(e.to_string())))
                }
            }
        }
    });

    join_all(tasks).await
}
