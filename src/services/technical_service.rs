use tracing::debug;

use crate::config::TechnicalConfig;
use crate::errors::AnalyticsError;
use crate::models::{PriceSeries, PriceSummary, TechnicalMetrics};
use crate::services::indicators;
use crate::services::signal_classifier;

/// Compute moving averages, RSI and MACD over the whole series and report
/// the values at the latest observation together with their signal labels.
pub fn compute_technical_metrics(
    series: &PriceSeries,
    config: &TechnicalConfig,
) -> Result<TechnicalMetrics, AnalyticsError> {
    let latest = *series
        .latest()
        .ok_or(AnalyticsError::insufficient("technical analysis", 1, 0))?;
    let closes = series.closes();
    let last = closes.len() - 1;

    let sma_short = indicators::sma(&closes, config.sma_short)[last];
    let sma_long = indicators::sma(&closes, config.sma_long)[last];
    let rsi = indicators::rsi(&closes, config.rsi_period)[last];
    let (macd_line, signal_line, histogram) = indicators::macd(
        &closes,
        config.macd_short,
        config.macd_long,
        config.macd_signal,
    );
    let (macd, macd_signal_line, macd_histogram) = (macd_line[last], signal_line[last], histogram[last]);

    let trend = signal_classifier::trend(latest.close_price, sma_short, sma_long);
    let macd_signal = signal_classifier::macd_signal(macd, macd_signal_line);
    let rsi_signal = signal_classifier::rsi_signal(rsi);

    debug!(
        as_of = %latest.date,
        ?sma_short,
        ?sma_long,
        ?rsi,
        ?macd,
        %trend,
        %macd_signal,
        %rsi_signal,
        "Computed technical indicators"
    );

    Ok(TechnicalMetrics {
        as_of: latest.date,
        close: latest.close_price,
        sma_short,
        sma_long,
        rsi,
        macd,
        macd_signal_line,
        macd_histogram,
        trend,
        macd_signal,
        rsi_signal,
    })
}

/// Average, highest and lowest close across the whole series.
pub fn summarize_prices(series: &PriceSeries) -> Result<PriceSummary, AnalyticsError> {
    let (first, latest) = match (series.first(), series.latest()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(AnalyticsError::EmptyInput("price summary")),
    };
    let closes = series.closes();

    Ok(PriceSummary {
        start: first.date,
        end: latest.date,
        observations: closes.len(),
        average_close: closes.iter().sum::<f64>() / closes.len() as f64,
        max_close: closes.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        min_close: closes.iter().copied().fold(f64::INFINITY, f64::min),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MacdSignal, RsiSignal, Trend};
    use chrono::NaiveDate;

    fn create_test_series(prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        PriceSeries::from_pairs(
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| (start + chrono::Duration::days(i as i64), p)),
        )
        .unwrap()
    }

    #[test]
    fn test_short_series_leaves_indicators_undefined() {
        let series = create_test_series(&[100.0, 101.0, 102.0]);
        let metrics = compute_technical_metrics(&series, &TechnicalConfig::default()).unwrap();

        assert_eq!(metrics.close, 102.0);
        assert_eq!(metrics.sma_short, None);
        assert_eq!(metrics.sma_long, None);
        assert_eq!(metrics.rsi, None);
        assert_eq!(metrics.macd, None);
        assert_eq!(metrics.trend, Trend::Neutral);
        assert_eq!(metrics.macd_signal, MacdSignal::Bearish);
        assert_eq!(metrics.rsi_signal, RsiSignal::Neutral);
    }

    #[test]
    fn test_linear_uptrend_is_bullish() {
        let prices: Vec<f64> = (0..300).map(|i| 100.0 + i as f64).collect();
        let series = create_test_series(&prices);
        let metrics = compute_technical_metrics(&series, &TechnicalConfig::default()).unwrap();

        // trailing mean of 100 + 250..=299 and 100 + 100..=299
        assert!((metrics.sma_short.unwrap() - 374.5).abs() < 1e-9);
        assert!((metrics.sma_long.unwrap() - 299.5).abs() < 1e-9);
        assert_eq!(metrics.rsi, Some(100.0));
        assert_eq!(metrics.trend, Trend::Bullish);
        assert_eq!(metrics.rsi_signal, RsiSignal::Overbought);
        assert!(metrics.macd.unwrap() > 0.0);
    }

    #[test]
    fn test_summarize_prices() {
        let series = create_test_series(&[100.0, 104.0, 96.0, 100.0]);
        let summary = summarize_prices(&series).unwrap();

        assert_eq!(summary.observations, 4);
        assert_eq!(summary.average_close, 100.0);
        assert_eq!(summary.max_close, 104.0);
        assert_eq!(summary.min_close, 96.0);
        assert_eq!(summary.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(summary.end, NaiveDate::from_ymd_opt(2023, 1, 4).unwrap());
    }
}
