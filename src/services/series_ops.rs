//! Pure helpers over ordered numeric sequences.
//!
//! NaN inputs never panic: they surface as NaN in the output position that
//! depends on them.

use crate::errors::AnalyticsError;
use crate::models::{PriceSeries, ReturnPoint, ReturnSeries};

/// Simple percentage change between consecutive closes of a price series.
///
/// Each return is dated at the later close. Fails with fewer than 2 prices.
pub fn returns(series: &PriceSeries) -> Result<ReturnSeries, AnalyticsError> {
    let points = series.points();
    if points.len() < 2 {
        return Err(AnalyticsError::insufficient("returns", 2, points.len()));
    }

    let out = points
        .windows(2)
        .map(|w| ReturnPoint {
            date: w[1].date,
            value: (w[1].close_price - w[0].close_price) / w[0].close_price,
        })
        .collect();

    Ok(ReturnSeries::from_points(out))
}

/// Trailing simple moving average.
///
/// Returns a vector aligned with `values`:
/// - `None` until `window` values exist
/// - `Some(avg)` of the last `window` values afterwards
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    // Each window is summed on its own so a NaN only poisons the windows that contain it.
    let warm_up = (window - 1).min(values.len());
    std::iter::repeat(None)
        .take(warm_up)
        .chain(
            values
                .windows(window)
                .map(|w| Some(w.iter().sum::<f64>() / window as f64)),
        )
        .collect()
}

/// Exponential moving average with `alpha = 2 / (span + 1)`, without bias adjustment.
///
/// `ewm[0] = x[0]`, then `ewm[i] = alpha * x[i] + (1 - alpha) * ewm[i - 1]`.
/// A NaN input yields NaN at that position and leaves the running average untouched.
/// A zero span has no valid smoothing factor and yields all NaN.
pub fn ewm(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 {
        return vec![f64::NAN; values.len()];
    }

    let alpha = 2.0 / (span as f64 + 1.0);

    values
        .iter()
        .scan(None::<f64>, move |prev, &v| {
            if v.is_nan() {
                return Some(f64::NAN);
            }
            let next = match *prev {
                Some(p) => alpha * v + (1.0 - alpha) * p,
                None => v,
            };
            *prev = Some(next);
            Some(next)
        })
        .collect()
}

/// Running maximum. NaN positions stay NaN and do not reset the peak.
pub fn cumulative_max(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(f64::NEG_INFINITY, |peak, &v| {
            if v.is_nan() {
                return Some(f64::NAN);
            }
            if v > *peak {
                *peak = v;
            }
            Some(*peak)
        })
        .collect()
}

/// Percentile `p` (0..=100) with linear interpolation between closest ranks.
///
/// Matches the conventional sample percentile: rank `p / 100 * (n - 1)` in
/// the sorted data. Any NaN in the input gives NaN.
pub fn percentile(values: &[f64], p: f64) -> Result<f64, AnalyticsError> {
    if values.is_empty() {
        return Err(AnalyticsError::EmptyInput("percentile"));
    }
    if !(0.0..=100.0).contains(&p) {
        return Err(AnalyticsError::InvalidParameter(format!(
            "percentile must be within [0, 100], got {}",
            p
        )));
    }
    if values.iter().any(|v| v.is_nan()) {
        return Ok(f64::NAN);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample covariance (n - 1 denominator) of paired observations.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }

    let mean_x = mean(&x[..n])?;
    let mean_y = mean(&y[..n])?;

    let cov = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum::<f64>();

    Some(cov / (n as f64 - 1.0))
}

pub fn sample_variance(values: &[f64]) -> Option<f64> {
    sample_covariance(values, values)
}

pub fn sample_std(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::from_pairs(
            closes
                .iter()
                .enumerate()
                .map(|(i, &c)| (start + chrono::Duration::days(i as i64), c)),
        )
        .unwrap()
    }

    #[test]
    fn test_returns_known_values() {
        let r = returns(&series(&[100.0, 102.0, 101.0, 105.0, 107.0])).unwrap();
        let expected = [0.02, -0.009803921, 0.039603960, 0.019047619];

        assert_eq!(r.len(), 4);
        for (got, want) in r.values().iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-8, "got {}, want {}", got, want);
        }
    }

    #[test]
    fn test_returns_drop_first_point() {
        let s = series(&[100.0, 110.0]);
        let r = returns(&s).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.points()[0].date, s.points()[1].date);
    }

    #[test]
    fn test_returns_insufficient_data() {
        let err = returns(&series(&[100.0])).unwrap_err();
        assert_eq!(err, AnalyticsError::insufficient("returns", 2, 1));
    }

    #[test]
    fn test_rolling_mean_alignment() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = rolling_mean(&values, 3);

        assert_eq!(sma, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_rolling_mean_window_longer_than_series() {
        let sma = rolling_mean(&[1.0, 2.0], 5);
        assert_eq!(sma, vec![None, None]);
        assert!(rolling_mean(&[], 3).is_empty());
        assert_eq!(rolling_mean(&[1.0, 2.0], 0), vec![None, None]);
    }

    #[test]
    fn test_rolling_mean_nan_only_affects_its_windows() {
        let sma = rolling_mean(&[1.0, f64::NAN, 3.0, 4.0, 5.0], 2);

        assert_eq!(sma[0], None);
        assert!(sma[1].unwrap().is_nan());
        assert!(sma[2].unwrap().is_nan());
        assert_eq!(sma[3], Some(3.5));
        assert_eq!(sma[4], Some(4.5));
    }

    #[test]
    fn test_ewm_recurrence() {
        // span 3 => alpha 0.5
        let e = ewm(&[2.0, 4.0, 8.0], 3);
        assert_eq!(e, vec![2.0, 3.0, 5.5]);
    }

    #[test]
    fn test_ewm_nan_keeps_state() {
        let e = ewm(&[2.0, f64::NAN, 4.0], 3);
        assert_eq!(e[0], 2.0);
        assert!(e[1].is_nan());
        assert_eq!(e[2], 3.0);
    }

    #[test]
    fn test_cumulative_max_is_non_decreasing() {
        let m = cumulative_max(&[100.0, 102.0, 101.0, 105.0, 107.0]);
        assert_eq!(m, vec![100.0, 102.0, 102.0, 105.0, 107.0]);
        assert!(m.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 50.0).unwrap(), 3.0);
        assert_eq!(percentile(&values, 0.0).unwrap(), 1.0);
        assert_eq!(percentile(&values, 100.0).unwrap(), 5.0);
        // rank 0.05 * 4 = 0.2 => 1 + 0.2 * (2 - 1)
        assert!((percentile(&values, 5.0).unwrap() - 1.2).abs() < 1e-12);
        // order of input does not matter
        assert_eq!(percentile(&[5.0, 1.0, 3.0, 2.0, 4.0], 25.0).unwrap(), 2.0);
    }

    #[test]
    fn test_percentile_errors() {
        assert_eq!(
            percentile(&[], 5.0).unwrap_err(),
            AnalyticsError::EmptyInput("percentile")
        );
        assert!(matches!(
            percentile(&[1.0], 101.0),
            Err(AnalyticsError::InvalidParameter(_))
        ));
        assert!(percentile(&[1.0, f64::NAN], 5.0).unwrap().is_nan());
    }

    #[test]
    fn test_sample_statistics() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        // sum of squared deviations is 32, n - 1 = 7
        assert!((sample_variance(&values).unwrap() - 32.0 / 7.0).abs() < 1e-12);
        assert_eq!(sample_std(&[1.0]), None);
        assert_eq!(mean(&[]), None);
    }
}
