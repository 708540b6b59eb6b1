use crate::services::series_ops::{ewm, rolling_mean};

/// Simple Moving Average (SMA)
/// Returns a vector aligned with `values`:
/// - `None` until enough values exist
/// - `Some(avg)` after `window` values
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_mean(values, window)
}

/// Relative Strength Index (RSI)
///
/// Measures momentum by comparing recent gains to recent losses.
/// RSI values range from 0 to 100:
/// - Below 30: Oversold condition
/// - Above 70: Overbought condition
///
/// Calculation:
/// 1. Calculate price changes (gains and losses); the first price has no
///    predecessor and counts as an unchanged day
/// 2. Take the simple trailing mean of gains and losses over `period` changes
/// 3. RS = Average Gain / Average Loss
/// 4. RSI = 100 - (100 / (1 + RS))
///
/// When the average loss is zero the RSI is fixed at 100, including for a flat series.
///
/// Returns `None` for the first `period - 1` values, then `Some(rsi)` for subsequent values.
pub fn rsi(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    if prices.is_empty() || period == 0 {
        return vec![None; prices.len()];
    }

    // changes[i] is the move into prices[i]
    let changes: Vec<f64> = std::iter::once(0.0)
        .chain(prices.windows(2).map(|w| w[1] - w[0]))
        .collect();

    let gains: Vec<f64> = changes.iter().map(|&c| if c > 0.0 { c } else { 0.0 }).collect();
    let losses: Vec<f64> = changes.iter().map(|&c| if c < 0.0 { -c } else { 0.0 }).collect();

    let avg_gains = rolling_mean(&gains, period);
    let avg_losses = rolling_mean(&losses, period);

    avg_gains
        .into_iter()
        .zip(avg_losses)
        .map(|(gain, loss)| match (gain, loss) {
            (Some(g), Some(l)) => Some(rsi_from_averages(g, l)),
            _ => None,
        })
        .collect()
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Moving Average Convergence Divergence (MACD)
///
/// Components:
/// - MACD Line: fast EMA - slow EMA
/// - Signal Line: EMA of the MACD Line
/// - Histogram: MACD Line - Signal Line
///
/// All EMAs are seeded at the first observation. The MACD line is reported once
/// `slow_period` observations exist and the signal line once a further
/// `signal_period - 1` MACD values exist.
///
/// Returns: (macd_line, signal_line, histogram) as three separate Vec<Option<f64>>
pub fn macd(
    prices: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> (Vec<Option<f64>>, Vec<Option<f64>>, Vec<Option<f64>>) {
    let len = prices.len();
    if len == 0 || fast_period == 0 || slow_period == 0 || signal_period == 0 {
        return (vec![None; len], vec![None; len], vec![None; len]);
    }

    let fast_ema = ewm(prices, fast_period);
    let slow_ema = ewm(prices, slow_period);

    let raw_macd: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(fast, slow)| fast - slow)
        .collect();
    let raw_signal = ewm(&raw_macd, signal_period);

    let macd_ready = slow_period.max(fast_period) - 1;
    let signal_ready = macd_ready + signal_period - 1;

    let mut macd_line: Vec<Option<f64>> = vec![None; len];
    let mut signal_line: Vec<Option<f64>> = vec![None; len];
    let mut histogram: Vec<Option<f64>> = vec![None; len];

    for i in 0..len {
        if i >= macd_ready {
            macd_line[i] = Some(raw_macd[i]);
        }
        if i >= signal_ready {
            signal_line[i] = Some(raw_signal[i]);
            histogram[i] = Some(raw_macd[i] - raw_signal[i]);
        }
    }

    (macd_line, signal_line, histogram)
}
