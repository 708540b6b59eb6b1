use crate::models::{MacdSignal, RsiSignal, Trend};

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

/// Classify the price trend from the latest close and its moving averages.
///
/// An undefined average makes the comparison meaningless, so the trend is Neutral.
pub fn trend(close: f64, sma_short: Option<f64>, sma_long: Option<f64>) -> Trend {
    match (sma_short, sma_long) {
        (Some(short), Some(long)) if close > short && short > long => Trend::Bullish,
        (Some(short), Some(long)) if close < short && short < long => Trend::Bearish,
        _ => Trend::Neutral,
    }
}

/// Strict comparison of the MACD line against its signal line; ties and
/// undefined values are Bearish.
pub fn macd_signal(macd: Option<f64>, signal_line: Option<f64>) -> MacdSignal {
    match (macd, signal_line) {
        (Some(m), Some(s)) if m > s => MacdSignal::Bullish,
        _ => MacdSignal::Bearish,
    }
}

pub fn rsi_signal(rsi: Option<f64>) -> RsiSignal {
    match rsi {
        Some(v) if v > RSI_OVERBOUGHT => RsiSignal::Overbought,
        Some(v) if v < RSI_OVERSOLD => RsiSignal::Oversold,
        _ => RsiSignal::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_bullish_and_bearish() {
        assert_eq!(trend(110.0, Some(105.0), Some(100.0)), Trend::Bullish);
        assert_eq!(trend(90.0, Some(95.0), Some(100.0)), Trend::Bearish);
    }

    #[test]
    fn test_trend_mixed_is_neutral() {
        assert_eq!(trend(110.0, Some(95.0), Some(100.0)), Trend::Neutral);
        assert_eq!(trend(100.0, Some(100.0), Some(100.0)), Trend::Neutral);
        assert_eq!(trend(90.0, Some(105.0), Some(100.0)), Trend::Neutral);
    }

    #[test]
    fn test_trend_is_total() {
        let values = [None, Some(f64::NAN), Some(90.0), Some(100.0), Some(110.0)];
        for close in [f64::NAN, 90.0, 100.0, 110.0] {
            for short in values {
                for long in values {
                    let t = trend(close, short, long);
                    assert!(matches!(t, Trend::Bullish | Trend::Bearish | Trend::Neutral));
                    if short.is_none() || long.is_none() {
                        assert_eq!(t, Trend::Neutral);
                    }
                }
            }
        }
    }

    #[test]
    fn test_macd_signal_ties_are_bearish() {
        assert_eq!(macd_signal(Some(1.0), Some(0.5)), MacdSignal::Bullish);
        assert_eq!(macd_signal(Some(0.5), Some(0.5)), MacdSignal::Bearish);
        assert_eq!(macd_signal(Some(0.1), Some(0.5)), MacdSignal::Bearish);
        assert_eq!(macd_signal(None, Some(0.5)), MacdSignal::Bearish);
    }

    #[test]
    fn test_rsi_signal_thresholds() {
        assert_eq!(rsi_signal(Some(100.0)), RsiSignal::Overbought);
        assert_eq!(rsi_signal(Some(70.0)), RsiSignal::Neutral);
        assert_eq!(rsi_signal(Some(50.0)), RsiSignal::Neutral);
        assert_eq!(rsi_signal(Some(30.0)), RsiSignal::Neutral);
        assert_eq!(rsi_signal(Some(29.9)), RsiSignal::Oversold);
        assert_eq!(rsi_signal(None), RsiSignal::Neutral);
    }
}
