use serde::{Deserialize, Serialize};

/// Trend derived from the latest close and the short/long simple moving averages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Trend {
    /// Close above the short SMA, which is above the long SMA
    Bullish,

    /// Close below the short SMA, which is below the long SMA
    Bearish,

    /// Anything else, including undefined averages
    Neutral,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bullish => write!(f, "Bullish"),
            Trend::Bearish => write!(f, "Bearish"),
            Trend::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Two-way MACD reading. There is no neutral branch: ties are bearish.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MacdSignal {
    Bullish,
    Bearish,
}

impl std::fmt::Display for MacdSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MacdSignal::Bullish => write!(f, "Bullish"),
            MacdSignal::Bearish => write!(f, "Bearish"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RsiSignal {
    /// RSI above 70
    Overbought,

    /// RSI below 30
    Oversold,

    Neutral,
}

impl std::fmt::Display for RsiSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RsiSignal::Overbought => write!(f, "Overbought"),
            RsiSignal::Oversold => write!(f, "Oversold"),
            RsiSignal::Neutral => write!(f, "Neutral"),
        }
    }
}
