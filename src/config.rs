use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AnalyticsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Annual risk-free rate used for excess returns (0.02 for 2%)
    pub risk_free_rate: f64,

    /// Daily excess-return threshold below which returns count as downside
    pub target_return: f64,

    pub trading_days_per_year: u32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.02,
            target_return: 0.0,
            trading_days_per_year: 252,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalConfig {
    pub sma_short: usize,
    pub sma_long: usize,
    pub rsi_period: usize,
    pub macd_short: usize,
    pub macd_long: usize,
    pub macd_signal: usize,
}

impl Default for TechnicalConfig {
    fn default() -> Self {
        Self {
            sma_short: 50,
            sma_long: 200,
            rsi_period: 14,
            macd_short: 12,
            macd_long: 26,
            macd_signal: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Lookback label carried into reports (e.g. "1y"); the caller decides the actual window
    pub period: String,
    pub risk: RiskConfig,
    pub technical: TechnicalConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            period: "1y".to_string(),
            risk: RiskConfig::default(),
            technical: TechnicalConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> Result<Self, AnalyticsError> {
        let defaults = Self::default();

        let config = Self {
            period: std::env::var("ANALYSIS_PERIOD").unwrap_or(defaults.period),
            risk: RiskConfig {
                risk_free_rate: env_or("RISK_FREE_RATE", defaults.risk.risk_free_rate)?,
                target_return: env_or("TARGET_RETURN", defaults.risk.target_return)?,
                trading_days_per_year: env_or(
                    "TRADING_DAYS_PER_YEAR",
                    defaults.risk.trading_days_per_year,
                )?,
            },
            technical: TechnicalConfig {
                sma_short: env_or("SMA_SHORT", defaults.technical.sma_short)?,
                sma_long: env_or("SMA_LONG", defaults.technical.sma_long)?,
                rsi_period: env_or("RSI_PERIOD", defaults.technical.rsi_period)?,
                macd_short: env_or("MACD_SHORT", defaults.technical.macd_short)?,
                macd_long: env_or("MACD_LONG", defaults.technical.macd_long)?,
                macd_signal: env_or("MACD_SIGNAL", defaults.technical.macd_signal)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalyticsError> {
        self.risk.validate()?;
        self.technical.validate()
    }
}

impl RiskConfig {
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if !self.risk_free_rate.is_finite() {
            return Err(AnalyticsError::Config("RISK_FREE_RATE must be finite".to_string()));
        }
        if !self.target_return.is_finite() {
            return Err(AnalyticsError::Config("TARGET_RETURN must be finite".to_string()));
        }
        if self.trading_days_per_year == 0 {
            return Err(AnalyticsError::Config(
                "TRADING_DAYS_PER_YEAR must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl TechnicalConfig {
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        let windows = [
            ("SMA_SHORT", self.sma_short),
            ("SMA_LONG", self.sma_long),
            ("RSI_PERIOD", self.rsi_period),
            ("MACD_SHORT", self.macd_short),
            ("MACD_LONG", self.macd_long),
            ("MACD_SIGNAL", self.macd_signal),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(AnalyticsError::Config(format!("{} must be positive", name)));
        }
        if self.sma_short >= self.sma_long {
            return Err(AnalyticsError::Config(format!(
                "SMA_SHORT ({}) must be below SMA_LONG ({})",
                self.sma_short, self.sma_long
            )));
        }
        if self.macd_short >= self.macd_long {
            return Err(AnalyticsError::Config(format!(
                "MACD_SHORT ({}) must be below MACD_LONG ({})",
                self.macd_short, self.macd_long
            )));
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, AnalyticsError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AnalyticsError::Config(format!("{} has invalid value {:?}: {}", key, raw, e))),
        Err(_) => Ok(default),
    }
}
