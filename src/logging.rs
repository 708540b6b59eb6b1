//! Global `tracing` setup for the command-line tool.
//!
//! Everything is written to stderr so stdout carries only the JSON report.
//! With the `loki` feature, log lines can additionally be shipped to a Loki
//! endpoint labelled with the service name and environment.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::AnalyticsError;

const DEFAULT_FILTER: &str = "warn,stockscope=info";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub loki_enabled: bool,
    pub loki_url: Option<String>,
    pub service_name: String,
    pub environment: String,
    /// `EnvFilter` directives, e.g. `stockscope=debug`
    pub log_level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            loki_enabled: var("LOKI_ENABLED").map_or(false, |v| {
                matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
            }),
            loki_url: var("LOKI_URL"),
            service_name: var("SERVICE_NAME").unwrap_or_else(|| "stockscope".to_string()),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            log_level: var("RUST_LOG").unwrap_or_else(|| DEFAULT_FILTER.to_string()),
        }
    }

    /// The Loki push endpoint, or `None` when shipping is switched off.
    pub fn loki_endpoint(&self) -> Result<Option<url::Url>, AnalyticsError> {
        if !self.loki_enabled {
            return Ok(None);
        }

        let raw = self.loki_url.as_deref().ok_or_else(|| {
            AnalyticsError::Config("LOKI_ENABLED is true but LOKI_URL is not set".to_string())
        })?;

        url::Url::parse(raw)
            .map(Some)
            .map_err(|e| AnalyticsError::Config(format!("LOKI_URL {:?} is not a valid URL: {}", raw, e)))
    }

    fn env_filter(&self) -> Result<EnvFilter, AnalyticsError> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| AnalyticsError::Config(format!("RUST_LOG {:?}: {}", self.log_level, e)))
    }
}

/// Install the global subscriber. Fails on a bad filter or Loki setting, or
/// when a subscriber is already installed.
///
/// With Loki enabled this must run inside a tokio runtime, since the shipper
/// is spawned as a background task.
pub fn init_logging(config: &LoggingConfig) -> Result<(), AnalyticsError> {
    let endpoint = config.loki_endpoint()?;

    let registry = tracing_subscriber::registry()
        .with(config.env_filter()?)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    #[cfg(feature = "loki")]
    let registry = registry.with(match &endpoint {
        Some(url) => Some(loki_layer(config, url.clone())?),
        None => None,
    });

    registry
        .try_init()
        .map_err(|e| AnalyticsError::Config(format!("logging already initialized: {}", e)))?;

    match &endpoint {
        #[cfg(feature = "loki")]
        Some(url) => tracing::debug!(service = %config.service_name, "Shipping logs to Loki at {}", url),
        #[cfg(not(feature = "loki"))]
        Some(_) => tracing::warn!("LOKI_ENABLED is set but this build has no Loki support"),
        None => {}
    }

    Ok(())
}

#[cfg(feature = "loki")]
fn loki_layer(config: &LoggingConfig, url: url::Url) -> Result<tracing_loki::Layer, AnalyticsError> {
    let (layer, task) = tracing_loki::builder()
        .label("service", config.service_name.as_str())
        .and_then(|b| b.label("environment", config.environment.as_str()))
        .and_then(|b| b.build_url(url))
        .map_err(|e| AnalyticsError::Config(format!("Loki layer: {}", e)))?;

    tokio::spawn(task);
    Ok(layer)
}
