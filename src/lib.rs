//! Risk metrics, technical indicators and signal labels for a single security's
//! price history.
//!
//! Every computation is a pure function of its inputs: no I/O, no shared state,
//! safe to call from many threads at once.

pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod services;

pub use config::{AnalysisConfig, RiskConfig, TechnicalConfig};
pub use errors::AnalyticsError;
