pub mod analysis_service;
pub mod indicators;
pub mod price_import_service;
pub mod risk_service;
pub mod series_ops;
pub mod signal_classifier;
pub mod technical_service;
