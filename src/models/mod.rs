mod price_point;
pub mod report;
pub mod risk;
pub mod signal;
pub mod technical;

pub use price_point::{PricePoint, PriceSeries, ReturnPoint, ReturnSeries};
pub use report::{AnalysisReport, ReportRow, ReportSection, ReportValue};
pub use risk::RiskMetrics;
pub use signal::{MacdSignal, RsiSignal, Trend};
pub use technical::{PriceSummary, TechnicalMetrics};
