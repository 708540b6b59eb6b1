//! End-to-end: CSV price history in, flattened report rows out.

use std::sync::Arc;

use stockscope::models::{ReportSection, ReportValue};
use stockscope::services::{analysis_service, price_import_service};
use stockscope::AnalysisConfig;

fn csv_for(prices: &[f64]) -> String {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut out = String::from("Date,Open,Close,Volume\n");
    for (i, p) in prices.iter().enumerate() {
        let date = start + chrono::Duration::days(i as i64);
        out.push_str(&format!("{},{},{},1000\n", date, p, p));
    }
    out
}

#[test]
fn test_csv_to_report_rows() {
    let prices: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.4).sin() * 5.0).collect();
    let series = price_import_service::read_price_series(csv_for(&prices).as_bytes()).unwrap();
    let bench_prices: Vec<f64> = (0..40).map(|i| 200.0 + (i as f64 * 0.4).sin() * 4.0).collect();
    let bench = price_import_service::read_price_series(csv_for(&bench_prices).as_bytes()).unwrap();

    let report =
        analysis_service::analyze_security("WAVE", &series, Some(&bench), &AnalysisConfig::default())
            .unwrap();
    let rows = report.rows();

    let labels: Vec<&str> = rows.iter().map(|r| r.label).collect();
    for expected in [
        "Annualized Volatility",
        "Beta",
        "Value at Risk (95%)",
        "Maximum Drawdown",
        "Sharpe Ratio",
        "Sortino Ratio",
        "Current Price",
        "Trend",
        "MACD Signal",
        "RSI Signal",
    ] {
        assert!(labels.contains(&expected), "missing row {}", expected);
    }

    // 40 observations: the 200-day average cannot exist yet
    let long_sma = rows.iter().find(|r| r.label == "Long SMA").unwrap();
    assert_eq!(long_sma.section, ReportSection::Technical);
    assert_eq!(long_sma.value, ReportValue::Undefined);

    let beta = rows.iter().find(|r| r.label == "Beta").unwrap();
    assert!(matches!(beta.value, ReportValue::Number(b) if b > 0.0));
}

#[test]
fn test_report_serializes_undefined_as_null() {
    let series = price_import_service::read_price_series(csv_for(&[10.0, 10.0, 10.0]).as_bytes()).unwrap();
    let report =
        analysis_service::analyze_security("FLAT", &series, None, &AnalysisConfig::default()).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["risk"]["sharpe"].is_null());
    assert!(json["risk"]["beta"].is_null());
    assert_eq!(json["technical"]["trend"], "Neutral");
}

#[tokio::test]
async fn test_batch_shares_benchmark() {
    let bench = price_import_service::read_price_series(csv_for(&[50.0, 51.0, 50.5, 52.0]).as_bytes()).unwrap();
    let a = price_import_service::read_price_series(csv_for(&[10.0, 10.4, 10.1, 10.9]).as_bytes()).unwrap();
    let b = price_import_service::read_price_series(csv_for(&[20.0, 19.5, 19.9, 19.0]).as_bytes()).unwrap();

    let results = analysis_service::analyze_batch(
        vec![("A".to_string(), a), ("B".to_string(), b)],
        Some(Arc::new(bench)),
        Arc::new(AnalysisConfig::default()),
    )
    .await;

    let betas: Vec<f64> = results
        .iter()
        .map(|(_, r)| r.as_ref().unwrap().risk.beta.unwrap())
        .collect();
    assert!(betas[0] > 0.0);
    assert!(betas[1] < 0.0);
}
