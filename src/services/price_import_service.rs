use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::models::{PricePoint, PriceSeries};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date", alias = "DATE", alias = "timestamp")]
    date: String,
    #[serde(default, alias = "Close", alias = "CLOSE")]
    close: Option<String>,
    #[serde(default, rename = "Adj Close", alias = "adj_close", alias = "adjusted_close")]
    adj_close: Option<String>,
}

fn parse_price_string(s: &str) -> Result<f64> {
    let cleaned = s.replace('$', "").replace(',', "");
    cleaned
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Failed to parse price: {}", s))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    // Accept plain dates and timestamps such as "2024-01-02 00:00:00-05:00"
    let day = s.trim().get(..10).unwrap_or(s.trim());
    NaiveDate::parse_from_str(day, "%Y-%m-%d").with_context(|| format!("Failed to parse date: {}", s))
}

/// Read a price history CSV with a date column and a close (or adjusted close) column.
///
/// Rows are sorted by date before validation, so files listed newest first are accepted.
pub fn read_price_series<R: Read>(reader: R) -> Result<PriceSeries> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut points = Vec::new();
    for (line, record) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = record.with_context(|| format!("Malformed CSV row {}", line + 2))?;
        let raw_close = row
            .close
            .as_deref()
            .filter(|c| !c.is_empty())
            .or(row.adj_close.as_deref())
            .with_context(|| format!("Row {} has no close price", line + 2))?;

        points.push(PricePoint::new(parse_date(&row.date)?, parse_price_string(raw_close)?));
    }

    points.sort_by_key(|p| p.date);

    Ok(PriceSeries::new(points)?)
}

pub fn load_price_series(path: &Path) -> Result<PriceSeries> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open price file {}", path.display()))?;
    read_price_series(file).with_context(|| format!("Failed to load prices from {}", path.display()))
}
