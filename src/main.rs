use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use stockscope::logging::{init_logging, LoggingConfig};
use stockscope::models::AnalysisReport;
use stockscope::services::{analysis_service, price_import_service};
use stockscope::AnalysisConfig;

const USAGE: &str = "usage: stockscope [--benchmark FILE] FILE...";

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Outcome {
    Report(AnalysisReport),
    Failed { ticker: String, error: String },
}

struct Args {
    benchmark: Option<PathBuf>,
    files: Vec<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut benchmark = None;
    let mut files = Vec::new();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--benchmark" | "-b" => {
                let path = args.next().with_context(|| format!("--benchmark needs a file\n{}", USAGE))?;
                benchmark = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ => files.push(PathBuf::from(arg)),
        }
    }

    if files.is_empty() {
        bail!("no price files given\n{}", USAGE);
    }

    Ok(Args { benchmark, files })
}

fn ticker_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_uppercase())
        .unwrap_or_else(|| path.display().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    init_logging(&LoggingConfig::from_env())?;

    let args = parse_args()?;
    let config = Arc::new(AnalysisConfig::from_env()?);

    let benchmark = match &args.benchmark {
        Some(path) => {
            info!("Loading benchmark from {}", path.display());
            Some(Arc::new(price_import_service::load_price_series(path)?))
        }
        None => None,
    };

    let mut outcomes = Vec::new();
    let mut securities = Vec::new();
    for path in &args.files {
        let ticker = ticker_from_path(path);
        match price_import_service::load_price_series(path) {
            Ok(series) => securities.push((ticker, series)),
            Err(e) => {
                warn!("Skipping {}: {:#}", ticker, e);
                outcomes.push(Outcome::Failed {
                    ticker,
                    error: format!("{:#}", e),
                });
            }
        }
    }

    let results = analysis_service::analyze_batch(securities, benchmark, config).await;
    for (ticker, result) in results {
        match result {
            Ok(report) => outcomes.push(Outcome::Report(report)),
            Err(e) => {
                warn!("Analysis failed for {}: {}", ticker, e);
                outcomes.push(Outcome::Failed {
                    ticker,
                    error: e.to_string(),
                });
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    info!("Analyzed {} securities", outcomes.len());

    Ok(())
}
