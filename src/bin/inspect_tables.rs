//! Fetch the ship list and print what the parser sees in each section:
//! the column labels and how many rows. Run this after the wiki changes
//! its layout to update the positional stat table.

use anyhow::{Context, Result};
use serde::Serialize;
use shipscraper::{
    config::{Config, CONFIG_FILE},
    fetch::{parse_tables, Fetcher, HttpFetcher},
    process::normalize::STAT_COLUMNS,
};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Serialize)]
struct SectionInfo {
    section: usize,
    has_table: bool,
    rows: usize,
    labels: Vec<String>,
    /// Stat labels the normalizer expects but this section lacks.
    missing_stat_labels: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    let config = Config::load(CONFIG_FILE)?;
    let fetcher = HttpFetcher::new(&config)?;
    let markup = fetcher
        .fetch(&config.source_url)
        .with_context(|| format!("fetching {}", config.source_url))?;

    // take every section, not just the configured count, to spot additions
    let report: Vec<SectionInfo> = parse_tables(&markup, usize::MAX)
        .into_iter()
        .enumerate()
        .map(|(section, table)| {
            let has_table = table.is_some();
            let table = table.unwrap_or_default();
            SectionInfo {
                section,
                has_table,
                rows: table.rows.len(),
                missing_stat_labels: STAT_COLUMNS
                    .iter()
                    .filter(|(_, label)| !table.labels.iter().any(|l| l == label))
                    .map(|(stat, label)| format!("{} ({})", label, stat))
                    .collect(),
                labels: table.labels,
            }
        })
        .collect();

    if report.len() != config.table_count {
        eprintln!(
            "warning: found {} sections, configured table_count is {}",
            report.len(),
            config.table_count
        );
    }
    print!("{}", serde_yaml::to_string(&report)?);
    Ok(())
}
