use anyhow::Result;
use shipscraper::{
    config::{Config, CONFIG_FILE},
    fetch::HttpFetcher,
    pipeline::{self, RunOutcome},
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) configure ────────────────────────────────────────────────
    let config = Config::load(CONFIG_FILE)?;
    let fetcher = HttpFetcher::new(&config)?;

    // ─── 3) fetch → normalize → merge → write ────────────────────────
    match pipeline::run(&config, &fetcher)? {
        RunOutcome::Written {
            path,
            records,
            added,
        } => info!(records, added, path = %path.display(), "all done"),
        RunOutcome::FetchFailed => info!("nothing written"),
    }
    Ok(())
}
