use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storefront::config::Config;
use storefront::jobs::{load_jobs, run_jobs};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env values)
    let config = Config::from_env()?;

    // Structured logging goes to stderr; stdout carries the JSON results.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting storefront fit runner v{}", env!("CARGO_PKG_VERSION"));

    let jobs = load_jobs(config.jobs_path.as_deref())?;
    info!(
        jobs = jobs.len(),
        font = %config.font,
        min = config.min_font_size,
        max = config.max_font_size,
        "Fit jobs loaded"
    );

    let results = run_jobs(jobs, config.job_defaults()).await?;
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
