//! Site build command.

use anyhow::Result;
use daily_news_site::{BuildConfig, SiteBuilder};

/// Run the build command.
pub fn run(config: BuildConfig) -> Result<()> {
    tracing::info!(
        "Building site from {} into {}",
        config.input_dir.display(),
        config.output_dir.display()
    );

    let result = SiteBuilder::new(config).build()?;

    tracing::info!(
        "Built {} pages from {} reports in {}ms",
        result.pages,
        result.reports,
        result.duration_ms
    );

    if result.skipped > 0 {
        tracing::warn!("Skipped {} files", result.skipped);
    }

    if let Some(latest) = result.latest {
        tracing::info!("Latest report: {}", latest);
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
