//! Validate reports without writing the site.

use anyhow::Result;
use daily_news_site::{BuildConfig, SiteBuilder};

/// Run the check command.
pub fn run(config: BuildConfig) -> Result<()> {
    tracing::info!("Checking reports in {}", config.input_dir.display());

    let result = SiteBuilder::new(config).check()?;

    tracing::info!(
        "{} reports render cleanly ({} pages, {} skipped)",
        result.reports,
        result.pages,
        result.skipped
    );

    Ok(())
}
