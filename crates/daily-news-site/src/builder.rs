//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use daily_news_report::{parse_report, ParsedReport, ReportDate};

use crate::assets::AssetPipeline;
use crate::content::{render_markdown, section_views};
use crate::output::{self, BuildLock, RenderedPage};
use crate::templates::{Context, NavItem, TemplateEngine};

/// File name of the home page.
pub const HOME_PAGE: &str = "index.html";

/// Configuration for building the site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory of dated Markdown reports
    pub input_dir: PathBuf,

    /// Output directory, replaced on every build
    pub output_dir: PathBuf,

    /// Site title, used in `<title>` and as the fallback page heading
    pub title: String,

    /// `<html lang>` value
    pub lang: String,

    /// Footer text
    pub footer: String,

    /// Text of the summary panel when a report has no summary section
    pub empty_summary: String,

    /// Minify the inline stylesheet
    pub minify: bool,

    /// Abort on malformed or duplicate report names instead of skipping them
    pub strict: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("output"),
            output_dir: PathBuf::from("website/dist"),
            title: "Daily News".to_string(),
            lang: "zh-CN".to_string(),
            footer: "Generated by daily-news".to_string(),
            empty_summary: "暂无导读".to_string(),
            minify: true,
            strict: false,
        }
    }
}

/// Result of a build or check.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of reports rendered
    pub reports: usize,

    /// Number of files skipped by the malformed-name policy
    pub skipped: usize,

    /// Number of HTML files produced, home page included
    pub pages: usize,

    /// Date backing the home page
    pub latest: Option<ReportDate>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Input directory not found: {}", .0.display())]
    MissingInputDirectory(PathBuf),

    #[error("Failed to read {}: {message}", path.display())]
    ReadError { path: PathBuf, message: String },

    #[error("Malformed report {}: {message}", path.display())]
    MalformedInput { path: PathBuf, message: String },

    #[error("Failed to render {}: {message}", path.display())]
    RenderError { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", path.display())]
    WriteFailure { path: PathBuf, message: String },
}

/// A report accepted for the site.
#[derive(Debug)]
struct Report {
    date: ReportDate,
    source_path: PathBuf,
    doc: ParsedReport,
}

/// Reports in site order plus the number of rejected files.
#[derive(Debug)]
struct Discovered {
    reports: Vec<Report>,
    skipped: usize,
}

/// Static site builder.
pub struct SiteBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
    stylesheet: String,
}

impl SiteBuilder {
    /// Create a new site builder.
    pub fn new(config: BuildConfig) -> Self {
        let stylesheet = AssetPipeline::stylesheet(config.minify);

        Self {
            config,
            templates: TemplateEngine::new(),
            stylesheet,
        }
    }

    /// Build the site, replacing the output directory.
    ///
    /// Everything is rendered in memory first; the output directory is only
    /// touched once every report rendered successfully.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let discovered = self.discover_reports()?;
        self.check_overlap()?;

        let pages = self.render_site(&discovered.reports)?;

        {
            let _lock = BuildLock::acquire(&self.config.output_dir)?;
            output::replace_dir(&self.config.output_dir, &pages)?;
        }

        Ok(self.result(&discovered, &pages, start))
    }

    /// Discover and render every report without writing anything.
    ///
    /// Fails on everything a build would fail on before its write phase.
    pub fn check(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let discovered = self.discover_reports()?;
        self.check_overlap()?;
        let pages = self.render_site(&discovered.reports)?;

        Ok(self.result(&discovered, &pages, start))
    }

    fn result(&self, discovered: &Discovered, pages: &[RenderedPage], start: Instant) -> BuildResult {
        BuildResult {
            reports: discovered.reports.len(),
            skipped: discovered.skipped,
            pages: pages.len(),
            latest: discovered.reports.first().map(|r| r.date),
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        }
    }

    /// Refuse an output directory that is, or contains, the input directory.
    fn check_overlap(&self) -> Result<(), BuildError> {
        // Nothing to clobber if the output does not exist yet
        let Ok(output) = fs::canonicalize(&self.config.output_dir) else {
            return Ok(());
        };
        let input = fs::canonicalize(&self.config.input_dir).map_err(|e| BuildError::ReadError {
            path: self.config.input_dir.clone(),
            message: e.to_string(),
        })?;

        if input.starts_with(&output) {
            return Err(BuildError::WriteFailure {
                path: self.config.output_dir.clone(),
                message: format!(
                    "output directory would replace the input directory {}",
                    self.config.input_dir.display()
                ),
            });
        }

        Ok(())
    }

    /// Find every dated report, newest first.
    fn discover_reports(&self) -> Result<Discovered, BuildError> {
        let input = &self.config.input_dir;

        if !input.is_dir() {
            return Err(BuildError::MissingInputDirectory(input.clone()));
        }

        let mut candidates: Vec<(ReportDate, PathBuf)> = Vec::new();
        let mut skipped = 0;

        for entry in WalkDir::new(input)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| BuildError::ReadError {
                path: input.clone(),
                message: e.to_string(),
            })?;
            let path = entry.path();

            if !entry.file_type().is_file() || !is_report_file(path) {
                continue;
            }

            match ReportDate::from_path(path) {
                Ok(date) => candidates.push((date, path.to_path_buf())),
                Err(e) => {
                    self.reject(path, e.to_string())?;
                    skipped += 1;
                }
            }
        }

        // Newest first; the file name breaks ties between same-day files
        candidates.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| a.1.file_name().cmp(&b.1.file_name()))
        });

        let mut reports: Vec<Report> = Vec::with_capacity(candidates.len());

        for (date, path) in candidates {
            if let Some(kept) = reports.last().filter(|r| r.date == date) {
                let message = format!(
                    "duplicate report for {}, already provided by {}",
                    date,
                    kept.source_path.display()
                );
                self.reject(&path, message)?;
                skipped += 1;
                continue;
            }

            let doc = read_report(&path)?;
            tracing::debug!("Parsed {} ({} sections)", path.display(), doc.sections.len());

            reports.push(Report {
                date,
                source_path: path,
                doc,
            });
        }

        if reports.is_empty() {
            tracing::warn!("No reports found in {}", input.display());
        } else {
            tracing::info!("Found {} reports in {}", reports.len(), input.display());
        }

        Ok(Discovered { reports, skipped })
    }

    /// Apply the malformed-name policy: skip with a warning, or abort when strict.
    fn reject(&self, path: &Path, message: String) -> Result<(), BuildError> {
        if self.config.strict {
            return Err(BuildError::MalformedInput {
                path: path.to_path_buf(),
                message,
            });
        }

        tracing::warn!("Skipping {}: {}", path.display(), message);
        Ok(())
    }

    /// Render every report page plus the home page.
    fn render_site(&self, reports: &[Report]) -> Result<Vec<RenderedPage>, BuildError> {
        let mut pages = Vec::with_capacity(reports.len() + 1);

        for report in reports {
            let html = self.render_report(report, reports)?;
            tracing::debug!("Rendered {}", report.date.page_name());

            pages.push(RenderedPage {
                file_name: report.date.page_name(),
                html,
            });
        }

        // Reports are newest first, so the first page mirrors onto the home page
        if let Some(latest) = pages.first() {
            tracing::info!("Home page: {} -> {}", latest.file_name, HOME_PAGE);

            let home = RenderedPage {
                file_name: HOME_PAGE.to_string(),
                html: latest.html.clone(),
            };
            pages.push(home);
        }

        Ok(pages)
    }

    /// Render a single report page.
    fn render_report(&self, report: &Report, reports: &[Report]) -> Result<String, BuildError> {
        let doc = &report.doc;

        if let Some(heading_date) = doc.title.as_deref().and_then(ReportDate::find_in) {
            if heading_date != report.date {
                tracing::warn!(
                    "{} is headed {} but named {}; using the file name",
                    report.source_path.display(),
                    heading_date,
                    report.date
                );
            }
        }

        let frontmatter = doc.frontmatter.as_ref();

        let title = frontmatter
            .and_then(|f| f.title.clone())
            .or_else(|| doc.title.clone())
            .unwrap_or_else(|| self.config.title.clone());

        let context = Context {
            lang: self.config.lang.clone(),
            site_title: self.config.title.clone(),
            title,
            date: report.date.to_string(),
            description: frontmatter.and_then(|f| f.description.clone()),
            lead: render_markdown(&doc.lead),
            sections: section_views(doc),
            empty_summary: self.config.empty_summary.clone(),
            nav: build_navigation(reports, report.date),
            stylesheet: self.stylesheet.clone(),
            footer: self.config.footer.clone(),
        };

        self.templates
            .render_page(&context)
            .map_err(|e| BuildError::RenderError {
                path: report.source_path.clone(),
                message: e.to_string(),
            })
    }
}

/// Date navigation for a page, in site order.
fn build_navigation(reports: &[Report], active: ReportDate) -> Vec<NavItem> {
    reports
        .iter()
        .map(|r| NavItem {
            date: r.date.to_string(),
            href: r.date.page_name(),
            active: r.date == active,
        })
        .collect()
}

/// Visible `.md` / `.markdown` files.
fn is_report_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(true, |n| n.starts_with('.'));

    let markdown = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"));

    !hidden && markdown
}

/// Read and parse one report.
fn read_report(path: &Path) -> Result<ParsedReport, BuildError> {
    let bytes = fs::read(path).map_err(|e| BuildError::ReadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let source = String::from_utf8(bytes).map_err(|e| BuildError::RenderError {
        path: path.to_path_buf(),
        message: format!("not valid UTF-8: {}", e),
    })?;

    parse_report(&source).map_err(|e| BuildError::RenderError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
