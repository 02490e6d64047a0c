//! Static site builder for the daily news archive.
//!
//! Turns a directory of dated Markdown reports into self-contained HTML pages
//! with a date navigation bar, plus a home page mirroring the latest report.

pub mod assets;
pub mod builder;
pub mod content;
mod output;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder, HOME_PAGE};
