//! Configuration file (`daily-news.toml`) and command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use daily_news_site::BuildConfig;
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    site: SiteConfig,
    #[serde(default)]
    build: BuildSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SiteConfig {
    input: PathBuf,
    output: PathBuf,
    title: String,
    lang: String,
    footer: String,
    empty_summary: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let defaults = BuildConfig::default();
        Self {
            input: defaults.input_dir,
            output: defaults.output_dir,
            title: defaults.title,
            lang: defaults.lang,
            footer: defaults.footer,
            empty_summary: defaults.empty_summary,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct BuildSettings {
    minify: bool,
    strict: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: true,
            strict: false,
        }
    }
}

/// Values given on the command line or through the environment.
///
/// `None` leaves the config file's value in place.
#[derive(Debug, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub minify: Option<bool>,
    pub strict: Option<bool>,
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

impl ConfigFile {
    /// Merge command-line overrides over the file's values.
    pub fn resolve(self, overrides: Overrides) -> BuildConfig {
        BuildConfig {
            input_dir: overrides.input.unwrap_or(self.site.input),
            output_dir: overrides.output.unwrap_or(self.site.output),
            title: self.site.title,
            lang: self.site.lang,
            footer: self.site.footer,
            empty_summary: self.site.empty_summary,
            minify: overrides.minify.unwrap_or(self.build.minify),
            strict: overrides.strict.unwrap_or(self.build.strict),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_without_file() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("daily-news.toml"))
            .unwrap()
            .resolve(Overrides::default());

        assert_eq!(config.input_dir, PathBuf::from("output"));
        assert_eq!(config.output_dir, PathBuf::from("website/dist"));
        assert_eq!(config.title, "Daily News");
        assert_eq!(config.empty_summary, "暂无导读");
        assert!(config.minify);
        assert!(!config.strict);
    }

    #[test]
    fn reads_partial_file() {
        let file: ConfigFile = toml::from_str(
            r#"
[site]
input = "reports"
title = "Morning Brief"
empty_summary = "No summary today"

[build]
strict = true
"#,
        )
        .unwrap();

        let config = file.resolve(Overrides::default());

        assert_eq!(config.input_dir, PathBuf::from("reports"));
        assert_eq!(config.output_dir, PathBuf::from("website/dist"));
        assert_eq!(config.title, "Morning Brief");
        assert_eq!(config.lang, "zh-CN");
        assert_eq!(config.empty_summary, "No summary today");
        assert!(config.minify);
        assert!(config.strict);
    }

    #[test]
    fn overrides_win_over_file() {
        let file: ConfigFile = toml::from_str(
            r#"
[site]
input = "reports"
output = "public"

[build]
minify = true
"#,
        )
        .unwrap();

        let config = file.resolve(Overrides {
            input: Some(PathBuf::from("elsewhere")),
            output: None,
            minify: Some(false),
            strict: None,
        });

        assert_eq!(config.input_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.output_dir, PathBuf::from("public"));
        assert!(!config.minify);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("daily-news.toml");
        fs::write(&path, "[site\ninput = ").unwrap();

        let err = load_config(&path).unwrap_err();

        assert!(err.to_string().contains("Failed to parse"));
    }
}
