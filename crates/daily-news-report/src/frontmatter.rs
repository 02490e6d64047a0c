//! Optional YAML frontmatter on top of a report.

use serde::Deserialize;

/// Metadata a report may declare in a leading `---` block.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// Page title, overriding the report's `#` heading
    #[serde(default)]
    pub title: Option<String>,

    /// One-line description shown under the title
    #[serde(default)]
    pub description: Option<String>,
}

/// Extract frontmatter from a report.
///
/// Returns the parsed frontmatter and the remaining content after the
/// frontmatter block. `---` is also a Markdown thematic break, so a block is
/// only taken as frontmatter when the first line is exactly `---`, a later
/// line is exactly `---`, and the YAML between them is a mapping. Anything
/// else is left untouched as Markdown.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let Some(after_open) = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    else {
        return Ok((None, source));
    };

    let Some((yaml_content, remaining)) = split_at_fence(after_open) else {
        return Ok((None, source));
    };

    // Empty block: the closing fence directly follows the opening one
    if yaml_content.is_empty() {
        return Ok((Some(Frontmatter::default()), remaining.trim_start()));
    }

    let value: serde_yaml::Value = match serde_yaml::from_str(yaml_content) {
        Ok(value @ serde_yaml::Value::Mapping(_)) => value,
        Ok(_) | Err(_) => {
            tracing::warn!("Leading --- block is not a YAML mapping, rendering it as Markdown");
            return Ok((None, source));
        }
    };

    let frontmatter: Frontmatter = serde_yaml::from_value(value)
        .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Split at the first line that is exactly `---`.
fn split_at_fence(text: &str) -> Option<(&str, &str)> {
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some((&text[..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Invalid frontmatter: {0}")]
    InvalidYaml(String),
}
