//! Theme stylesheet for generated pages.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// The terminal theme stylesheet, minified when requested.
    ///
    /// Falls back to the readable stylesheet if minification fails.
    pub fn stylesheet(minify: bool) -> String {
        if !minify {
            return THEME_CSS.to_string();
        }

        match Self::minify_css(THEME_CSS) {
            Ok(css) => css,
            Err(e) => {
                tracing::warn!("Using unminified stylesheet: {}", e);
                THEME_CSS.to_string()
            }
        }
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

// Light page with a dark terminal header. Pages embed this inline, so no
// web fonts: the font stacks fall back to system faces.
const THEME_CSS: &str = r#":root {
  --bg-primary: #fafafa;
  --bg-secondary: #f5f5f5;
  --bg-terminal: #1a1a1a;
  --text-primary: #1a1a1a;
  --text-secondary: #666666;
  --text-muted: #999999;
  --accent: #2563eb;
  --border: #e5e5e5;
  --border-light: #f0f0f0;
  --star: #f59e0b;
  --code-bg: #f4f4f4;
  --prompt: #10b981;
  --font-mono: "JetBrains Mono", ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
  --font-sans: Inter, -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
}

* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: var(--font-sans);
  background: var(--bg-primary);
  color: var(--text-primary);
  line-height: 1.6;
}

/* Terminal header */
.terminal-header {
  background: var(--bg-terminal);
  color: #fff;
  padding: 1rem 2rem;
  font-family: var(--font-mono);
}

.terminal-line {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  margin-bottom: 0.25rem;
}

.terminal-prompt {
  color: var(--prompt);
}

.terminal-cursor {
  display: inline-block;
  width: 8px;
  height: 1.2em;
  background: var(--prompt);
  animation: blink 1s infinite;
  vertical-align: text-bottom;
}

@keyframes blink {
  0%, 50% { opacity: 1; }
  51%, 100% { opacity: 0; }
}

/* Date navigation */
.nav-container {
  background: var(--bg-secondary);
  border-bottom: 1px solid var(--border);
  padding: 1rem 2rem;
  overflow-x: auto;
}

.date-nav {
  display: flex;
  gap: 0.5rem;
  font-family: var(--font-mono);
  font-size: 0.875rem;
}

.date-link {
  padding: 0.5rem 1rem;
  color: var(--text-secondary);
  text-decoration: none;
  border-radius: 4px;
  transition: all 0.2s;
  white-space: nowrap;
}

.date-link:hover {
  background: var(--bg-primary);
  color: var(--accent);
}

.date-link.active {
  background: var(--accent);
  color: white;
}

/* Main content */
.container {
  max-width: 900px;
  margin: 0 auto;
  padding: 3rem 2rem;
}

.page-title {
  font-size: 2.5rem;
  font-weight: 700;
  margin-bottom: 0.5rem;
  font-family: var(--font-mono);
}

.page-subtitle {
  color: var(--text-muted);
  font-family: var(--font-mono);
  margin-bottom: 3rem;
}

.page-description {
  color: var(--text-secondary);
  margin-top: -2rem;
  margin-bottom: 3rem;
}

.lead,
.content-section {
  margin-bottom: 3rem;
}

.content-section h2 {
  font-size: 1.25rem;
  margin-bottom: 1rem;
}

.container p,
.container ul,
.container ol,
.container pre,
.container table,
.container blockquote {
  margin-bottom: 0.75rem;
}

.container ul,
.container ol {
  padding-left: 1.5rem;
}

.container a {
  color: var(--accent);
}

.container code {
  font-family: var(--font-mono);
  font-size: 0.85em;
  background: var(--code-bg);
  padding: 0.1rem 0.3rem;
  border-radius: 4px;
}

.container pre {
  background: var(--code-bg);
  padding: 1rem;
  border-radius: 8px;
  overflow-x: auto;
}

.container pre code {
  padding: 0;
  background: none;
}

.container blockquote {
  border-left: 3px solid var(--border);
  padding-left: 1rem;
  color: var(--text-secondary);
}

/* Summary panel */
.summary-section {
  background: var(--bg-secondary);
  border-radius: 12px;
  padding: 1.5rem;
  margin-bottom: 3rem;
}

.section-title {
  font-size: 0.875rem;
  font-weight: 600;
  color: var(--text-muted);
  text-transform: uppercase;
  letter-spacing: 0.05em;
  margin-bottom: 1rem;
  font-family: var(--font-mono);
}

.summary-section li {
  padding: 0.5rem 0;
  border-bottom: 1px solid var(--border);
}

.summary-section li:last-child {
  border-bottom: none;
}

.summary-section strong {
  color: var(--accent);
  margin-right: 0.25rem;
}

/* Star tiers */
.news-section {
  margin-bottom: 3rem;
}

.section-header {
  display: flex;
  align-items: center;
  gap: 0.75rem;
  margin-bottom: 1.5rem;
  padding-bottom: 0.75rem;
  border-bottom: 2px solid var(--border);
}

.section-name {
  font-size: 1.25rem;
  font-weight: 600;
}

.star-rating {
  color: var(--star);
  font-size: 0.875rem;
}

.news-item {
  padding: 1.5rem;
  margin-bottom: 1rem;
  background: white;
  border: 1px solid var(--border-light);
  border-radius: 8px;
  transition: all 0.2s;
}

.news-item:hover {
  border-color: var(--accent);
  box-shadow: 0 4px 12px rgba(37, 99, 235, 0.08);
}

.news-header {
  display: flex;
  justify-content: space-between;
  align-items: flex-start;
  gap: 1rem;
  margin-bottom: 0.75rem;
}

.news-title,
.news-item strong a {
  font-size: 1.125rem;
  font-weight: 600;
  color: var(--text-primary);
  text-decoration: none;
  line-height: 1.4;
}

.news-title:hover,
.news-item strong a:hover {
  color: var(--accent);
}

.news-meta {
  font-family: var(--font-mono);
  font-size: 0.75rem;
  color: var(--text-muted);
  background: var(--code-bg);
  padding: 0.25rem 0.5rem;
  border-radius: 4px;
  white-space: nowrap;
}

.news-summary,
.news-item p {
  color: var(--text-secondary);
  line-height: 1.7;
}

.news-item code {
  font-size: 0.75rem;
  color: var(--text-muted);
}

.news-section hr {
  margin: 2rem 0 1rem;
  border: none;
  border-top: 1px solid var(--border);
}

.text-muted {
  color: var(--text-muted);
}

/* Footer */
.footer {
  margin-top: 4rem;
  padding-top: 2rem;
  border-top: 1px solid var(--border);
  text-align: center;
  color: var(--text-muted);
  font-family: var(--font-mono);
  font-size: 0.875rem;
}

@media (max-width: 768px) {
  .container {
    padding: 1.5rem;
  }

  .page-title {
    font-size: 1.75rem;
  }

  .news-header {
    flex-direction: column;
    gap: 0.5rem;
  }

  .nav-container {
    padding: 0.75rem 1rem;
  }
}
"#;
