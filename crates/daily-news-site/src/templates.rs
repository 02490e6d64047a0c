//! Template engine for rendering report pages.

use minijinja::{context, Environment};

/// A date link in the navigation bar.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NavItem {
    /// Report date, `YYYY-MM-DD`
    pub date: String,
    /// Relative link to the dated page
    pub href: String,
    /// Whether this is the page being rendered
    pub active: bool,
}

/// A rendered `##` section of a report.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SectionView {
    /// Heading text
    pub heading: String,
    /// Anchor ID
    pub id: String,
    /// `summary`, `tier` or `other`
    pub kind: &'static str,
    /// CSS class suffix for tiers
    pub tier: Option<&'static str>,
    /// Star glyphs for tiers
    pub stars: Option<&'static str>,
    /// HTML before the first entry
    pub intro: String,
    /// Article entries
    pub entries: Vec<EntryView>,
    /// HTML after the last entry
    pub trailer: String,
}

/// An article entry inside a tier.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EntryView {
    /// Rendered Markdown, used when the entry has no card shape
    pub html: String,
    /// Card fields
    pub card: Option<CardView>,
}

/// Title, meta badge and summary of an article card.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CardView {
    pub title: String,
    pub url: String,
    pub meta: Option<String>,
    /// Rendered summary HTML
    pub summary: String,
}

/// Context for rendering a report page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// `<html lang>` value
    pub lang: String,
    /// Site title
    pub site_title: String,
    /// Page heading
    pub title: String,
    /// Report date, `YYYY-MM-DD`
    pub date: String,
    /// Optional one-line description
    pub description: Option<String>,
    /// Rendered HTML before the first section
    pub lead: String,
    /// Rendered sections
    pub sections: Vec<SectionView>,
    /// Placeholder shown in the summary panel when the report has none
    pub empty_summary: String,
    /// Date navigation, newest first
    pub nav: Vec<NavItem>,
    /// Inline stylesheet
    pub stylesheet: String,
    /// Footer text
    pub footer: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in layout.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template("base.html", BASE_TEMPLATE)
            .expect("Failed to add base template");

        env.add_template("report.html", REPORT_TEMPLATE)
            .expect("Failed to add report template");

        env.add_template("nav.html", NAV_TEMPLATE)
            .expect("Failed to add nav template");

        Self { env }
    }

    /// Render a report page.
    pub fn render_page(&self, context: &Context) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("report.html")?;

        tmpl.render(context! {
            lang => &context.lang,
            site_title => &context.site_title,
            title => &context.title,
            date => &context.date,
            description => &context.description,
            lead => &context.lead,
            sections => &context.sections,
            has_summary => context.sections.iter().any(|s| s.kind == "summary"),
            empty_summary => &context.empty_summary,
            nav => &context.nav,
            stylesheet => &context.stylesheet,
            footer => &context.footer,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{ site_title }} - {{ date }}</title>
  <style>{{ stylesheet | safe }}</style>
</head>
<body>
  <header class="terminal-header">
    <div class="terminal-line">
      <span class="terminal-prompt">$</span>
      <span>daily-news --date {{ date }}</span>
      <span class="terminal-cursor"></span>
    </div>
    <div class="terminal-line">
      <span class="terminal-prompt">&gt;</span>
      <span>Generating report... Done.</span>
    </div>
  </header>
  <nav class="nav-container">
    {% include "nav.html" %}
  </nav>
  <main class="container">
    {% block content %}{% endblock %}
    <footer class="footer">
      <p>{{ footer }}</p>
    </footer>
  </main>
</body>
</html>
"##;

const REPORT_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<h1 class="page-title">{{ title }}</h1>
<p class="page-subtitle">// {{ date }}</p>
{% if description %}<p class="page-description">{{ description }}</p>{% endif %}
{% if lead %}
<div class="lead">
{{ lead | safe }}
</div>
{% endif %}
{% if not has_summary %}
<section class="summary-section">
  <div class="section-title">$ cat summary.md</div>
  <p class="text-muted">{{ empty_summary }}</p>
</section>
{% endif %}
{% for section in sections %}
{% if section.kind == "summary" %}
<section class="summary-section" id="{{ section.id }}">
  <div class="section-title">$ cat summary.md</div>
  {{ section.intro | safe }}
</section>
{% elif section.kind == "tier" %}
<section class="news-section tier-{{ section.tier }}" id="{{ section.id }}">
  <div class="section-header">
    <span class="section-name">{{ section.heading }}</span>
    <span class="star-rating">{{ section.stars }}</span>
  </div>
  {% if section.intro %}<div class="section-intro">{{ section.intro | safe }}</div>{% endif %}
  {% for entry in section.entries %}
  <article class="news-item">
  {% if entry.card %}
    <div class="news-header">
      <a href="{{ entry.card.url }}" class="news-title" target="_blank" rel="noopener">{{ entry.card.title }}</a>
      {% if entry.card.meta %}<span class="news-meta">{{ entry.card.meta }}</span>{% endif %}
    </div>
    <div class="news-summary">{{ entry.card.summary | safe }}</div>
  {% else %}
  {{ entry.html | safe }}
  {% endif %}
  </article>
  {% endfor %}
  {{ section.trailer | safe }}
</section>
{% else %}
<section class="content-section" id="{{ section.id }}">
  <h2>{{ section.heading }}</h2>
  {{ section.intro | safe }}
</section>
{% endif %}
{% endfor %}
{% endblock %}"##;

const NAV_TEMPLATE: &str = r##"<div class="date-nav">
{% for item in nav %}
  <a href="{{ item.href }}" class="date-link{% if item.active %} active{% endif %}">{{ item.date }}</a>
{% endfor %}
</div>"##;
