//! Markdown to HTML conversion for report bodies.

use daily_news_report::{markdown_options, Entry, ParsedReport, Section, SectionKind};
use pulldown_cmark::{html, Parser};

use crate::templates::{CardView, EntryView, SectionView};

/// Render a Markdown fragment to HTML.
///
/// Never fails: pulldown-cmark accepts any input, and raw HTML in reports is
/// passed through unchanged.
pub fn render_markdown(markdown: &str) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }

    let parser = Parser::new_ext(markdown, markdown_options());

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

/// Render every section of a report.
pub fn section_views(doc: &ParsedReport) -> Vec<SectionView> {
    doc.sections.iter().map(section_view).collect()
}

fn section_view(section: &Section) -> SectionView {
    let (kind, tier) = match section.kind {
        SectionKind::Summary => ("summary", None),
        SectionKind::Tier(tier) => ("tier", Some(tier)),
        SectionKind::Other => ("other", None),
    };

    SectionView {
        heading: section.heading.clone(),
        id: section.id.clone(),
        kind,
        tier: tier.map(|t| t.css_class()),
        stars: tier.map(|t| t.stars()),
        intro: render_markdown(&section.intro),
        entries: section.entries.iter().map(entry_view).collect(),
        trailer: render_markdown(&section.trailer),
    }
}

fn entry_view(entry: &Entry) -> EntryView {
    match &entry.card {
        Some(card) => EntryView {
            html: String::new(),
            card: Some(CardView {
                title: card.title.clone(),
                url: card.url.clone(),
                meta: card.meta.clone(),
                summary: render_markdown(&card.summary),
            }),
        },
        None => EntryView {
            html: render_markdown(&entry.markdown),
            card: None,
        },
    }
}
