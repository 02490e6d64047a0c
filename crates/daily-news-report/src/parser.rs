//! Report document parser.

use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::entry::Entry;
use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
use crate::tier::SectionKind;

/// A parsed report document.
#[derive(Debug, Clone)]
pub struct ParsedReport {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Text of the leading `#` heading, removed from the body
    pub title: Option<String>,

    /// Markdown before the first `##` section
    pub lead: String,

    /// Top-level `##` sections in document order
    pub sections: Vec<Section>,
}

/// One `##` section of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Heading text
    pub heading: String,
    /// Anchor ID
    pub id: String,
    /// Summary, star tier or plain section
    pub kind: SectionKind,
    /// Markdown before the first entry (the whole body for non-tier sections)
    pub intro: String,
    /// Article entries, only filled for star tiers
    pub entries: Vec<Entry>,
    /// Markdown after the last entry's closing `---` rule, rule included
    pub trailer: String,
}

/// Errors that can occur when parsing a report.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Markdown extensions enabled for reports.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Parse a report document.
///
/// Splits the body at top-level `##` headings and, inside star tiers, at
/// paragraphs opening with a bold link (`**[title](url)**`). Headings nested
/// in lists, quotes or code blocks never split the document. A top-level
/// `---` rule closes the entry it follows, so page footers never end up
/// inside the last article.
pub fn parse_report(source: &str) -> Result<ParsedReport, ParseError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let (frontmatter, content) = extract_frontmatter(source)?;

    let events: Vec<(Event<'_>, Range<usize>)> = Parser::new_ext(content, markdown_options())
        .into_offset_iter()
        .collect();

    let mut title: Option<(String, Range<usize>)> = None;
    let mut headings: Vec<(String, Range<usize>)> = Vec::new();
    let mut entry_starts: Vec<usize> = Vec::new();
    let mut rules: Vec<Range<usize>> = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < events.len() {
        let (event, range) = &events[i];

        if depth == 0 {
            match event {
                Event::Start(Tag::Heading { level, .. })
                    if matches!(level, HeadingLevel::H1 | HeadingLevel::H2) =>
                {
                    let (text, end) = heading_text(&events, i);
                    if *level == HeadingLevel::H2 {
                        headings.push((text, range.clone()));
                    } else if title.is_none() && headings.is_empty() {
                        title = Some((text, range.clone()));
                    }
                    // Resume after the heading's End event, depth is unchanged
                    i = end + 1;
                    continue;
                }
                Event::Start(Tag::Paragraph) if opens_entry(&events[i + 1..]) => {
                    entry_starts.push(range.start);
                }
                Event::Rule => rules.push(range.clone()),
                _ => {}
            }
        }

        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }

    let lead_end = headings
        .first()
        .map(|(_, r)| r.start)
        .unwrap_or(content.len());

    let lead = match &title {
        Some((_, r)) => format!("{}{}", &content[..r.start], &content[r.end..lead_end]),
        None => content[..lead_end].to_string(),
    };

    let mut sections = Vec::with_capacity(headings.len());
    for (idx, (heading, range)) in headings.iter().enumerate() {
        let body_start = range.end;
        let body_end = headings
            .get(idx + 1)
            .map(|(_, r)| r.start)
            .unwrap_or(content.len());

        let kind = SectionKind::from_heading(heading);

        let (intro, entries, trailer) = if kind.tier().is_some() {
            let starts: Vec<usize> = entry_starts
                .iter()
                .copied()
                .filter(|s| (body_start..body_end).contains(s))
                .collect();
            split_entries(content, body_start..body_end, &starts, &rules)
        } else {
            (
                content[body_start..body_end].trim().to_string(),
                Vec::new(),
                String::new(),
            )
        };

        sections.push(Section {
            heading: heading.clone(),
            id: slugify(heading),
            kind,
            intro,
            entries,
            trailer,
        });
    }

    Ok(ParsedReport {
        frontmatter,
        title: title.map(|(text, _)| text),
        lead: lead.trim().to_string(),
        sections,
    })
}

/// Collect the plain text of the heading starting at `start`.
///
/// Returns the text and the index of the heading's End event.
fn heading_text(events: &[(Event<'_>, Range<usize>)], start: usize) -> (String, usize) {
    let mut text = String::new();

    for (idx, (event, _)) in events.iter().enumerate().skip(start + 1) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Heading(_)) => return (text.trim().to_string(), idx),
            _ => {}
        }
    }

    (text.trim().to_string(), events.len())
}

/// A paragraph opens an entry when its first inline is a bold link.
fn opens_entry(rest: &[(Event<'_>, Range<usize>)]) -> bool {
    matches!(
        rest,
        [(Event::Start(Tag::Strong), _), (Event::Start(Tag::Link { .. }), _), ..]
    )
}

/// Split a tier body into intro, entries and trailer.
///
/// An entry runs to the next entry start. A top-level rule inside that span
/// is a separator: it is dropped between entries, and after the last entry
/// it starts the trailer.
fn split_entries(
    content: &str,
    body: Range<usize>,
    starts: &[usize],
    rules: &[Range<usize>],
) -> (String, Vec<Entry>, String) {
    let intro_end = starts.first().copied().unwrap_or(body.end);
    let intro = content[body.start..intro_end].trim().to_string();
    let mut trailer = String::new();

    let mut entries = Vec::with_capacity(starts.len());
    for (n, &start) in starts.iter().enumerate() {
        let next = starts.get(n + 1).copied();
        let end = next.unwrap_or(body.end);
        let rule = rules.iter().find(|r| r.start > start && r.start < end);

        let markdown = match rule {
            None => content[start..end].trim().to_string(),
            Some(rule) if next.is_none() => {
                trailer = content[rule.start..end].trim().to_string();
                content[start..rule.start].trim().to_string()
            }
            Some(rule) => {
                let before = content[start..rule.start].trim();
                let after = content[rule.end.min(end)..end].trim();
                if after.is_empty() {
                    before.to_string()
                } else {
                    format!("{before}\n\n{after}")
                }
            }
        };

        entries.push(Entry::parse(&markdown));
    }

    (intro, entries, trailer)
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::StarTier;
    use pretty_assertions::assert_eq;

    const REPORT: &str = r#"# Daily News 2025-01-02

## 导读

- **AI**：模型发布密集
- **Rust**：新版本稳定

## 五星推荐

**[Rust 1.84 released](https://blog.rust-lang.org/)**
`Rust Blog · 5 min`
Trait upcasting is finally here.

**[A deep dive into async](https://example.com/async)**
`example.com · 12 min`
Long read on executors.

## 四星推荐

**[Small wins](https://example.com/small)**
Short summary.

## 值得一看

Also around today.

**[Weekly links](https://example.com/weekly)**
`example.com · 3 min`
A grab bag.

---
*Generated by daily-news*
"#;

    #[test]
    fn parses_complete_report() {
        let doc = parse_report(REPORT).unwrap();

        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.title.as_deref(), Some("Daily News 2025-01-02"));
        assert_eq!(doc.lead, "");

        let kinds: Vec<SectionKind> = doc.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Summary,
                SectionKind::Tier(StarTier::FiveStar),
                SectionKind::Tier(StarTier::FourStar),
                SectionKind::Tier(StarTier::WorthALook),
            ]
        );

        let summary = &doc.sections[0];
        assert!(summary.intro.contains("**AI**：模型发布密集"));
        assert!(summary.entries.is_empty());

        let five = &doc.sections[1];
        assert_eq!(five.heading, "五星推荐");
        assert_eq!(five.intro, "");
        assert_eq!(five.entries.len(), 2);
        assert!(five.entries[0].markdown.starts_with("**[Rust 1.84 released]"));
        assert!(five.entries[0].markdown.contains("Trait upcasting"));
        assert!(!five.entries[0].markdown.contains("deep dive"));
        assert!(five.entries[1].markdown.contains("Long read on executors."));

        let card = five.entries[0].card.as_ref().unwrap();
        assert_eq!(card.title, "Rust 1.84 released");
        assert_eq!(card.url, "https://blog.rust-lang.org/");
        assert_eq!(card.meta.as_deref(), Some("Rust Blog · 5 min"));
        assert_eq!(card.summary, "Trait upcasting is finally here.");

        assert_eq!(doc.sections[2].entries.len(), 1);
        assert_eq!(five.trailer, "");

        let worth = &doc.sections[3];
        assert_eq!(worth.intro, "Also around today.");
        assert_eq!(worth.entries.len(), 1);
        assert_eq!(
            worth.entries[0].card.as_ref().unwrap().summary,
            "A grab bag."
        );
        assert_eq!(worth.trailer, "---\n*Generated by daily-news*");
    }

    #[test]
    fn footer_rule_stays_out_of_last_entry() {
        let source = "## 值得一看\n\n**[Only](https://only.example)**\nSummary.\n\n---\n*Generated by daily-news skill*\n";

        let doc = parse_report(source).unwrap();

        let worth = &doc.sections[0];
        assert_eq!(worth.entries.len(), 1);
        assert_eq!(
            worth.entries[0].markdown,
            "**[Only](https://only.example)**\nSummary."
        );
        assert!(!worth.entries[0].markdown.contains("Generated"));
        assert!(worth.trailer.starts_with("---"));
        assert!(worth.trailer.contains("*Generated by daily-news skill*"));
    }

    #[test]
    fn rule_between_entries_is_dropped() {
        let source = "## Five Star\n\n**[A](https://a.example)**\nFirst.\n\n---\n\n**[B](https://b.example)**\nSecond.\n";

        let doc = parse_report(source).unwrap();

        let tier = &doc.sections[0];
        assert_eq!(tier.entries.len(), 2);
        assert_eq!(tier.entries[0].markdown, "**[A](https://a.example)**\nFirst.");
        assert_eq!(tier.trailer, "");
    }

    #[test]
    fn rule_inside_quote_is_not_a_separator() {
        let source = "## Five Star\n\n**[A](https://a.example)**\n\n> quoted\n>\n> ---\n\nStill A.\n";

        let doc = parse_report(source).unwrap();

        let tier = &doc.sections[0];
        assert!(tier.entries[0].markdown.contains("Still A."));
        assert_eq!(tier.trailer, "");
    }

    #[test]
    fn leading_rule_is_not_frontmatter() {
        let source = "---\n\nToday in brief.\n\n## 五星推荐\n\n**[A](https://a.example)**\nSummary.\n\n---\n*Generated by daily-news*\n";

        let doc = parse_report(source).unwrap();

        assert!(doc.frontmatter.is_none());
        assert!(doc.lead.contains("Today in brief."));
        assert_eq!(doc.sections[0].entries.len(), 1);
        assert!(doc.sections[0].trailer.contains("Generated by daily-news"));
    }

    #[test]
    fn keeps_lead_without_title() {
        let source = "Intro paragraph.\n\n## Links\n\n- [one](https://one.example)\n";

        let doc = parse_report(source).unwrap();

        assert_eq!(doc.title, None);
        assert_eq!(doc.lead, "Intro paragraph.");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].kind, SectionKind::Other);
        assert_eq!(doc.sections[0].id, "links");
        assert!(doc.sections[0].intro.contains("[one](https://one.example)"));
    }

    #[test]
    fn removes_title_but_keeps_surrounding_lead() {
        let source = "Before.\n\n# Title\n\nAfter.\n";

        let doc = parse_report(source).unwrap();

        assert_eq!(doc.title.as_deref(), Some("Title"));
        assert!(doc.lead.contains("Before."));
        assert!(doc.lead.contains("After."));
        assert!(!doc.lead.contains("# Title"));
    }

    #[test]
    fn ignores_headings_in_code_and_quotes() {
        let source = r#"## 五星推荐

```markdown
## not a section
**[not an entry](https://x.example)**
```

> ## quoted heading

**[Real entry](https://real.example)**
"#;

        let doc = parse_report(source).unwrap();

        assert_eq!(doc.sections.len(), 1);
        let tier = &doc.sections[0];
        assert!(tier.intro.contains("## not a section"));
        assert!(tier.intro.contains("> ## quoted heading"));
        assert_eq!(tier.entries.len(), 1);
        assert!(tier.entries[0].markdown.contains("Real entry"));
    }

    #[test]
    fn plain_bold_text_does_not_open_entry() {
        let source = "## Four Star\n\n**Heads up** nothing linked here\n";

        let doc = parse_report(source).unwrap();

        assert!(doc.sections[0].entries.is_empty());
        assert!(doc.sections[0].intro.contains("**Heads up**"));
    }

    #[test]
    fn later_h1_stays_in_body() {
        let source = "## Notes\n\n# Appendix\n\ntext\n";

        let doc = parse_report(source).unwrap();

        assert_eq!(doc.title, None);
        assert!(doc.sections[0].intro.contains("# Appendix"));
    }

    #[test]
    fn reads_frontmatter_and_bom() {
        let source = "\u{feff}---\ntitle: Override\n---\n# Daily News\n";

        let doc = parse_report(source).unwrap();

        assert_eq!(
            doc.frontmatter.and_then(|f| f.title).as_deref(),
            Some("Override")
        );
        assert_eq!(doc.title.as_deref(), Some("Daily News"));
    }

    #[test]
    fn heading_text_includes_code_spans() {
        let doc = parse_report("## Release of `tokio` 2\n").unwrap();

        assert_eq!(doc.sections[0].heading, "Release of tokio 2");
    }

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Five-Star Picks"), "five-star-picks");
        assert_eq!(slugify("五星推荐"), "五星推荐");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }
}
