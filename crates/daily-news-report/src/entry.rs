//! Article entries inside star tiers.

use std::ops::Range;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::parser::markdown_options;

/// One article inside a star tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Full Markdown of the entry
    pub markdown: String,
    /// Card fields, when the entry has the generator's shape
    pub card: Option<Card>,
}

/// Title line, meta badge and summary of an entry.
///
/// The generator writes entries as
///
/// ```text
/// **[Title](https://example.com/article)**
/// `Source · 5 min`
/// Summary text.
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Link text of the leading bold link
    pub title: String,
    /// Link target
    pub url: String,
    /// Code span on the line after the title
    pub meta: Option<String>,
    /// Remaining Markdown after the title and meta lines
    pub summary: String,
}

impl Entry {
    /// Split an entry into card fields, keeping the raw Markdown as fallback.
    pub fn parse(markdown: &str) -> Self {
        Self {
            markdown: markdown.to_string(),
            card: parse_card(markdown),
        }
    }
}

fn parse_card(markdown: &str) -> Option<Card> {
    let events: Vec<(Event<'_>, Range<usize>)> = Parser::new_ext(markdown, markdown_options())
        .into_offset_iter()
        .collect();

    let [(Event::Start(Tag::Paragraph), _), (Event::Start(Tag::Strong), _), (Event::Start(Tag::Link { dest_url, .. }), _), rest @ ..] =
        events.as_slice()
    else {
        return None;
    };

    let mut title = String::new();
    let mut idx = 0;
    loop {
        match &rest.get(idx)?.0 {
            Event::Text(t) | Event::Code(t) => title.push_str(t),
            Event::End(TagEnd::Link) => break,
            // Nested markup in the title line is left to the raw fallback
            _ => return None,
        }
        idx += 1;
    }

    // The bold link must be the whole title line
    if !matches!(rest.get(idx + 1), Some((Event::End(TagEnd::Strong), _))) {
        return None;
    }

    let summary_start = match rest.get(idx + 2)? {
        (Event::End(TagEnd::Paragraph), range) => range.end,
        (Event::SoftBreak | Event::HardBreak, range) => match (rest.get(idx + 3), rest.get(idx + 4)) {
            (
                Some((Event::Code(meta), meta_range)),
                Some((Event::SoftBreak | Event::HardBreak | Event::End(TagEnd::Paragraph), _)),
            ) => {
                return Some(Card {
                    title: title.trim().to_string(),
                    url: dest_url.to_string(),
                    meta: Some(meta.trim().to_string()),
                    summary: markdown[meta_range.end..].trim().to_string(),
                });
            }
            _ => range.end,
        },
        _ => return None,
    };

    Some(Card {
        title: title.trim().to_string(),
        url: dest_url.to_string(),
        meta: None,
        summary: markdown[summary_start..].trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_generator_entry() {
        let entry = Entry::parse(
            "**[Rust 1.84 released](https://blog.rust-lang.org/)**\n`Rust Blog · 5 min`\nTrait upcasting is finally here.",
        );

        assert_eq!(
            entry.card,
            Some(Card {
                title: "Rust 1.84 released".to_string(),
                url: "https://blog.rust-lang.org/".to_string(),
                meta: Some("Rust Blog · 5 min".to_string()),
                summary: "Trait upcasting is finally here.".to_string(),
            })
        );
    }

    #[test]
    fn meta_is_optional() {
        let entry = Entry::parse("**[Small wins](https://example.com/small)**\nShort summary.");

        let card = entry.card.unwrap();
        assert_eq!(card.meta, None);
        assert_eq!(card.summary, "Short summary.");
    }

    #[test]
    fn summary_can_span_paragraphs() {
        let entry = Entry::parse(
            "**[Async](https://example.com/async)**\n`example.com · 12 min`\n\nFirst paragraph.\n\n- a point",
        );

        let card = entry.card.unwrap();
        assert_eq!(card.meta.as_deref(), Some("example.com · 12 min"));
        assert_eq!(card.summary, "First paragraph.\n\n- a point");
    }

    #[test]
    fn title_alone_in_paragraph() {
        let entry = Entry::parse("**[Only a title](https://example.com)**\n\nBody below.");

        let card = entry.card.unwrap();
        assert_eq!(card.title, "Only a title");
        assert_eq!(card.summary, "Body below.");
    }

    #[test]
    fn leading_code_word_is_summary_not_meta() {
        let entry = Entry::parse("**[Tokio](https://tokio.rs)**\n`tokio` got faster.");

        let card = entry.card.unwrap();
        assert_eq!(card.meta, None);
        assert_eq!(card.summary, "`tokio` got faster.");
    }

    #[test]
    fn other_shapes_fall_back_to_markdown() {
        let trailing = Entry::parse("**[A](https://a.example)** and more on the same line");
        assert_eq!(trailing.card, None);
        assert_eq!(
            trailing.markdown,
            "**[A](https://a.example)** and more on the same line"
        );

        assert_eq!(Entry::parse("**[*Styled* title](https://a.example)**").card, None);
        assert_eq!(Entry::parse("Plain paragraph").card, None);
    }
}
