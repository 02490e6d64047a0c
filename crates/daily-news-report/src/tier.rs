//! Section classification for report headings.

/// Star rating grouping used by the report generator.
///
/// Tiers are free text in the source Markdown; a `##` heading is matched
/// against a few known spellings and anything else is an ordinary section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarTier {
    FiveStar,
    FourStar,
    WorthALook,
}

impl StarTier {
    /// Star glyphs shown next to the section name.
    pub fn stars(&self) -> &'static str {
        match self {
            Self::FiveStar => "★★★★★",
            Self::FourStar => "★★★★☆",
            Self::WorthALook => "★★★☆☆",
        }
    }

    /// Suffix for the `tier-*` CSS class.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::FiveStar => "five-star",
            Self::FourStar => "four-star",
            Self::WorthALook => "worth-a-look",
        }
    }

    fn from_heading(normalized: &str) -> Option<Self> {
        const FIVE: &[&str] = &["五星", "five star", "5 star", "★★★★★"];
        const FOUR: &[&str] = &["四星", "four star", "4 star", "★★★★☆"];
        const WORTH: &[&str] = &["值得一看", "worth a look", "worth viewing", "★★★☆☆"];

        let matches = |prefixes: &[&str]| prefixes.iter().any(|p| normalized.starts_with(p));

        if matches(FIVE) {
            Some(Self::FiveStar)
        } else if matches(FOUR) {
            Some(Self::FourStar)
        } else if matches(WORTH) {
            Some(Self::WorthALook)
        } else {
            None
        }
    }
}

/// What a `##` section of a report holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// The digest summary (`## 导读`)
    Summary,
    /// A star tier with article entries
    Tier(StarTier),
    /// Any other section
    Other,
}

impl SectionKind {
    /// Classify a section by its heading text.
    pub fn from_heading(heading: &str) -> Self {
        let normalized = normalize(heading);

        if ["导读", "summary", "overview", "tl;dr", "tldr"]
            .iter()
            .any(|p| normalized.starts_with(p))
        {
            return Self::Summary;
        }

        StarTier::from_heading(&normalized)
            .map(Self::Tier)
            .unwrap_or(Self::Other)
    }

    /// Tier of this section, if it is one.
    pub fn tier(&self) -> Option<StarTier> {
        match self {
            Self::Tier(tier) => Some(*tier),
            _ => None,
        }
    }
}

/// Lowercase, collapse dashes and runs of whitespace to single spaces.
fn normalize(heading: &str) -> String {
    heading
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
