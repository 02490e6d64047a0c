//! Daily report parser.
//!
//! Reads one dated Markdown report: the date comes from the file name, an optional
//! YAML frontmatter block may override the title, and `##` sections are
//! classified into the summary, star tiers and plain content.

pub mod date;
pub mod entry;
pub mod frontmatter;
pub mod parser;
pub mod tier;

pub use date::{DateError, ReportDate};
pub use entry::{Card, Entry};
pub use frontmatter::{Frontmatter, FrontmatterError};
pub use parser::{markdown_options, parse_report, slugify, ParseError, ParsedReport, Section};
pub use tier::{SectionKind, StarTier};
