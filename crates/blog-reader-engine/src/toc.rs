use crate::model::{Block, BlockStyle};
use crate::visibility::{SectionKey, VisibilityCollector};

/// An h1/h2 heading listed in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub key: String,
    /// 1 for h1, 2 for h2
    pub level: u8,
    pub text: String,
}

impl Heading {
    pub fn section(&self) -> SectionKey {
        SectionKey::from(self.key.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub heading: Heading,
    pub highlighted: bool,
}

/// Section headings of a body, in body order.
pub fn headings(body: &[Block]) -> Vec<Heading> {
    body.iter()
        .filter_map(Block::as_normal)
        .filter(|block| block.style.starts_section())
        .map(|block| Heading {
            key: block.key.clone(),
            level: if block.style == BlockStyle::H1 { 1 } else { 2 },
            text: block.inner_text(),
        })
        .collect()
}

/// Table of contents with each entry highlighted while its section is on screen.
pub fn toc_entries(body: &[Block], collector: &VisibilityCollector) -> Vec<TocEntry> {
    headings(body)
        .into_iter()
        .map(|heading| TocEntry {
            highlighted: collector.is_section_visible(&heading.section()),
            heading,
        })
        .collect()
}
