use serde::Deserialize;

use super::span::{InlineSpan, MarkDef};

/// One structural unit of rich-text content.
///
/// The CMS tags every object with `_type`; tags this crate does not know about
/// decode as [`Block::Unknown`] and render as nothing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "_type")]
pub enum Block {
    /// Paragraph, heading, quote line or list item
    #[serde(rename = "block")]
    Normal(NormalBlock),
    /// Source code passed to the syntax highlighter
    #[serde(rename = "code")]
    Code(CodeBlock),
    /// Image asset resolved to a URL at render time
    #[serde(rename = "image")]
    Image(ImageBlock),
    #[serde(other)]
    Unknown,
}

impl Block {
    /// Stable per-document key, `None` for unknown block types.
    pub fn key(&self) -> Option<&str> {
        match self {
            Block::Normal(b) => Some(&b.key),
            Block::Code(b) => Some(&b.key),
            Block::Image(b) => Some(&b.key),
            Block::Unknown => None,
        }
    }

    pub fn as_normal(&self) -> Option<&NormalBlock> {
        match self {
            Block::Normal(b) => Some(b),
            _ => None,
        }
    }

    /// True for h1/h2 blocks, which open a new table-of-contents section.
    pub fn starts_section(&self) -> bool {
        self.as_normal().is_some_and(|b| b.style.starts_section())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalBlock {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(default)]
    pub style: BlockStyle,
    #[serde(default)]
    pub children: Vec<InlineSpan>,
    #[serde(default)]
    pub mark_defs: Vec<MarkDef>,
    /// Presence makes this block a list item regardless of `style`.
    #[serde(default)]
    pub list_item: Option<ListKind>,
}

impl NormalBlock {
    /// Plain text of the block with all marks dropped.
    pub fn inner_text(&self) -> String {
        self.children.iter().map(|span| span.text.as_str()).collect()
    }
}

/// Block style as sent by the CMS. Unrecognized styles render as paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStyle {
    #[default]
    Normal,
    H1,
    H2,
    H3,
    H4,
    H5,
    Blockquote,
    #[serde(other)]
    Unknown,
}

impl BlockStyle {
    pub fn heading_level(self) -> Option<u8> {
        match self {
            BlockStyle::H1 => Some(1),
            BlockStyle::H2 => Some(2),
            BlockStyle::H3 => Some(3),
            BlockStyle::H4 => Some(4),
            BlockStyle::H5 => Some(5),
            _ => None,
        }
    }

    pub fn starts_section(self) -> bool {
        matches!(self, BlockStyle::H1 | BlockStyle::H2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Number,
    Bullet,
    /// Any other list style; rendered like a bullet list
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub code: String,
    /// 1-based line numbers to emphasize
    #[serde(default)]
    pub highlighted_lines: Option<Vec<usize>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageBlock {
    #[serde(rename = "_key")]
    pub key: String,
    pub asset: AssetRef,
}

/// Opaque reference to a CMS asset, resolved by an
/// [`ImageUrlBuilder`](crate::render::ImageUrlBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(rename = "_type")]
    pub kind: String,
}
