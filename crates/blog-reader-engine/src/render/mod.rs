//! Turning blocks into a [`Node`] tree.
//!
//! Rendering happens in two steps: [`group_blocks`] folds the flat body into
//! [`ContentGroup`]s, then each group is rendered with [`render_paragraph`] and
//! [`BlockRenderer`]. Syntax highlighting and image URLs come from the
//! [`SyntaxHighlighter`] and [`ImageUrlBuilder`] collaborators.

pub mod block;
pub mod group;
pub mod highlight;
pub mod image;
pub mod inline;
pub mod node;

pub use block::{BlockRenderer, render_paragraph};
pub use group::{ContentGroup, Role, group_blocks};
pub use highlight::{
    HighlightError, LineDecoration, LinePosition, PlainHighlighter, SyntaxHighlighter,
    line_decorations,
};
pub use image::{AssetError, DEFAULT_MAX_IMAGE_WIDTH, ImageUrlBuilder, SanityImageUrlBuilder};
pub use inline::{render_span, render_spans};
pub use node::{Element, Node};
