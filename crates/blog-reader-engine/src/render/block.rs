use crate::model::{Block, CodeBlock, ImageBlock, NormalBlock};
use crate::render::highlight::{PlainHighlighter, SyntaxHighlighter, line_decorations};
use crate::render::image::ImageUrlBuilder;
use crate::render::inline::render_spans;
use crate::render::Node;

/// Renders a paragraph or heading.
///
/// Headings get `id` set to the block key and link to themselves so that a
/// section can be addressed as `#<key>`.
pub fn render_paragraph(block: &NormalBlock) -> Node {
    let spans = render_spans(&block.children, &block.mark_defs);

    match heading_tag(block) {
        Some(tag) => Node::element(tag)
            .attr("id", block.key.as_str())
            .child(
                Node::element("a")
                    .attr("href", format!("#{}", block.key))
                    .children(spans),
            )
            .into(),
        None => Node::element("p").children(spans).into(),
    }
}

fn heading_tag(block: &NormalBlock) -> Option<&'static str> {
    match block.style.heading_level()? {
        1 => Some("h1"),
        2 => Some("h2"),
        3 => Some("h3"),
        4 => Some("h4"),
        _ => Some("h5"),
    }
}

/// Per-block dispatch with the external collaborators it needs.
pub struct BlockRenderer<'r> {
    pub highlighter: &'r dyn SyntaxHighlighter,
    pub image_urls: &'r dyn ImageUrlBuilder,
    pub max_image_width: u32,
}

impl BlockRenderer<'_> {
    /// Renders one block. Unknown block types and unresolvable images yield `None`.
    pub fn render(&self, block: &Block) -> Option<Node> {
        match block {
            Block::Normal(block) => Some(render_paragraph(block)),
            Block::Code(block) => Some(self.render_code(block)),
            Block::Image(block) => self.render_image(block),
            Block::Unknown => {
                log::debug!("Skipping block of unknown type");
                None
            }
        }
    }

    fn render_code(&self, block: &CodeBlock) -> Node {
        let decorations = line_decorations(block.highlighted_lines.as_deref().unwrap_or_default());

        let markup = self
            .highlighter
            .highlight(&block.code, &block.language, &decorations)
            .unwrap_or_else(|e| {
                log::warn!("Code block {} falls back to plain rendering: {e}", block.key);
                PlainHighlighter::render(&block.code, &block.language, &decorations)
            });

        Node::element("div")
            .attr("class", "shiki-code")
            .child(Node::Raw(markup))
            .into()
    }

    fn render_image(&self, block: &ImageBlock) -> Option<Node> {
        let url = match self.image_urls.url(&block.asset, self.max_image_width) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("Skipping image block {}: {e}", block.key);
                return None;
            }
        };

        Some(
            Node::element("div")
                .attr("class", "w-full")
                .child(Node::element("img").attr("class", "mx-auto").attr("src", url))
                .into(),
        )
    }
}
