use crate::model::{Block, ListKind, NormalBlock};
use crate::render::{
    BlockRenderer, ContentGroup, DEFAULT_MAX_IMAGE_WIDTH, ImageUrlBuilder, Node,
    SyntaxHighlighter, group_blocks, render_paragraph,
};
use crate::visibility::{SectionKey, VisibilityCollector, VisibilityHandle};

/// A block that reports its on-screen state to the [`VisibilityCollector`].
///
/// Top-level paragraphs and headings report under their own key. A quote or
/// list container reports once, under the key of its first block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityTarget {
    pub block_key: String,
    pub section: SectionKey,
}

impl VisibilityTarget {
    /// Mounts the target; see [`VisibilityCollector::track`].
    pub fn track(&self, collector: &VisibilityCollector) -> VisibilityHandle {
        collector.track(self.block_key.clone(), self.section.clone())
    }
}

/// Output of [`Reader::render`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBody {
    /// Top-level nodes in body order
    pub nodes: Vec<Node>,
    /// Visibility reporters in body order
    pub targets: Vec<VisibilityTarget>,
}

impl RenderedBody {
    /// HTML of every top-level node, one per line.
    pub fn to_html(&self) -> String {
        self.nodes
            .iter()
            .map(Node::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders a whole body: groups the blocks, renders each group and collects the
/// blocks that take part in section visibility tracking.
pub struct Reader {
    highlighter: Box<dyn SyntaxHighlighter>,
    image_urls: Box<dyn ImageUrlBuilder>,
    max_image_width: u32,
}

impl Reader {
    pub fn new(
        highlighter: impl SyntaxHighlighter + 'static,
        image_urls: impl ImageUrlBuilder + 'static,
    ) -> Self {
        Self {
            highlighter: Box::new(highlighter),
            image_urls: Box::new(image_urls),
            max_image_width: DEFAULT_MAX_IMAGE_WIDTH,
        }
    }

    pub fn with_max_image_width(mut self, max_image_width: u32) -> Self {
        self.max_image_width = max_image_width;
        self
    }

    pub fn max_image_width(&self) -> u32 {
        self.max_image_width
    }

    /// Renders `body`. Output order always follows body order, also when groups
    /// are rendered concurrently.
    pub fn render(&self, body: &[Block]) -> RenderedBody {
        let groups = group_blocks(body);
        log::debug!("Rendering {} blocks in {} groups", body.len(), groups.len());

        let rendered = self.render_groups(&groups);

        let mut nodes = Vec::with_capacity(rendered.len());
        let mut targets = Vec::new();
        for (node, target) in rendered {
            nodes.extend(node);
            targets.extend(target);
        }

        RenderedBody { nodes, targets }
    }

    #[cfg(not(feature = "parallel"))]
    fn render_groups(&self, groups: &[ContentGroup<'_>]) -> Vec<RenderedGroup> {
        groups.iter().map(|group| self.render_group(group)).collect()
    }

    #[cfg(feature = "parallel")]
    fn render_groups(&self, groups: &[ContentGroup<'_>]) -> Vec<RenderedGroup> {
        use rayon::prelude::*;

        groups
            .par_iter()
            .map(|group| self.render_group(group))
            .collect()
    }

    fn block_renderer(&self) -> BlockRenderer<'_> {
        BlockRenderer {
            highlighter: self.highlighter.as_ref(),
            image_urls: self.image_urls.as_ref(),
            max_image_width: self.max_image_width,
        }
    }

    fn render_group(&self, group: &ContentGroup<'_>) -> RenderedGroup {
        let section = SectionKey::from(group.section());

        match group {
            ContentGroup::Single { block, .. } => {
                let node = self.block_renderer().render(block);
                let target = match (block, &node) {
                    (Block::Normal(block), Some(_)) => Some(VisibilityTarget {
                        block_key: block.key.clone(),
                        section,
                    }),
                    _ => None,
                };
                (node, target)
            }
            ContentGroup::Blockquote { blocks, .. } => {
                let node: Node = Node::element("blockquote")
                    .children(blocks.iter().map(|block| render_paragraph(block)))
                    .into();
                (Some(node), container_target(blocks, section))
            }
            ContentGroup::List { kind, items, .. } => {
                let tag = match kind {
                    ListKind::Number => "ol",
                    ListKind::Bullet | ListKind::Other => "ul",
                };
                let node: Node = Node::element(tag)
                    .children(
                        items
                            .iter()
                            .map(|item| Node::from(Node::element("li").child(render_paragraph(item)))),
                    )
                    .into();
                (Some(node), container_target(items, section))
            }
        }
    }
}

type RenderedGroup = (Option<Node>, Option<VisibilityTarget>);

fn container_target(blocks: &[&NormalBlock], section: SectionKey) -> Option<VisibilityTarget> {
    blocks.first().map(|first| VisibilityTarget {
        block_key: first.key.clone(),
        section,
    })
}
