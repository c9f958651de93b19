use crate::model::{Block, BlockStyle, ListKind, NormalBlock};

/// Structural role of a block, deciding whether it merges with its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Paragraphs, headings, code and images; never merged
    Normal,
    Blockquote,
    BulletList,
    NumberList,
}

impl Role {
    /// Classifies a block. `listItem` takes precedence over `style`.
    pub fn of(block: &Block) -> Role {
        let Some(block) = block.as_normal() else {
            return Role::Normal;
        };

        match block.list_item {
            Some(ListKind::Bullet | ListKind::Other) => Role::BulletList,
            Some(ListKind::Number) => Role::NumberList,
            None if block.style == BlockStyle::Blockquote => Role::Blockquote,
            None => Role::Normal,
        }
    }
}

/// Blocks grouped for rendering.
///
/// The CMS sends a multi-paragraph quote or a multi-item list as sibling blocks;
/// grouping folds each run back into one container. Every group carries the key
/// of the h1/h2 section it belongs to (`None` before the first such heading).
#[derive(Debug, Clone, PartialEq)]
pub enum ContentGroup<'a> {
    /// A block rendered on its own, without a wrapping container
    Single {
        block: &'a Block,
        section: Option<&'a str>,
    },
    /// Consecutive quote lines rendered as one `<blockquote>`
    Blockquote {
        blocks: Vec<&'a NormalBlock>,
        section: Option<&'a str>,
    },
    /// Consecutive list items rendered as one `<ul>` or `<ol>`
    List {
        kind: ListKind,
        items: Vec<&'a NormalBlock>,
        section: Option<&'a str>,
    },
}

impl<'a> ContentGroup<'a> {
    pub fn section(&self) -> Option<&'a str> {
        match self {
            ContentGroup::Single { section, .. }
            | ContentGroup::Blockquote { section, .. }
            | ContentGroup::List { section, .. } => *section,
        }
    }

    /// Keys of the blocks in this group, in body order.
    pub fn keys(&self) -> Vec<&'a str> {
        match self {
            ContentGroup::Single { block, .. } => (*block).key().into_iter().collect(),
            ContentGroup::Blockquote { blocks: items, .. } | ContentGroup::List { items, .. } => {
                items.iter().map(|b| b.key.as_str()).collect()
            }
        }
    }
}

/// Groups a body for rendering in a single pass.
///
/// Runs of quote lines and runs of same-kind list items merge into one group.
/// A run ends when the role changes or when an h1/h2 heading opens a new
/// section, so lists on either side of a section heading never merge.
pub fn group_blocks(body: &[Block]) -> Vec<ContentGroup<'_>> {
    let mut grouper = Grouper::default();
    for block in body {
        grouper.push(block);
    }
    grouper.finish()
}

#[derive(Default)]
struct Grouper<'a> {
    groups: Vec<ContentGroup<'a>>,
    pending: Vec<&'a Block>,
    pending_role: Option<Role>,
    section: Option<&'a str>,
}

impl<'a> Grouper<'a> {
    fn push(&mut self, block: &'a Block) {
        if let Some(heading) = block.as_normal()
            && heading.style.starts_section()
            && self.section != Some(heading.key.as_str())
        {
            self.flush();
            self.section = Some(heading.key.as_str());
        }

        let role = Role::of(block);
        if self.pending_role.is_some_and(|pending| pending != role) {
            self.flush();
        }

        self.pending.push(block);
        self.pending_role = Some(role);
    }

    fn flush(&mut self) {
        let Some(role) = self.pending_role.take() else {
            return;
        };
        let pending = std::mem::take(&mut self.pending);
        let section = self.section;

        match role {
            Role::Normal => {
                self.groups.extend(
                    pending
                        .into_iter()
                        .map(|block| ContentGroup::Single { block, section }),
                );
            }
            Role::Blockquote => self.groups.push(ContentGroup::Blockquote {
                blocks: pending.into_iter().filter_map(Block::as_normal).collect(),
                section,
            }),
            Role::BulletList | Role::NumberList => {
                let items: Vec<&NormalBlock> =
                    pending.into_iter().filter_map(Block::as_normal).collect();
                let kind = items
                    .first()
                    .and_then(|item| item.list_item)
                    .unwrap_or(ListKind::Bullet);
                self.groups.push(ContentGroup::List {
                    kind,
                    items,
                    section,
                });
            }
        }
    }

    fn finish(mut self) -> Vec<ContentGroup<'a>> {
        self.flush();
        self.groups
    }
}
