use crate::model::{Annotation, InlineSpan, MarkDef};
use crate::render::Node;

/// Built-in decorator that needs no `markDefs` entry.
pub const STRONG: &str = "strong";

/// Renders one span to a single inline node.
///
/// Marks apply in array order, each wrapping the result of the previous one, so
/// the last mark ends up outermost. Marks that resolve to nothing leave the
/// content as it is.
pub fn render_span(span: &InlineSpan, mark_defs: &[MarkDef]) -> Node {
    let content = span
        .marks
        .iter()
        .fold(Node::text(span.text.as_str()), |content, mark| {
            apply_mark(mark, mark_defs, content)
        });

    Node::element("span").child(content).into()
}

/// Renders every span of a block in order.
pub fn render_spans(spans: &[InlineSpan], mark_defs: &[MarkDef]) -> Vec<Node> {
    spans
        .iter()
        .map(|span| render_span(span, mark_defs))
        .collect()
}

fn apply_mark(mark: &str, mark_defs: &[MarkDef], content: Node) -> Node {
    if mark == STRONG {
        return Node::element("strong").child(content).into();
    }

    match mark_defs.iter().find(|def| def.key == mark) {
        Some(def) => match def.annotation() {
            Annotation::Link { href } => Node::element("a").attr("href", href).child(content).into(),
            Annotation::Unknown => content,
        },
        None => {
            log::debug!("Unresolved mark '{mark}', rendering span as plain text");
            content
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn span(text: &str, marks: &[&str]) -> InlineSpan {
        InlineSpan {
            key: "s1".to_string(),
            text: text.to_string(),
            marks: marks.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn link(key: &str, href: &str) -> MarkDef {
        MarkDef {
            key: key.to_string(),
            kind: "link".to_string(),
            href: Some(href.to_string()),
        }
    }

    #[test]
    fn test_plain_span() {
        let node = render_span(&span("hello", &[]), &[]);

        assert_eq!(node.to_html(), "<span>hello</span>");
    }

    #[test]
    fn test_link_wraps_strong_in_mark_order() {
        let defs = vec![link("linkKey1", "https://x")];
        let node = render_span(&span("text", &["strong", "linkKey1"]), &defs);

        let anchor = &node.children()[0];
        assert_eq!(anchor.tag(), Some("a"));
        assert_eq!(anchor.attr("href"), Some("https://x"));
        assert_eq!(anchor.children()[0].tag(), Some("strong"));
        assert_eq!(
            node.to_html(),
            "<span><a href=\"https://x\"><strong>text</strong></a></span>"
        );
    }

    #[test]
    fn test_strong_wraps_link_when_listed_last() {
        let defs = vec![link("l", "https://x")];
        let node = render_span(&span("text", &["l", "strong"]), &defs);

        assert_eq!(
            node.to_html(),
            "<span><strong><a href=\"https://x\">text</a></strong></span>"
        );
    }

    #[rstest]
    #[case::missing_def(&["nope"])]
    #[case::unsupported_decorator(&["em"])]
    #[case::empty_mark(&[""])]
    fn test_unresolved_marks_render_plain(#[case] marks: &[&str]) {
        let node = render_span(&span("plain", marks), &[link("l", "https://x")]);

        assert_eq!(node.to_html(), "<span>plain</span>");
    }

    #[test]
    fn test_unknown_annotation_passes_through() {
        let defs = vec![MarkDef {
            key: "f1".to_string(),
            kind: "footnote".to_string(),
            href: None,
        }];
        let node = render_span(&span("note", &["f1", "strong"]), &defs);

        assert_eq!(node.to_html(), "<span><strong>note</strong></span>");
    }

    #[test]
    fn test_first_matching_def_wins() {
        let defs = vec![link("l", "https://first"), link("l", "https://second")];
        let node = render_span(&span("x", &["l"]), &defs);

        assert_eq!(node.children()[0].attr("href"), Some("https://first"));
    }

    #[test]
    fn test_render_spans_preserves_order() {
        let nodes = render_spans(&[span("a", &[]), span("b", &["strong"])], &[]);

        let html: Vec<_> = nodes.iter().map(Node::to_html).collect();
        assert_eq!(html, vec!["<span>a</span>", "<span><strong>b</strong></span>"]);
    }
}
