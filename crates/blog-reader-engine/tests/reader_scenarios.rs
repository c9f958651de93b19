use blog_reader_engine::{
    Block, Node, Reader, SectionKey, VisibilityCollector, parse_body,
    render::{PlainHighlighter, SanityImageUrlBuilder},
    toc_entries,
};

fn load_fixture(name: &str) -> Vec<Block> {
    let json = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.json",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    parse_body(&json).unwrap()
}

fn reader() -> Reader {
    Reader::new(
        PlainHighlighter,
        SanityImageUrlBuilder::new("proj", "production"),
    )
}

#[test]
fn section_boundary_splits_bullet_runs() {
    let body = load_fixture("two_sections");

    let rendered = reader().render(&body);

    let shape: Vec<(Option<&str>, Option<&str>)> = rendered
        .nodes
        .iter()
        .map(|node| (node.tag(), node.attr("id")))
        .collect();
    assert_eq!(
        shape,
        vec![
            (Some("h1"), Some("k1")),
            (Some("p"), None),
            (Some("ul"), None),
            (Some("h1"), Some("k5")),
            (Some("ul"), None),
        ]
    );
    assert_eq!(rendered.nodes[2].children().len(), 2);
    assert_eq!(rendered.nodes[4].children().len(), 1);

    insta::assert_snapshot!(rendered.to_html(), @r##"
    <h1 id="k1"><a href="#k1"><span>Intro</span></a></h1>
    <p><span>Read </span><span><a href="https://x"><strong>this</strong></a></span></p>
    <ul><li><p><span>a</span></p></li><li><p><span>b</span></p></li></ul>
    <h1 id="k5"><a href="#k5"><span>Next</span></a></h1>
    <ul><li><p><span>c</span></p></li></ul>
    "##);
}

#[test]
fn mixed_content_renders_every_kind() {
    let body = load_fixture("mixed_content");

    let rendered = reader().render(&body);

    insta::assert_snapshot!(rendered.to_html(), @r##"
    <blockquote><p><span>To be</span></p><p><span>or not</span></p></blockquote>
    <h2 id="h"><a href="#h"><span>Steps</span></a></h2>
    <ol><li><p><span>Build</span></p></li><li><p><span>Run</span></p></li></ol>
    <ul><li><p><span>Note</span></p></li></ul>
    <div class="shiki-code"><pre class="shiki"><code class="language-sh"><span class="line">cargo build</span>
    <span class="line highlighted-line">cargo run</span></code></pre></div>
    <div class="w-full"><img class="mx-auto" src="https://cdn.sanity.io/images/proj/production/abc-1600x900.png?max-w=1024"></div>
    "##);
}

#[test]
fn rendered_keys_follow_body_order() {
    let body = load_fixture("mixed_content");

    let rendered = reader().render(&body);

    let quote_text: Vec<String> = rendered.nodes[0]
        .children()
        .iter()
        .map(Node::text_content)
        .collect();
    assert_eq!(quote_text, vec!["To be", "or not"]);
    let list_text: Vec<String> = rendered.nodes[2]
        .children()
        .iter()
        .map(Node::text_content)
        .collect();
    assert_eq!(list_text, vec!["Build", "Run"]);
}

#[test]
fn toc_follows_tracked_blocks() {
    let body = load_fixture("two_sections");
    let collector = VisibilityCollector::new();
    let rendered = reader().render(&body);

    let handles: Vec<_> = rendered
        .targets
        .iter()
        .map(|target| target.track(&collector))
        .collect();
    assert_eq!(
        rendered
            .targets
            .iter()
            .map(|t| t.block_key.as_str())
            .collect::<Vec<_>>(),
        vec!["k1", "k2", "k3", "k5", "k6"]
    );

    // Scrolled so that only the second section's list is on screen
    handles[4].set_visible(true);
    let highlighted: Vec<bool> = toc_entries(&body, &collector)
        .iter()
        .map(|entry| entry.highlighted)
        .collect();
    assert_eq!(highlighted, vec![false, true]);

    // Both sections visible at the boundary
    handles[2].set_visible(true);
    assert!(collector.get_visibility(Some("k1")));
    assert!(collector.get_visibility(Some("k5")));

    drop(handles);
    assert!(collector.is_empty());
    assert!(!collector.is_section_visible(&SectionKey::from("k5")));
}
