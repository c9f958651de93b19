use serde::Deserialize;

/// An inline run of text carrying zero or more mark references.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InlineSpan {
    #[serde(rename = "_key", default)]
    pub key: String,
    #[serde(default)]
    pub text: String,
    /// Built-in decorator names (`"strong"`) or keys into the parent block's `markDefs`
    #[serde(default)]
    pub marks: Vec<String>,
}

/// Annotation attached to a block and referenced from spans by key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub kind: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// What a [`MarkDef`] does to the content it wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation<'a> {
    Link { href: &'a str },
    /// Passes the wrapped content through unchanged
    Unknown,
}

impl MarkDef {
    pub fn annotation(&self) -> Annotation<'_> {
        match (self.kind.as_str(), self.href.as_deref()) {
            ("link", Some(href)) => Annotation::Link { href },
            _ => Annotation::Unknown,
        }
    }
}
