use thiserror::Error;

/// Class attached to emphasized code lines.
pub const HIGHLIGHTED_LINE_CLASS: &str = "highlighted-line";

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("Failed to highlight {language} code: {message}")]
    Failed { language: String, message: String },
}

/// Position in highlighted source, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePosition {
    pub line: usize,
    pub character: usize,
}

/// Half-open range of source to decorate with a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDecoration {
    pub start: LinePosition,
    pub end: LinePosition,
    pub class: &'static str,
}

impl LineDecoration {
    /// Decoration covering exactly one 0-based line.
    pub fn whole_line(line: usize) -> Self {
        Self {
            start: LinePosition { line, character: 0 },
            end: LinePosition {
                line: line + 1,
                character: 0,
            },
            class: HIGHLIGHTED_LINE_CLASS,
        }
    }

    pub fn covers_line(&self, line: usize) -> bool {
        self.start.line <= line && line < self.end.line
    }
}

/// Turns markup-free source into highlighted markup.
///
/// Implementations must be callable from several threads since sibling code
/// blocks may be highlighted concurrently.
pub trait SyntaxHighlighter: Send + Sync {
    fn highlight(
        &self,
        code: &str,
        language: &str,
        decorations: &[LineDecoration],
    ) -> Result<String, HighlightError>;
}

/// Translates 1-based highlighted line numbers into decorations.
///
/// Line `0` cannot be addressed and is skipped.
pub fn line_decorations(highlighted_lines: &[usize]) -> Vec<LineDecoration> {
    highlighted_lines
        .iter()
        .filter_map(|&line| match line.checked_sub(1) {
            Some(index) => Some(LineDecoration::whole_line(index)),
            None => {
                log::warn!("Ignoring highlighted line 0, line numbers start at 1");
                None
            }
        })
        .collect()
}

/// Highlighter without tokenization: escapes the code and wraps every line in
/// a `<span class="line">`, adding the decoration class where requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl PlainHighlighter {
    pub fn render(code: &str, language: &str, decorations: &[LineDecoration]) -> String {
        let language = if language.trim().is_empty() {
            "text"
        } else {
            language.trim()
        };

        let mut out = String::from("<pre class=\"shiki\"><code class=\"language-");
        html_escape::encode_double_quoted_attribute_to_string(language, &mut out);
        out.push_str("\">");

        for (index, line) in code.trim_end_matches('\n').split('\n').enumerate() {
            if index > 0 {
                out.push('\n');
            }
            let class = if decorations.iter().any(|d| d.covers_line(index)) {
                "line highlighted-line"
            } else {
                "line"
            };
            out.push_str("<span class=\"");
            out.push_str(class);
            out.push_str("\">");
            html_escape::encode_text_to_string(line, &mut out);
            out.push_str("</span>");
        }

        out.push_str("</code></pre>");
        out
    }
}

impl SyntaxHighlighter for PlainHighlighter {
    fn highlight(
        &self,
        code: &str,
        language: &str,
        decorations: &[LineDecoration],
    ) -> Result<String, HighlightError> {
        Ok(Self::render(code, language, decorations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_line_decorations_are_zero_based_half_open() {
        let decorations = line_decorations(&[1, 3]);

        assert_eq!(
            decorations,
            vec![
                LineDecoration {
                    start: LinePosition { line: 0, character: 0 },
                    end: LinePosition { line: 1, character: 0 },
                    class: HIGHLIGHTED_LINE_CLASS,
                },
                LineDecoration {
                    start: LinePosition { line: 2, character: 0 },
                    end: LinePosition { line: 3, character: 0 },
                    class: HIGHLIGHTED_LINE_CLASS,
                },
            ]
        );
    }

    #[test]
    fn test_line_zero_is_skipped() {
        assert_eq!(line_decorations(&[0, 2]), vec![LineDecoration::whole_line(1)]);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(2, false)]
    fn test_covers_line(#[case] line: usize, #[case] expected: bool) {
        assert_eq!(LineDecoration::whole_line(1).covers_line(line), expected);
    }

    #[test]
    fn test_plain_highlighter_marks_lines() {
        let html = PlainHighlighter
            .highlight("a < b\nc\n", "rust", &line_decorations(&[2]))
            .unwrap();

        assert_eq!(
            html,
            "<pre class=\"shiki\"><code class=\"language-rust\">\
             <span class=\"line\">a &lt; b</span>\n\
             <span class=\"line highlighted-line\">c</span></code></pre>"
        );
    }

    #[test]
    fn test_plain_highlighter_defaults_language() {
        let html = PlainHighlighter::render("x", "", &[]);

        assert!(html.contains("language-text"));
    }
}
