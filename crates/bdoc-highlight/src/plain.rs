//! Built-in renderer that escapes source into line-wrapped markup.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{HighlightError, Highlighter};

/// Renders source as escaped text without token colouring.
///
/// Output mirrors the shape of a themed highlighter:
/// `<pre class="bdoc" data-language="..."><code>` followed by one
/// `<span class="line">` per source line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        let mut out = String::with_capacity(code.len() + 64);
        let _ = write!(
            out,
            r#"<pre class="bdoc" data-language="{}" tabindex="0"><code>"#,
            encode_double_quoted_attribute(language)
        );
        for (i, line) in code.lines().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = write!(out, r#"<span class="line">{}</span>"#, encode_text(line));
        }
        out.push_str("</code></pre>");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "plain"
    }
}
