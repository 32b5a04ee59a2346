//! Language hints derived from file extensions.

/// Hint passed to the highlighter when an extension is not recognised.
pub const PLAIN_TEXT: &str = "text";

/// Map a file extension (without the dot) to a highlighter language name.
///
/// Returns `None` for unknown or empty extensions.
#[must_use]
pub fn detect_language(extension: &str) -> Option<&'static str> {
    let lang = match extension.to_ascii_lowercase().as_str() {
        "svelte" => "svelte",
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "tsx",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "jsx",
        "css" | "pcss" | "postcss" => "css",
        "scss" => "scss",
        "html" | "htm" => "html",
        "json" => "json",
        "jsonc" => "jsonc",
        "md" => "markdown",
        "svx" | "mdx" => "mdx",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "sh" | "bash" | "zsh" => "bash",
        _ => return None,
    };
    Some(lang)
}

/// Like [`detect_language`], falling back to [`PLAIN_TEXT`].
#[must_use]
pub fn language_hint(extension: &str) -> &'static str {
    detect_language(extension).unwrap_or(PLAIN_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("svelte", Some("svelte"))]
    #[case("ts", Some("typescript"))]
    #[case("JS", Some("javascript"))]
    #[case("css", Some("css"))]
    #[case("json", Some("json"))]
    #[case("", None)]
    #[case("xyz", None)]
    fn detects_by_extension(#[case] ext: &str, #[case] expected: Option<&str>) {
        assert_eq!(detect_language(ext), expected);
    }

    #[test]
    fn unknown_falls_back_to_plain_text() {
        assert_eq!(language_hint("lock"), PLAIN_TEXT);
        assert_eq!(language_hint(""), PLAIN_TEXT);
    }
}
