//! Import specifier rewriting.
//!
//! Registry sources import each other through workspace-internal aliases
//! (`$lib/registry/ui/button`). Consumers copy those files into a project where
//! the same modules live at public paths (`$lib/components/ui/button`). The
//! rewriter finds module specifiers in `import`/`export ... from`/`import()`
//! statements and rewrites their prefix according to an ordered rule list.
//!
//! Rewriting a specifier runs the rules to a fixed point, and rule sets whose
//! output could be re-matched as a whole are rejected at construction. Together
//! that makes [`ImportRewriter::rewrite`] idempotent.

use crate::error::TransformError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `*`: exactly one non-empty path segment.
    Any,
}

impl Segment {
    fn matches(&self, segment: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == segment,
            Self::Any => !segment.is_empty(),
        }
    }
}

#[derive(Debug, Clone)]
struct PrefixRule {
    from_raw: String,
    to_raw: String,
    from: Vec<Segment>,
    to: Vec<String>,
}

impl PrefixRule {
    fn parse(from: String, to: String) -> Result<Self, TransformError> {
        let invalid = |reason: &str| TransformError::InvalidRule {
            from: from.clone(),
            to: to.clone(),
            reason: reason.to_string(),
        };

        if !from.ends_with('/') || !to.ends_with('/') {
            return Err(invalid("prefixes must end in '/'"));
        }
        if to.contains('*') {
            return Err(invalid("replacement must not contain '*'"));
        }

        let from_segments: Vec<Segment> = split_prefix(&from)
            .map(|segment| match segment {
                "*" => Segment::Any,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();
        let to_segments: Vec<String> = split_prefix(&to).map(str::to_string).collect();

        let has_empty = from_segments
            .iter()
            .any(|segment| matches!(segment, Segment::Literal(l) if l.is_empty()))
            || to_segments.iter().any(String::is_empty);
        if has_empty {
            return Err(invalid("prefixes must not contain empty segments"));
        }

        Ok(Self {
            from_raw: from,
            to_raw: to,
            from: from_segments,
            to: to_segments,
        })
    }

    /// Rewrite `segments` if this rule's pattern is a prefix of them.
    fn apply(&self, segments: &[&str]) -> Option<String> {
        if segments.len() < self.from.len() {
            return None;
        }
        let matched = self
            .from
            .iter()
            .zip(segments)
            .all(|(pattern, segment)| pattern.matches(segment));
        if !matched {
            return None;
        }

        let rest = &segments[self.from.len()..];
        let mut joined = self.to.join("/");
        for segment in rest {
            joined.push('/');
            joined.push_str(segment);
        }
        Some(joined)
    }

    /// Whether this rule's pattern can match the whole of `output`, i.e. any
    /// specifier produced with that output prefix.
    fn covers(&self, output: &[String]) -> bool {
        self.from.len() <= output.len()
            && self
                .from
                .iter()
                .zip(output)
                .all(|(pattern, segment)| pattern.matches(segment))
    }
}

fn split_prefix(prefix: &str) -> impl Iterator<Item = &str> {
    prefix.strip_suffix('/').unwrap_or(prefix).split('/')
}

/// Compiled, ordered list of import prefix rewrites. The first matching rule
/// wins.
#[derive(Debug, Clone, Default)]
pub struct ImportRewriter {
    rules: Vec<PrefixRule>,
}

impl ImportRewriter {
    /// Compile `(from, to)` prefix pairs.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidRule` for malformed prefixes and
    /// `TransformError::NonIdempotentRules` when some rule's pattern would
    /// match a whole replacement prefix.
    pub fn new<I, F, T>(rules: I) -> Result<Self, TransformError>
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        let rules = rules
            .into_iter()
            .map(|(from, to)| PrefixRule::parse(from.into(), to.into()))
            .collect::<Result<Vec<_>, _>>()?;

        for producer in &rules {
            if let Some(matcher) = rules.iter().find(|rule| rule.covers(&producer.to)) {
                return Err(TransformError::NonIdempotentRules {
                    from: matcher.from_raw.clone(),
                    output: producer.to_raw.clone(),
                });
            }
        }

        Ok(Self { rules })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rewrite a single module specifier. Returns `None` when no rule applies.
    #[must_use]
    pub fn rewrite_specifier(&self, specifier: &str) -> Option<String> {
        let mut current: Option<String> = None;
        // Each step after the first consumes at least one original segment.
        let limit = specifier.split('/').count() + 1;

        for _ in 0..limit {
            let input = current.as_deref().unwrap_or(specifier);
            let segments: Vec<&str> = input.split('/').collect();
            match self.rules.iter().find_map(|rule| rule.apply(&segments)) {
                Some(next) if next != input => current = Some(next),
                _ => break,
            }
        }
        current
    }

    /// Rewrite every module specifier in `source`.
    ///
    /// Only string literals in module position are touched: after `from`,
    /// after a bare `import` (side-effect import), or as the argument of
    /// `import(...)`/`require(...)`. Comments and other strings are skipped.
    #[must_use]
    pub fn rewrite(&self, source: &str) -> String {
        if self.rules.is_empty() {
            return source.to_string();
        }

        let bytes = source.as_bytes();
        let mut out = String::with_capacity(source.len());
        let mut copied = 0;
        let mut rewritten = 0usize;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    i = find_byte(bytes, i + 2, b'\n').unwrap_or(bytes.len());
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    i = find_block_comment_end(bytes, i + 2).unwrap_or(bytes.len());
                }
                quote @ (b'\'' | b'"' | b'`') => {
                    let Some(end) = find_closing_quote(bytes, i + 1, quote) else {
                        i += 1;
                        continue;
                    };
                    if quote != b'`' && is_module_position(&source[..i]) {
                        let specifier = &source[i + 1..end];
                        if let Some(replacement) = self.rewrite_specifier(specifier) {
                            out.push_str(&source[copied..=i]);
                            out.push_str(&replacement);
                            copied = end;
                            rewritten += 1;
                        }
                    }
                    i = end + 1;
                }
                _ => i += 1,
            }
        }

        out.push_str(&source[copied..]);
        if rewritten > 0 {
            tracing::trace!(rewritten, "rewrote import specifiers");
        }
        out
    }
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|b| *b == needle)
        .map(|pos| from + pos)
}

/// Index just past the closing `*/`.
fn find_block_comment_end(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(2)
        .position(|w| w == b"*/")
        .map(|pos| from + pos + 2)
}

/// Index of the closing quote. Plain string literals end at a newline
/// (returns `None`); template literals may span lines.
fn find_closing_quote(bytes: &[u8], from: usize, quote: u8) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return None,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn is_module_position(before: &str) -> bool {
    let trimmed = before.trim_end();
    if ends_with_keyword(trimmed, "from") || ends_with_keyword(trimmed, "import") {
        return true;
    }
    trimmed.strip_suffix('(').is_some_and(|call| {
        let call = call.trim_end();
        ends_with_keyword(call, "import") || ends_with_keyword(call, "require")
    })
}

fn ends_with_keyword(text: &str, keyword: &str) -> bool {
    text.strip_suffix(keyword).is_some_and(|head| {
        head.chars()
            .next_back()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '$' || c == '.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn svelte_rules() -> ImportRewriter {
        ImportRewriter::new([
            ("$lib/registry/ui/", "$lib/components/ui/"),
            ("$lib/registry/hooks/", "$lib/hooks/"),
            ("$lib/registry/lib/", "$lib/"),
            ("$lib/registry/blocks/*/components/", "$lib/components/"),
        ])
        .expect("rules compile")
    }

    #[test]
    fn rewrites_named_import() {
        let source = r#"import { Button } from "$lib/registry/ui/button/index.js";"#;
        assert_eq!(
            svelte_rules().rewrite(source),
            r#"import { Button } from "$lib/components/ui/button/index.js";"#
        );
    }

    #[test]
    fn rewrites_wildcard_block_segment() {
        let source = "import AppSidebar from '$lib/registry/blocks/sidebar-07/components/app-sidebar.svelte';";
        assert_eq!(
            svelte_rules().rewrite(source),
            "import AppSidebar from '$lib/components/app-sidebar.svelte';"
        );
    }

    #[test]
    fn rewrites_multiline_import_and_export_from() {
        let source = "import {\n  cn,\n  type WithElementRef,\n} from \"$lib/registry/lib/utils.js\";\nexport * from \"$lib/registry/hooks/is-mobile.svelte.js\";";
        assert_eq!(
            svelte_rules().rewrite(source),
            "import {\n  cn,\n  type WithElementRef,\n} from \"$lib/utils.js\";\nexport * from \"$lib/hooks/is-mobile.svelte.js\";"
        );
    }

    #[test]
    fn rewrites_side_effect_and_dynamic_imports() {
        let source = "import \"$lib/registry/ui/sonner/styles.css\";\nconst m = await import(\"$lib/registry/hooks/use-x.js\");";
        assert_eq!(
            svelte_rules().rewrite(source),
            "import \"$lib/components/ui/sonner/styles.css\";\nconst m = await import(\"$lib/hooks/use-x.js\");"
        );
    }

    #[test]
    fn leaves_non_module_strings_alone() {
        let source = r#"const path = "$lib/registry/ui/button"; // from "$lib/registry/ui/x""#;
        assert_eq!(svelte_rules().rewrite(source), source);
    }

    #[test]
    fn leaves_consumer_paths_alone() {
        let source = r#"import { Button } from "$lib/components/ui/button/index.js";"#;
        assert_eq!(svelte_rules().rewrite(source), source);
    }

    #[test]
    fn does_not_match_keyword_suffix() {
        let source = r#"const datefrom "$lib/registry/ui/x";"#;
        assert_eq!(svelte_rules().rewrite(source), source);
    }

    #[test]
    fn apostrophes_in_markup_do_not_swallow_imports() {
        let source = "<p>Don't panic</p>\n<script>\nimport X from '$lib/registry/ui/x';\n</script>";
        assert_eq!(
            svelte_rules().rewrite(source),
            "<p>Don't panic</p>\n<script>\nimport X from '$lib/components/ui/x';\n</script>"
        );
    }

    #[test]
    fn specifier_equal_to_prefix_without_slash() {
        assert_eq!(
            svelte_rules().rewrite_specifier("$lib/registry/ui"),
            Some("$lib/components/ui".to_string())
        );
    }

    #[test]
    fn specifier_runs_to_fixed_point() {
        let rewriter = svelte_rules();
        let once = rewriter
            .rewrite_specifier("$lib/registry/lib/registry/ui/button")
            .unwrap();
        assert_eq!(once, "$lib/components/ui/button");
        assert_eq!(rewriter.rewrite_specifier(&once), None);
    }

    #[test]
    fn first_matching_rule_wins() {
        let rewriter =
            ImportRewriter::new([("@/registry/", "@/a/"), ("@/registry/ui/", "@/b/")]).unwrap();
        assert_eq!(
            rewriter.rewrite_specifier("@/registry/ui/x"),
            Some("@/a/ui/x".to_string())
        );
    }

    #[test]
    fn rejects_rule_matching_its_own_output() {
        let err = ImportRewriter::new([("$lib/", "$lib/components/")]).unwrap_err();
        assert!(matches!(err, TransformError::NonIdempotentRules { .. }));
    }

    #[test]
    fn rejects_wildcard_matching_other_output() {
        let err = ImportRewriter::new([("$lib/x/", "$lib/y/"), ("*/y/", "$lib/z/")]).unwrap_err();
        assert!(matches!(
            err,
            TransformError::NonIdempotentRules { ref from, ref output }
                if from == "*/y/" && output == "$lib/y/"
        ));
    }

    #[test]
    fn rejects_malformed_prefixes() {
        assert!(matches!(
            ImportRewriter::new([("$lib/registry", "$lib/")]),
            Err(TransformError::InvalidRule { .. })
        ));
        assert!(matches!(
            ImportRewriter::new([("$lib//ui/", "$lib/")]),
            Err(TransformError::InvalidRule { .. })
        ));
        assert!(matches!(
            ImportRewriter::new([("$lib/a/", "$lib/*/")]),
            Err(TransformError::InvalidRule { .. })
        ));
    }

    #[test]
    fn empty_rewriter_is_identity() {
        let rewriter = ImportRewriter::default();
        assert!(rewriter.is_empty());
        let source = r#"import x from "$lib/registry/ui/x";"#;
        assert_eq!(rewriter.rewrite(source), source);
    }
}
